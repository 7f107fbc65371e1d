//! ECS systems driving the transit animator from the host clock.

use bevy::prelude::*;

use crate::campus_rng::CampusRng;

use super::animator::TransitAnimator;

/// Advance every agent by the frame delta. Runs in `CampusSet::Simulate`,
/// before any system that reads agent poses.
pub fn advance_transit(
    time: Res<Time>,
    mut animator: ResMut<TransitAnimator>,
    mut rng: ResMut<CampusRng>,
) {
    animator.tick(time.delta_secs(), &mut rng.0);
}
