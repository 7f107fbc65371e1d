use bevy::prelude::*;
use rand::Rng;

use crate::config::{PEDESTRIAN_BOB_HALF_PERIOD, PEDESTRIAN_BOB_HEIGHT};
use crate::error::CampusError;

use super::types::{heading_from_direction, AgentId, AgentPose, Walkway};

/// A walker moving in a straight line from walkway start to end.
///
/// Forward progress and the vertical bob run on separate clocks: `distance`
/// grows with speed, `bob_phase` with wall time from a random start.
#[derive(Debug, Clone, PartialEq)]
pub struct Pedestrian {
    pub id: AgentId,
    pub walkway: usize,
    origin: Vec3,
    direction: Vec3,
    length: f32,
    speed: f32,
    distance: f32,
    bob_phase: f32,
}

impl Pedestrian {
    /// Place a pedestrian at the start of `path`. Zero-length paths and
    /// non-positive speeds are rejected so no NaN ever reaches a transform.
    pub fn spawn(
        id: AgentId,
        walkway: usize,
        path: &Walkway,
        speed: f32,
        rng: &mut impl Rng,
    ) -> Result<Self, CampusError> {
        path.validate()?;
        if !speed.is_finite() || speed <= 0.0 {
            return Err(CampusError::invalid(
                &path.name,
                format!("pedestrian speed must be positive, got {speed}"),
            ));
        }

        let origin = path.start.at_height(0.0);
        let delta = path.end.at_height(0.0) - origin;
        let length = delta.length();
        Ok(Self {
            id,
            walkway,
            origin,
            direction: delta / length,
            length,
            speed,
            distance: 0.0,
            bob_phase: rng.gen_range(0.0..2.0 * PEDESTRIAN_BOB_HALF_PERIOD),
        })
    }

    /// Seconds needed to walk the whole path.
    pub fn duration(&self) -> f32 {
        self.length / self.speed
    }

    /// Fraction of the path covered, in `[0, 1]`.
    pub fn progress(&self) -> f32 {
        self.distance / self.length
    }

    /// Returns `true` once the end of the walkway is reached.
    pub fn advance(&mut self, dt: f32) -> bool {
        self.distance = (self.distance + self.speed * dt).min(self.length);
        self.bob_phase = (self.bob_phase + dt).rem_euclid(2.0 * PEDESTRIAN_BOB_HALF_PERIOD);
        self.distance >= self.length
    }

    /// Square-wave bob: up for one half period, down for the next.
    pub fn bob_offset(&self) -> f32 {
        if self.bob_phase < PEDESTRIAN_BOB_HALF_PERIOD {
            PEDESTRIAN_BOB_HEIGHT
        } else {
            0.0
        }
    }

    pub fn pose(&self) -> AgentPose {
        AgentPose {
            translation: self.origin + self.direction * self.distance + Vec3::Y * self.bob_offset(),
            heading: heading_from_direction(self.direction),
        }
    }
}
