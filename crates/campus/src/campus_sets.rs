//! Frame ordering for campus systems.
//!
//! # Startup
//!
//! * **Build** – layout tables become the `CampusScene` and the
//!   `TransitAnimator`. Host systems that instantiate the scene run after it.
//!
//! # Update phases
//!
//! ```text
//! Input  →  Simulate  →  Visual
//! ```
//!
//! * **Input** – pointer picking and keyboard shortcuts feed the
//!   interaction state.
//! * **Simulate** – transit tick and interaction timers. The only phase that
//!   moves agents.
//! * **Visual** – copies agent poses and highlights onto rendered entities,
//!   so a frame never shows a stale transform.

use bevy::prelude::*;

#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum CampusSet {
    Build,
    Input,
    Simulate,
    Visual,
}

pub(crate) fn configure_sets(app: &mut App) {
    app.configure_sets(
        Update,
        (CampusSet::Input, CampusSet::Simulate, CampusSet::Visual).chain(),
    );
}
