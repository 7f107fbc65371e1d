//! Transit animator: monorail, road vehicles and pedestrians.
//!
//! Three independent kinds of periodic motion, each a small state machine
//! advanced once per host tick:
//! - one monorail car on a closed elliptical loop, angle kept in `[0, 2π)`
//! - a fixed vehicle pool on straight lanes, wrapping at the lane ends
//!   (or leaving and respawning under [`VehiclePolicy::Respawn`])
//! - pedestrians walking straight walkways on a staggered schedule, removed
//!   on arrival and replaced with a fixed probability after a random delay
//!
//! The [`TransitAnimator`] resource owns every live agent; the renderer only
//! reads poses after the tick has run.

pub mod animator;
pub mod monorail;
pub mod pedestrians;
pub mod systems;
pub mod types;
pub mod vehicles;
pub mod visuals;

pub use animator::{AgentView, PendingSpawn, SpawnRequest, TransitAnimator, TransitStats};
pub use monorail::MonorailCar;
pub use pedestrians::Pedestrian;
pub use systems::advance_transit;
pub use types::*;
pub use vehicles::{RoadVehicle, CAR_PALETTE};
pub use visuals::agent_visual;
