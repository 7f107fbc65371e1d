//! Parametric building synthesizer.
//!
//! Turns a [`BuildingSpec`] (base position, one or more sections, floor
//! count, facade colour) into a composite [`SceneNode`](crate::scene_graph::SceneNode)
//! group with windows placed on every face:
//! - one box per section, offset from the base position
//! - window columns = floor(face span / spacing), rows = floors
//! - ground-floor glass buildings get one wide panel per face instead of the
//!   bottom window row
//! - quads sit slightly in front of each face to avoid z-fighting

pub mod synthesize;
pub mod types;
pub mod window_grid;

pub use synthesize::{synthesize, synthesize_parking, Synthesized};
pub use types::{BuildingSpec, ParkingSpec, Section};
pub use window_grid::{window_columns, Facade, WindowGrid};
