//! Site layout composer.
//!
//! Places buildings, roads, sidewalks, crosswalks, green areas, trees and
//! street lighting into one shared coordinate space. The composer is total:
//! malformed entries end up in a [`SiteReport`] instead of aborting the
//! build.

pub mod compose;
pub mod crosswalk;
pub mod decor;
pub mod monorail_track;
pub mod road_markings;
mod tests;
pub mod types;

pub use compose::{compose_site, road_node, ComposedSite, SiteReport};
pub use crosswalk::stripe_count;
pub use decor::{green_area, ground_plane};
pub use monorail_track::monorail_track;
pub use types::{Footprint, GreenArea, RoadGeometry, RoadKind, RoadSegment};
