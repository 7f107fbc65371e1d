use serde::{Deserialize, Serialize};

use crate::error::CampusError;
use crate::ground::{Axis, GroundPoint};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoadKind {
    MainRoad,
    SubRoad,
    Sidewalk,
    Crosswalk,
    /// Internal campus road without lane markings.
    Driveway,
}

impl RoadKind {
    /// Whether the segment gets a dashed centreline and edge lines.
    pub fn has_lane_markings(self) -> bool {
        matches!(self, RoadKind::MainRoad | RoadKind::SubRoad)
    }

    pub fn surface_color(self) -> u32 {
        match self {
            RoadKind::MainRoad | RoadKind::SubRoad | RoadKind::Crosswalk => 0x444444,
            RoadKind::Driveway => 0x666666,
            RoadKind::Sidewalk => 0xAAAAAA,
        }
    }
}

/// How a road segment's extent is given in the layout table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RoadGeometry {
    /// Axis-aligned rectangle: `size_x` along world X, `size_z` along world Z.
    Centered {
        center: GroundPoint,
        size_x: f32,
        size_z: f32,
    },
    /// Centreline from `start` to `end`; must be parallel to a world axis.
    Endpoints {
        start: GroundPoint,
        end: GroundPoint,
        width: f32,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadSegment {
    pub name: String,
    pub kind: RoadKind,
    pub geometry: RoadGeometry,
}

impl RoadSegment {
    pub fn centered(name: &str, kind: RoadKind, x: f32, z: f32, size_x: f32, size_z: f32) -> Self {
        Self {
            name: name.to_string(),
            kind,
            geometry: RoadGeometry::Centered {
                center: GroundPoint::new(x, z),
                size_x,
                size_z,
            },
        }
    }

    pub fn between(name: &str, kind: RoadKind, start: GroundPoint, end: GroundPoint, width: f32) -> Self {
        Self {
            name: name.to_string(),
            kind,
            geometry: RoadGeometry::Endpoints { start, end, width },
        }
    }

    /// Resolve the segment to an axis-aligned footprint.
    pub fn footprint(&self) -> Result<Footprint, CampusError> {
        let footprint = match self.geometry {
            RoadGeometry::Centered {
                center,
                size_x,
                size_z,
            } => Footprint {
                center,
                size_x,
                size_z,
            },
            RoadGeometry::Endpoints { start, end, width } => {
                let dx = end.x - start.x;
                let dz = end.z - start.z;
                if dx != 0.0 && dz != 0.0 {
                    return Err(CampusError::invalid(
                        &self.name,
                        "endpoints must be aligned with the X or Z axis",
                    ));
                }
                let center = GroundPoint::new((start.x + end.x) / 2.0, (start.z + end.z) / 2.0);
                if dx != 0.0 {
                    Footprint {
                        center,
                        size_x: dx.abs(),
                        size_z: width,
                    }
                } else {
                    Footprint {
                        center,
                        size_x: width,
                        size_z: dz.abs(),
                    }
                }
            }
        };

        if !footprint.center.is_finite() {
            return Err(CampusError::invalid(&self.name, "centre is not finite"));
        }
        for (label, value) in [("size x", footprint.size_x), ("size z", footprint.size_z)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(CampusError::invalid(
                    &self.name,
                    format!("{label} must be positive, got {value}"),
                ));
            }
        }
        Ok(footprint)
    }
}

/// Axis-aligned rectangle on the ground plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Footprint {
    pub center: GroundPoint,
    pub size_x: f32,
    pub size_z: f32,
}

impl Footprint {
    /// Axis the segment runs along. Ties count as east–west.
    pub fn long_axis(&self) -> Axis {
        if self.size_x >= self.size_z {
            Axis::X
        } else {
            Axis::Z
        }
    }

    pub fn extent(&self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.size_x,
            Axis::Z => self.size_z,
        }
    }

    pub fn length(&self) -> f32 {
        self.extent(self.long_axis())
    }

    pub fn width(&self) -> f32 {
        self.extent(self.long_axis().other())
    }
}

/// Flat grass patch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GreenArea {
    pub name: String,
    pub center: GroundPoint,
    pub size_x: f32,
    pub size_z: f32,
}
