//! Building specifications as they appear in the layout tables.

use serde::{Deserialize, Serialize};

use crate::ground::GroundPoint;

/// One rectangular volume of a composite building.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub width: f32,
    pub height: f32,
    pub depth: f32,
    /// Offset of the section footprint centre from the building base position.
    #[serde(default)]
    pub offset: GroundPoint,
}

impl Section {
    pub fn new(width: f32, height: f32, depth: f32) -> Self {
        Self {
            width,
            height,
            depth,
            offset: GroundPoint::default(),
        }
    }

    pub fn offset_by(mut self, x: f32, z: f32) -> Self {
        self.offset = GroundPoint::new(x, z);
        self
    }

    /// Reject sections that would produce a zero-size or non-finite mesh.
    pub fn validate(&self) -> Result<(), String> {
        for (label, value) in [
            ("width", self.width),
            ("height", self.height),
            ("depth", self.depth),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(format!("{label} must be positive, got {value}"));
            }
        }
        if !self.offset.is_finite() {
            return Err("offset is not finite".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingSpec {
    pub name: String,
    /// Text shown in the info panel when the building is clicked.
    #[serde(default)]
    pub info: String,
    pub position: GroundPoint,
    pub sections: Vec<Section>,
    pub floors: u32,
    /// Facade colour as `0xRRGGBB`.
    pub color: u32,
    #[serde(default)]
    pub ground_floor_glass: bool,
}

impl BuildingSpec {
    /// Single-section building, the common case in the layout tables.
    #[allow(clippy::too_many_arguments)]
    pub fn single(
        name: &str,
        x: f32,
        z: f32,
        width: f32,
        height: f32,
        depth: f32,
        floors: u32,
        color: u32,
    ) -> Self {
        Self {
            name: name.to_string(),
            info: String::new(),
            position: GroundPoint::new(x, z),
            sections: vec![Section::new(width, height, depth)],
            floors,
            color,
            ground_floor_glass: false,
        }
    }

    pub fn composite(name: &str, x: f32, z: f32, sections: Vec<Section>, floors: u32, color: u32) -> Self {
        Self {
            name: name.to_string(),
            info: String::new(),
            position: GroundPoint::new(x, z),
            sections,
            floors,
            color,
            ground_floor_glass: false,
        }
    }

    pub fn with_info(mut self, info: &str) -> Self {
        self.info = info.to_string();
        self
    }

    pub fn with_glass_ground_floor(mut self) -> Self {
        self.ground_floor_glass = true;
        self
    }
}

/// Open multi-storey car park: a box with dark opening slabs on its long face.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParkingSpec {
    pub name: String,
    pub position: GroundPoint,
    pub width: f32,
    pub height: f32,
    pub depth: f32,
}
