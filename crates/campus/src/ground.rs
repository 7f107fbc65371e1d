//! Ground-plane coordinates shared by the layout tables.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// A point on the ground plane (world X / world Z).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GroundPoint {
    pub x: f32,
    pub z: f32,
}

impl GroundPoint {
    pub const fn new(x: f32, z: f32) -> Self {
        Self { x, z }
    }

    pub fn at_height(self, y: f32) -> Vec3 {
        Vec3::new(self.x, y, self.z)
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.z.is_finite()
    }
}

/// Horizontal world axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    X,
    Z,
}

impl Axis {
    pub fn unit(self) -> Vec3 {
        match self {
            Axis::X => Vec3::X,
            Axis::Z => Vec3::Z,
        }
    }

    pub fn other(self) -> Axis {
        match self {
            Axis::X => Axis::Z,
            Axis::Z => Axis::X,
        }
    }
}
