use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::{kmh_to_ms, MIN_PATH_LENGTH};
use crate::error::CampusError;
use crate::ground::{Axis, GroundPoint};

// =============================================================================
// Agent identity and pose
// =============================================================================

/// Unique identifier of a live transit agent. Never reused within one animator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AgentId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AgentKind {
    Monorail,
    Vehicle,
    Pedestrian,
}

/// World placement of an agent. `heading` is a yaw in radians chosen so the
/// agent's local +X axis points along its direction of travel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgentPose {
    pub translation: Vec3,
    pub heading: f32,
}

impl AgentPose {
    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.translation).with_rotation(Quat::from_rotation_y(self.heading))
    }

    pub fn is_finite(&self) -> bool {
        self.translation.is_finite() && self.heading.is_finite()
    }
}

/// Yaw that turns local +X onto the horizontal direction `dir`.
pub fn heading_from_direction(dir: Vec3) -> f32 {
    (-dir.z).atan2(dir.x)
}

// =============================================================================
// Routes
// =============================================================================

/// Closed elliptical monorail loop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonorailRoute {
    pub center: GroundPoint,
    pub radius_x: f32,
    pub radius_z: f32,
    pub height: f32,
    pub speed: f32,
    /// +1 or -1.
    pub direction: f32,
    /// Where the station platform stands, if any.
    #[serde(default)]
    pub station: Option<GroundPoint>,
    /// Text on the station sign.
    #[serde(default)]
    pub station_name: Option<String>,
}

impl MonorailRoute {
    pub fn position(&self, angle: f32) -> Vec3 {
        Vec3::new(
            self.center.x + self.radius_x * angle.cos(),
            self.height,
            self.center.z + self.radius_z * angle.sin(),
        )
    }

    /// Derivative of [`position`](Self::position) with respect to the angle.
    pub fn tangent(&self, angle: f32) -> Vec3 {
        Vec3::new(-self.radius_x * angle.sin(), 0.0, self.radius_z * angle.cos())
    }

    pub fn validate(&self) -> Result<(), CampusError> {
        if !(self.radius_x > 0.0 && self.radius_z > 0.0) {
            return Err(CampusError::invalid("monorail", "radii must be positive"));
        }
        if !self.center.is_finite() || !self.height.is_finite() || !self.speed.is_finite() {
            return Err(CampusError::invalid("monorail", "route parameters must be finite"));
        }
        if self.direction != 1.0 && self.direction != -1.0 {
            return Err(CampusError::invalid("monorail", "direction must be +1 or -1"));
        }
        Ok(())
    }
}

/// Straight traffic lane along one world axis. Vehicles move between `min`
/// and `max` on `axis` while the other coordinate stays at `offset`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleLane {
    pub name: String,
    pub axis: Axis,
    pub offset: f32,
    pub min: f32,
    pub max: f32,
    /// +1 or -1 along `axis`.
    pub direction: f32,
}

impl VehicleLane {
    pub fn length(&self) -> f32 {
        self.max - self.min
    }

    /// Map any coordinate back into `[min, max)`, keeping the overshoot.
    pub fn wrap(&self, p: f32) -> f32 {
        self.min + (p - self.min).rem_euclid(self.length())
    }

    pub fn point(&self, p: f32, y: f32) -> Vec3 {
        match self.axis {
            Axis::X => Vec3::new(p, y, self.offset),
            Axis::Z => Vec3::new(self.offset, y, p),
        }
    }

    pub fn heading(&self) -> f32 {
        heading_from_direction(self.axis.unit() * self.direction)
    }

    /// Where a vehicle enters the lane.
    pub fn entry(&self) -> f32 {
        if self.direction > 0.0 {
            self.min
        } else {
            self.max
        }
    }

    pub fn validate(&self) -> Result<(), CampusError> {
        if !(self.min.is_finite() && self.max.is_finite() && self.offset.is_finite()) {
            return Err(CampusError::invalid(&self.name, "lane bounds must be finite"));
        }
        if self.length() < MIN_PATH_LENGTH {
            return Err(CampusError::invalid(&self.name, "lane has zero length"));
        }
        if self.direction != 1.0 && self.direction != -1.0 {
            return Err(CampusError::invalid(&self.name, "direction must be +1 or -1"));
        }
        Ok(())
    }
}

/// Straight pedestrian path walked from `start` to `end`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Walkway {
    pub name: String,
    pub start: GroundPoint,
    pub end: GroundPoint,
}

impl Walkway {
    pub fn length(&self) -> f32 {
        self.start.at_height(0.0).distance(self.end.at_height(0.0))
    }

    pub fn validate(&self) -> Result<(), CampusError> {
        if !self.start.is_finite() || !self.end.is_finite() {
            return Err(CampusError::invalid(&self.name, "walkway endpoints must be finite"));
        }
        if self.length() < MIN_PATH_LENGTH {
            return Err(CampusError::invalid(&self.name, "walkway has zero length"));
        }
        Ok(())
    }
}

// =============================================================================
// Configuration
// =============================================================================

/// What happens when a vehicle reaches the end of its lane.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub enum VehiclePolicy {
    /// Reappear at the opposite boundary carrying the overshoot.
    #[default]
    Wraparound,
    /// Disappear, then with probability `density` a new vehicle enters the
    /// same lane after a random delay.
    Respawn { density: f64 },
}

impl VehiclePolicy {
    /// A respawn density must be a probability.
    pub fn validate(&self) -> Result<(), CampusError> {
        match *self {
            VehiclePolicy::Respawn { density } if !(0.0..=1.0).contains(&density) => Err(
                CampusError::invalid("vehicle policy", format!("respawn density {density} is not in [0, 1]")),
            ),
            _ => Ok(()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransitConfig {
    #[serde(default)]
    pub monorail: Option<MonorailRoute>,
    #[serde(default)]
    pub lanes: Vec<VehicleLane>,
    /// Total vehicles seeded round-robin across the lanes.
    #[serde(default)]
    pub vehicle_count: u32,
    pub vehicle_speed_kmh: f32,
    #[serde(default)]
    pub vehicle_policy: VehiclePolicy,
    #[serde(default)]
    pub walkways: Vec<Walkway>,
    /// Target pedestrian population spawned on a staggered schedule.
    #[serde(default)]
    pub pedestrian_count: u32,
    pub pedestrian_speed_kmh: f32,
}

impl TransitConfig {
    pub fn vehicle_speed(&self) -> f32 {
        kmh_to_ms(self.vehicle_speed_kmh)
    }

    pub fn pedestrian_speed(&self) -> f32 {
        kmh_to_ms(self.pedestrian_speed_kmh)
    }
}
