use std::f32::consts::TAU;

use crate::config::MONORAIL_ANGULAR_RATE;
use crate::error::CampusError;

use super::types::{heading_from_direction, AgentId, AgentPose, MonorailRoute};

/// The single monorail car circling its elliptical route.
#[derive(Debug, Clone, PartialEq)]
pub struct MonorailCar {
    pub id: AgentId,
    pub route: MonorailRoute,
    /// Position on the ellipse, always in `[0, 2π)`.
    pub angle: f32,
}

impl MonorailCar {
    pub fn new(id: AgentId, route: MonorailRoute) -> Result<Self, CampusError> {
        route.validate()?;
        Ok(Self {
            id,
            route,
            angle: 0.0,
        })
    }

    /// Signed angular velocity in radians per second.
    pub fn angular_velocity(&self) -> f32 {
        self.route.speed * self.route.direction * MONORAIL_ANGULAR_RATE
    }

    /// Seconds for one full lap, or `None` when the car is not moving.
    pub fn lap_seconds(&self) -> Option<f32> {
        let w = self.angular_velocity().abs();
        (w > 0.0).then(|| TAU / w)
    }

    pub fn advance(&mut self, dt: f32) {
        self.set_angle(self.angle + self.angular_velocity() * dt);
    }

    pub fn set_angle(&mut self, angle: f32) {
        let wrapped = angle.rem_euclid(TAU);
        // rem_euclid can round up to exactly TAU for tiny negative inputs.
        self.angle = if wrapped >= TAU { 0.0 } else { wrapped };
    }

    pub fn pose(&self) -> AgentPose {
        let travel = self.route.tangent(self.angle) * self.route.direction;
        AgentPose {
            translation: self.route.position(self.angle),
            heading: heading_from_direction(travel),
        }
    }
}
