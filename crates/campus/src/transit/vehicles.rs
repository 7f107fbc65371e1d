use rand::Rng;

use crate::config::VEHICLE_SPEED_JITTER;

use super::types::{AgentId, AgentPose, VehicleLane, VehiclePolicy};

/// Body colours picked at random for each car.
pub const CAR_PALETTE: [u32; 8] = [
    0xFF0000, 0x00FF00, 0x0000FF, 0xFFFF00, 0xFF00FF, 0x00FFFF, 0xFFFFFF, 0x000000,
];

/// Cars ride with their origin this far above the road.
pub const VEHICLE_RIDE_HEIGHT: f32 = 1.0;

#[derive(Debug, Clone, PartialEq)]
pub struct RoadVehicle {
    pub id: AgentId,
    /// Index into the animator's lane list.
    pub lane: usize,
    /// Coordinate along the lane axis.
    pub position: f32,
    /// Metres per second, always positive; direction comes from the lane.
    pub speed: f32,
    pub color: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VehicleStep {
    Moved,
    /// Left the lane under [`VehiclePolicy::Respawn`]; the caller removes it.
    Exited,
}

/// Base speed scaled by a uniform factor in `1 ± VEHICLE_SPEED_JITTER`.
pub fn jittered_speed(base: f32, rng: &mut impl Rng) -> f32 {
    base * rng.gen_range(1.0 - VEHICLE_SPEED_JITTER..=1.0 + VEHICLE_SPEED_JITTER)
}

pub fn random_car_color(rng: &mut impl Rng) -> u32 {
    CAR_PALETTE[rng.gen_range(0..CAR_PALETTE.len())]
}

impl RoadVehicle {
    pub fn advance(&mut self, lane: &VehicleLane, dt: f32, policy: VehiclePolicy) -> VehicleStep {
        let next = self.position + self.speed * lane.direction * dt;
        match policy {
            VehiclePolicy::Wraparound => {
                self.position = lane.wrap(next);
                VehicleStep::Moved
            }
            VehiclePolicy::Respawn { .. } => {
                self.position = next.clamp(lane.min, lane.max);
                if next < lane.min || next > lane.max {
                    VehicleStep::Exited
                } else {
                    VehicleStep::Moved
                }
            }
        }
    }

    pub fn pose(&self, lane: &VehicleLane) -> AgentPose {
        AgentPose {
            translation: lane.point(self.position, VEHICLE_RIDE_HEIGHT),
            heading: lane.heading(),
        }
    }
}
