//! The transit animator: owns every live agent and advances them once per
//! host tick.
//!
//! Respawns are countdown entries in `pending` rather than deferred
//! callbacks; each tick decrements them and spawns the ones that expire.
//! All randomness comes from the RNG passed into [`TransitAnimator::new`]
//! and [`TransitAnimator::tick`].

use bevy::prelude::*;
use rand::Rng;

use crate::config::{
    PEDESTRIAN_RESPAWN_DELAY, PEDESTRIAN_RESPAWN_PROBABILITY, PEDESTRIAN_SPAWN_JITTER,
    PEDESTRIAN_SPAWN_STAGGER, VEHICLE_RESPAWN_DELAY, VEHICLE_SEED_SPACING,
};
use crate::error::CampusError;

use super::monorail::MonorailCar;
use super::pedestrians::Pedestrian;
use super::types::{AgentId, AgentKind, AgentPose, TransitConfig, VehiclePolicy};
use super::vehicles::{jittered_speed, random_car_color, RoadVehicle, VehicleStep};

/// An agent waiting to enter the scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpawnRequest {
    Pedestrian { walkway: usize },
    Vehicle { lane: usize },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingSpawn {
    pub request: SpawnRequest,
    /// Seconds left before the spawn happens.
    pub remaining: f32,
}

/// Read-only snapshot of one live agent, for renderers and UI.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgentView {
    pub id: AgentId,
    pub kind: AgentKind,
    pub pose: AgentPose,
    /// Body colour for vehicles; `None` for the other kinds.
    pub color: Option<u32>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransitStats {
    pub pedestrians_spawned: u32,
    pub pedestrians_arrived: u32,
    pub vehicles_spawned: u32,
    pub vehicles_exited: u32,
    pub rejected_spawns: u32,
}

#[derive(Resource, Debug, Default)]
pub struct TransitAnimator {
    config: TransitConfig,
    monorail: Option<MonorailCar>,
    vehicles: Vec<RoadVehicle>,
    pedestrians: Vec<Pedestrian>,
    pending: Vec<PendingSpawn>,
    /// Indices of walkways that passed validation; pedestrian spawns only
    /// draw from these.
    valid_walkways: Vec<usize>,
    next_id: u32,
    stopped: bool,
    elapsed: f32,
    stats: TransitStats,
}

impl TransitAnimator {
    /// Seed the monorail, the vehicle pool and the pedestrian spawn schedule.
    ///
    /// Invalid routes, lanes and walkways are logged and left out; the rest
    /// of the system still starts. An unusable respawn density falls back to
    /// [`VehiclePolicy::Wraparound`].
    pub fn new(config: TransitConfig, rng: &mut impl Rng) -> Self {
        let mut animator = Self {
            config,
            ..Default::default()
        };

        if let Err(err) = animator.config.vehicle_policy.validate() {
            warn!("Transit: {err}; vehicles wrap around instead");
            animator.config.vehicle_policy = VehiclePolicy::Wraparound;
        }

        if let Some(route) = animator.config.monorail.clone() {
            let id = animator.allocate_id();
            match MonorailCar::new(id, route) {
                Ok(car) => animator.monorail = Some(car),
                Err(err) => animator.reject(err),
            }
        }

        let valid_lanes: Vec<usize> = animator
            .config
            .lanes
            .iter()
            .enumerate()
            .filter_map(|(i, lane)| match lane.validate() {
                Ok(()) => Some(i),
                Err(err) => {
                    warn!("Transit: {err}");
                    None
                }
            })
            .collect();
        if !valid_lanes.is_empty() {
            for i in 0..animator.config.vehicle_count as usize {
                let lane_index = valid_lanes[i % valid_lanes.len()];
                let lane = &animator.config.lanes[lane_index];
                let start = lane.wrap(lane.entry() + lane.direction * i as f32 * VEHICLE_SEED_SPACING);
                animator.insert_vehicle(lane_index, start, rng);
            }
        }

        animator.valid_walkways = animator
            .config
            .walkways
            .iter()
            .enumerate()
            .filter_map(|(i, walkway)| match walkway.validate() {
                Ok(()) => Some(i),
                Err(err) => {
                    warn!("Transit: {err}");
                    None
                }
            })
            .collect();
        if !animator.valid_walkways.is_empty() {
            for i in 0..animator.config.pedestrian_count {
                let walkway = animator.pick_walkway(rng);
                let delay =
                    i as f32 * PEDESTRIAN_SPAWN_STAGGER + rng.gen_range(0.0..PEDESTRIAN_SPAWN_JITTER);
                animator.schedule(SpawnRequest::Pedestrian { walkway }, delay);
            }
        }

        info!(
            "Transit animator ready: monorail={}, vehicles={}, pending pedestrians={}",
            animator.monorail.is_some(),
            animator.vehicles.len(),
            animator.pending.len()
        );
        animator
    }

    // -------------------------------------------------------------------------
    // Tick
    // -------------------------------------------------------------------------

    /// Advance every live agent by `dt` seconds, then run due spawns.
    ///
    /// Non-finite or non-positive `dt` is ignored, and so is every tick
    /// after [`stop`](Self::stop).
    pub fn tick(&mut self, dt: f32, rng: &mut impl Rng) {
        if self.stopped || !dt.is_finite() || dt <= 0.0 {
            return;
        }
        self.elapsed += dt;

        if let Some(car) = self.monorail.as_mut() {
            car.advance(dt);
        }

        self.advance_vehicles(dt, rng);
        self.advance_pedestrians(dt, rng);
        self.run_pending(dt, rng);
    }

    fn advance_vehicles(&mut self, dt: f32, rng: &mut impl Rng) {
        let policy = self.config.vehicle_policy;
        let lanes = &self.config.lanes;
        let mut exited = Vec::new();
        self.vehicles.retain_mut(|vehicle| {
            match vehicle.advance(&lanes[vehicle.lane], dt, policy) {
                VehicleStep::Moved => true,
                VehicleStep::Exited => {
                    exited.push(vehicle.lane);
                    false
                }
            }
        });

        if let VehiclePolicy::Respawn { density } = policy {
            for lane in exited {
                self.stats.vehicles_exited += 1;
                if rng.gen_bool(density) {
                    let delay = rng.gen_range(VEHICLE_RESPAWN_DELAY.0..VEHICLE_RESPAWN_DELAY.1);
                    self.schedule(SpawnRequest::Vehicle { lane }, delay);
                }
            }
        }
    }

    fn advance_pedestrians(&mut self, dt: f32, rng: &mut impl Rng) {
        let mut arrived = 0;
        self.pedestrians.retain_mut(|p| {
            let done = p.advance(dt);
            if done {
                arrived += 1;
            }
            !done
        });

        self.stats.pedestrians_arrived += arrived;
        if self.valid_walkways.is_empty() {
            return;
        }
        for _ in 0..arrived {
            if rng.gen_bool(PEDESTRIAN_RESPAWN_PROBABILITY) {
                let walkway = self.pick_walkway(rng);
                let delay = rng.gen_range(PEDESTRIAN_RESPAWN_DELAY.0..PEDESTRIAN_RESPAWN_DELAY.1);
                self.schedule(SpawnRequest::Pedestrian { walkway }, delay);
            }
        }
    }

    /// Caller guarantees at least one valid walkway.
    fn pick_walkway(&self, rng: &mut impl Rng) -> usize {
        self.valid_walkways[rng.gen_range(0..self.valid_walkways.len())]
    }

    fn run_pending(&mut self, dt: f32, rng: &mut impl Rng) {
        let mut due = Vec::new();
        self.pending.retain_mut(|entry| {
            entry.remaining -= dt;
            if entry.remaining <= 0.0 {
                due.push(entry.request);
                false
            } else {
                true
            }
        });

        for request in due {
            let result = match request {
                SpawnRequest::Pedestrian { walkway } => self.spawn_pedestrian(walkway, rng),
                SpawnRequest::Vehicle { lane } => self.spawn_vehicle(lane, rng),
            };
            if let Err(err) = result {
                self.reject(err);
            }
        }
    }

    // -------------------------------------------------------------------------
    // Spawning and disposal
    // -------------------------------------------------------------------------

    /// Put a new pedestrian at the start of walkway `walkway`.
    pub fn spawn_pedestrian(&mut self, walkway: usize, rng: &mut impl Rng) -> Result<AgentId, CampusError> {
        let path = self
            .config
            .walkways
            .get(walkway)
            .ok_or_else(|| CampusError::invalid(format!("walkway {walkway}"), "no such walkway"))?;
        let speed = self.config.pedestrian_speed();
        let pedestrian = Pedestrian::spawn(AgentId(self.next_id), walkway, path, speed, rng)?;
        let id = self.allocate_id();
        self.pedestrians.push(pedestrian);
        self.stats.pedestrians_spawned += 1;
        Ok(id)
    }

    /// Put a new vehicle at the entry end of lane `lane`.
    pub fn spawn_vehicle(&mut self, lane: usize, rng: &mut impl Rng) -> Result<AgentId, CampusError> {
        let entry = {
            let l = self
                .config
                .lanes
                .get(lane)
                .ok_or_else(|| CampusError::invalid(format!("lane {lane}"), "no such lane"))?;
            l.validate()?;
            l.entry()
        };
        Ok(self.insert_vehicle(lane, entry, rng))
    }

    fn insert_vehicle(&mut self, lane: usize, position: f32, rng: &mut impl Rng) -> AgentId {
        let id = self.allocate_id();
        let speed = jittered_speed(self.config.vehicle_speed(), rng);
        self.vehicles.push(RoadVehicle {
            id,
            lane,
            position,
            speed,
            color: random_car_color(rng),
        });
        self.stats.vehicles_spawned += 1;
        id
    }

    pub fn schedule(&mut self, request: SpawnRequest, delay: f32) {
        self.pending.push(PendingSpawn {
            request,
            remaining: delay,
        });
    }

    /// Remove one agent immediately. Returns `false` if it was not live.
    pub fn dispose(&mut self, id: AgentId) -> bool {
        if self.monorail.as_ref().is_some_and(|car| car.id == id) {
            self.monorail = None;
            return true;
        }
        let before = self.vehicles.len() + self.pedestrians.len();
        self.vehicles.retain(|v| v.id != id);
        self.pedestrians.retain(|p| p.id != id);
        before != self.vehicles.len() + self.pedestrians.len()
    }

    /// Freeze the animator: ticks become no-ops and pending spawns are dropped.
    pub fn stop(&mut self) {
        self.stopped = true;
        self.pending.clear();
    }

    fn allocate_id(&mut self) -> AgentId {
        let id = AgentId(self.next_id);
        self.next_id += 1;
        id
    }

    fn reject(&mut self, err: CampusError) {
        warn!("Transit spawn rejected: {err}");
        self.stats.rejected_spawns += 1;
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    /// Every live agent in a stable order: monorail, vehicles, pedestrians.
    pub fn agents(&self) -> impl Iterator<Item = AgentView> + '_ {
        let lanes = &self.config.lanes;
        let monorail = self.monorail.iter().map(|car| AgentView {
            id: car.id,
            kind: AgentKind::Monorail,
            pose: car.pose(),
            color: None,
        });
        let vehicles = self.vehicles.iter().map(move |v| AgentView {
            id: v.id,
            kind: AgentKind::Vehicle,
            pose: v.pose(&lanes[v.lane]),
            color: Some(v.color),
        });
        let pedestrians = self.pedestrians.iter().map(|p| AgentView {
            id: p.id,
            kind: AgentKind::Pedestrian,
            pose: p.pose(),
            color: None,
        });
        monorail.chain(vehicles).chain(pedestrians)
    }

    pub fn agent(&self, id: AgentId) -> Option<AgentView> {
        self.agents().find(|a| a.id == id)
    }

    pub fn live_count(&self) -> usize {
        usize::from(self.monorail.is_some()) + self.vehicles.len() + self.pedestrians.len()
    }

    pub fn monorail(&self) -> Option<&MonorailCar> {
        self.monorail.as_ref()
    }

    pub fn vehicles(&self) -> &[RoadVehicle] {
        &self.vehicles
    }

    pub fn pedestrians(&self) -> &[Pedestrian] {
        &self.pedestrians
    }

    pub fn pending(&self) -> &[PendingSpawn] {
        &self.pending
    }

    pub fn config(&self) -> &TransitConfig {
        &self.config
    }

    pub fn stats(&self) -> TransitStats {
        self.stats
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }
}
