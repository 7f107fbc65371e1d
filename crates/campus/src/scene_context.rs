//! Typed handles to host-owned scene objects.
//!
//! The host registers its camera, sun and the entities it spawned for each
//! building and agent here, so nothing has to search the world for them.

use std::collections::HashMap;

use bevy::prelude::*;

use crate::error::CampusError;
use crate::transit::AgentId;

#[derive(Resource, Debug, Default)]
pub struct SceneContext {
    pub camera: Option<Entity>,
    pub sun: Option<Entity>,
    /// Section entities per building name.
    buildings: HashMap<String, Vec<Entity>>,
    /// Root entity of each live agent's visual.
    agents: HashMap<AgentId, Entity>,
}

impl SceneContext {
    pub fn camera(&self) -> Result<Entity, CampusError> {
        self.camera
            .ok_or_else(|| CampusError::MissingHostCapability("camera".to_string()))
    }

    pub fn sun(&self) -> Result<Entity, CampusError> {
        self.sun
            .ok_or_else(|| CampusError::MissingHostCapability("directional light".to_string()))
    }

    pub fn register_section(&mut self, building: &str, entity: Entity) {
        self.buildings
            .entry(building.to_string())
            .or_default()
            .push(entity);
    }

    pub fn sections(&self, building: &str) -> &[Entity] {
        self.buildings
            .get(building)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn building_names(&self) -> impl Iterator<Item = &str> {
        self.buildings.keys().map(String::as_str)
    }

    pub fn register_agent(&mut self, id: AgentId, entity: Entity) {
        self.agents.insert(id, entity);
    }

    pub fn agent(&self, id: AgentId) -> Option<Entity> {
        self.agents.get(&id).copied()
    }

    pub fn remove_agent(&mut self, id: AgentId) -> Option<Entity> {
        self.agents.remove(&id)
    }

    pub fn agent_ids(&self) -> impl Iterator<Item = AgentId> + '_ {
        self.agents.keys().copied()
    }

    pub fn agent_count(&self) -> usize {
        self.agents.len()
    }
}
