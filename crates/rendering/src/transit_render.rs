//! Keeps one visual per live transit agent.
//!
//! Runs in `CampusSet::Visual`, after the animator has ticked, so the frame
//! always shows this tick's poses. New agents get a visual spawned from
//! `agent_visual`; disposed agents lose theirs.

use std::collections::HashSet;

use bevy::prelude::*;

use campus::transit::{agent_visual, AgentId};
use campus::{SceneContext, TransitAnimator};

use crate::scene_spawn::{MeshCache, NodeSpawner};

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgentVisual(pub AgentId);

pub fn sync_agent_visuals(
    mut commands: Commands,
    animator: Res<TransitAnimator>,
    mut context: ResMut<SceneContext>,
    mut cache: ResMut<MeshCache>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut transforms: Query<&mut Transform, With<AgentVisual>>,
) {
    let mut spawner = NodeSpawner::new(&mut cache, &mut meshes, &mut materials);
    let mut live = HashSet::new();

    for view in animator.agents() {
        live.insert(view.id);
        let pose = view.pose.transform();
        match context.agent(view.id) {
            Some(entity) => {
                if let Ok(mut transform) = transforms.get_mut(entity) {
                    *transform = pose;
                }
            }
            None => {
                let mut node = agent_visual(&view);
                node.transform = pose;
                let entity = spawner.spawn(&mut commands, &node, None);
                commands.entity(entity).insert(AgentVisual(view.id));
                context.register_agent(view.id, entity);
            }
        }
    }

    let gone: Vec<AgentId> = context.agent_ids().filter(|id| !live.contains(id)).collect();
    for id in gone {
        if let Some(entity) = context.remove_agent(id) {
            commands.entity(entity).despawn_recursive();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use campus::test_harness::TestCampus;

    fn campus_with_visuals() -> TestCampus {
        let mut campus = TestCampus::ariake();
        let app = campus.app_mut();
        app.init_resource::<Assets<Mesh>>()
            .init_resource::<Assets<StandardMaterial>>()
            .init_resource::<MeshCache>()
            .add_systems(Update, sync_agent_visuals.in_set(campus::CampusSet::Visual));
        campus
    }

    #[test]
    fn test_every_live_agent_has_a_visual() {
        let mut campus = campus_with_visuals();
        campus.tick(30);
        let live = campus.live_agents();
        assert_eq!(campus.resource::<SceneContext>().agent_count(), live);
    }

    #[test]
    fn test_visual_follows_agent_pose() {
        let mut campus = campus_with_visuals();
        campus.tick(10);
        let world = campus.world_mut();
        let animator = world.resource::<TransitAnimator>();
        let monorail = animator.agents().next().unwrap();
        let entity = world.resource::<SceneContext>().agent(monorail.id).unwrap();
        let transform = world.get::<Transform>(entity).unwrap();
        assert!((transform.translation - monorail.pose.translation).length() < 1e-4);
    }

    #[test]
    fn test_disposed_agent_loses_its_visual() {
        let mut campus = campus_with_visuals();
        campus.tick(2);
        let id = campus.animator().agents().next().unwrap().id;
        let entity = campus.resource::<SceneContext>().agent(id).unwrap();
        campus.world_mut().resource_mut::<TransitAnimator>().dispose(id);
        campus.tick(1);
        assert!(campus.resource::<SceneContext>().agent(id).is_none());
        assert!(!campus.world_mut().entities().contains(entity));
    }
}
