//! Scene nodes for agent bodies, built around the agent origin. The host
//! places the returned root at the agent pose every frame.

use bevy::prelude::*;

use crate::scene_graph::{NodeTag, SceneNode, Shape, SurfaceMaterial};

use super::animator::AgentView;
use super::types::AgentKind;

pub fn agent_visual(agent: &AgentView) -> SceneNode {
    let name = format!("agent-{}", agent.id.0);
    match agent.kind {
        AgentKind::Monorail => monorail_car(name),
        AgentKind::Vehicle => car(name, agent.color.unwrap_or(0xFFFFFF)),
        AgentKind::Pedestrian => pedestrian(name),
    }
}

fn monorail_car(name: String) -> SceneNode {
    let mut root = SceneNode::group(name.clone(), NodeTag::Agent).with_child(
        SceneNode::new(
            format!("{name}/body"),
            NodeTag::Decor,
            Shape::Box {
                width: 12.0,
                height: 3.0,
                depth: 3.0,
            },
        )
        .at(Vec3::new(0.0, 1.5, 0.0))
        .with_material(SurfaceMaterial::hex(0x0066CC).with_pbr(0.3, 0.5)),
    );
    for (i, z) in [1.0_f32, -1.0].into_iter().enumerate() {
        root.push(
            SceneNode::new(
                format!("{name}/headlight-{i}"),
                NodeTag::Decor,
                Shape::Sphere { radius: 0.3 },
            )
            .at(Vec3::new(6.0, 1.5, z))
            .with_material(SurfaceMaterial::hex(0xFFFFFF).with_emissive(0xFFFFFF, 1.0)),
        );
    }
    root
}

fn car(name: String, color: u32) -> SceneNode {
    SceneNode::group(name.clone(), NodeTag::Agent)
        .with_child(
            SceneNode::new(
                format!("{name}/body"),
                NodeTag::Decor,
                Shape::Box {
                    width: 4.0,
                    height: 1.5,
                    depth: 2.0,
                },
            )
            .at(Vec3::new(0.0, -0.25, 0.0))
            .with_material(SurfaceMaterial::hex(color).with_pbr(0.6, 0.4)),
        )
        .with_child(
            SceneNode::new(
                format!("{name}/headlight"),
                NodeTag::Decor,
                Shape::PointLight {
                    intensity: 0.5,
                    range: 10.0,
                },
            )
            .at(Vec3::new(2.0, -0.5, 0.0))
            .with_material(SurfaceMaterial::hex(0xFFFFFF)),
        )
}

fn pedestrian(name: String) -> SceneNode {
    SceneNode::group(name.clone(), NodeTag::Agent)
        .with_child(
            SceneNode::new(
                format!("{name}/body"),
                NodeTag::Decor,
                Shape::Cylinder {
                    radius: 0.3,
                    height: 1.7,
                },
            )
            .at(Vec3::new(0.0, 0.85, 0.0))
            .with_material(SurfaceMaterial::hex(0x4A4A8A)),
        )
        .with_child(
            SceneNode::new(
                format!("{name}/head"),
                NodeTag::Decor,
                Shape::Sphere { radius: 0.15 },
            )
            .at(Vec3::new(0.0, 1.85, 0.0))
            .with_material(SurfaceMaterial::hex(0xFFDBAC)),
        )
}
