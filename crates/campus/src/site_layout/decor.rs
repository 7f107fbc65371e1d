//! Static decor: trees, street lights, grass patches and the base ground.

use bevy::prelude::*;

use crate::config::{GROUND_SIZE, Y_GREEN};
use crate::ground::GroundPoint;
use crate::scene_graph::{NodeTag, SceneNode, Shape, SurfaceMaterial};

use super::types::GreenArea;

const TRUNK_RADIUS: f32 = 0.5;
const TRUNK_HEIGHT: f32 = 4.0;
const CANOPY_RADIUS: f32 = 3.0;
const CANOPY_Y: f32 = 5.0;

const POLE_RADIUS: f32 = 0.15;
const POLE_HEIGHT: f32 = 8.0;
const LAMP_INTENSITY: f32 = 0.3;
const LAMP_RANGE: f32 = 20.0;

/// Trunk cylinder with a canopy sphere on top.
pub fn tree(name: String, at: GroundPoint) -> SceneNode {
    SceneNode::group(name.clone(), NodeTag::Tree)
        .at(at.at_height(0.0))
        .with_child(
            SceneNode::new(
                format!("{name}/trunk"),
                NodeTag::Decor,
                Shape::Cylinder {
                    radius: TRUNK_RADIUS,
                    height: TRUNK_HEIGHT,
                },
            )
            .at(Vec3::new(0.0, TRUNK_HEIGHT / 2.0, 0.0))
            .with_material(SurfaceMaterial::hex(0x8B4513)),
        )
        .with_child(
            SceneNode::new(
                format!("{name}/canopy"),
                NodeTag::Decor,
                Shape::Sphere {
                    radius: CANOPY_RADIUS,
                },
            )
            .at(Vec3::new(0.0, CANOPY_Y, 0.0))
            .with_material(SurfaceMaterial::hex(0x228B22)),
        )
}

/// Pole, glowing lamp head and a point light at the head.
pub fn street_light(name: String, at: GroundPoint) -> SceneNode {
    SceneNode::group(name.clone(), NodeTag::StreetLight)
        .at(at.at_height(0.0))
        .with_child(
            SceneNode::new(
                format!("{name}/pole"),
                NodeTag::Decor,
                Shape::Cylinder {
                    radius: POLE_RADIUS,
                    height: POLE_HEIGHT,
                },
            )
            .at(Vec3::new(0.0, POLE_HEIGHT / 2.0, 0.0))
            .with_material(SurfaceMaterial::hex(0x666666).with_pbr(0.8, 0.4)),
        )
        .with_child(
            SceneNode::new(
                format!("{name}/head"),
                NodeTag::Decor,
                Shape::Box {
                    width: 1.0,
                    height: 0.5,
                    depth: 0.5,
                },
            )
            .at(Vec3::new(0.0, POLE_HEIGHT, 0.0))
            .with_material(SurfaceMaterial::hex(0xFFFF99).with_emissive(0xFFFF99, 0.5)),
        )
        .with_child(
            SceneNode::new(
                format!("{name}/light"),
                NodeTag::Decor,
                Shape::PointLight {
                    intensity: LAMP_INTENSITY,
                    range: LAMP_RANGE,
                },
            )
            .at(Vec3::new(0.0, POLE_HEIGHT - 0.5, 0.0))
            .with_material(SurfaceMaterial::hex(0xFFFFCC)),
        )
}

pub fn green_area(area: &GreenArea) -> SceneNode {
    SceneNode::new(
        &area.name,
        NodeTag::GreenArea,
        Shape::Quad {
            width: area.size_x,
            height: area.size_z,
        },
    )
    .at(area.center.at_height(Y_GREEN))
    .flat()
    .with_material(SurfaceMaterial::hex(0x3A5F3A))
}

pub fn ground_plane() -> SceneNode {
    SceneNode::new(
        "ground",
        NodeTag::Ground,
        Shape::Quad {
            width: GROUND_SIZE,
            height: GROUND_SIZE,
        },
    )
    .flat()
    .with_material(SurfaceMaterial::hex(0x898989))
}
