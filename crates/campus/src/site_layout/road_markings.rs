//! Lane-marking quads for marked road segments.
//!
//! Markings are emitted in the road group's local frame (origin at the
//! footprint centre). Everything runs along the footprint's long axis, so
//! the same code handles east–west and north–south segments.

use bevy::prelude::*;

use crate::config::{
    DASH_LENGTH, DASH_PITCH, DASH_WIDTH, EDGE_LINE_INSET, EDGE_LINE_LENGTH_FACTOR,
    EDGE_LINE_WIDTH, Y_MARKING,
};
use crate::ground::Axis;
use crate::scene_graph::{NodeTag, SceneNode, Shape, SurfaceMaterial};

use super::types::Footprint;

// ---------------------------------------------------------------------------
// Placement helpers
// ---------------------------------------------------------------------------

/// Flat quad of `along` × `across` at local offset (`u` along the long
/// axis, `v` across it).
#[allow(clippy::too_many_arguments)]
pub(crate) fn marking_quad(
    name: String,
    tag: NodeTag,
    long_axis: Axis,
    along: f32,
    across: f32,
    u: f32,
    v: f32,
    material: SurfaceMaterial,
) -> SceneNode {
    let (width, height, position) = match long_axis {
        Axis::X => (along, across, Vec3::new(u, Y_MARKING, v)),
        Axis::Z => (across, along, Vec3::new(v, Y_MARKING, u)),
    };
    SceneNode::new(name, tag, Shape::Quad { width, height })
        .at(position)
        .flat()
        .with_material(material)
}

/// Centres of the centreline dashes along a segment of `length`.
pub fn dash_centers(length: f32) -> impl Iterator<Item = f32> {
    let count = (length / DASH_PITCH).floor().max(0.0) as u32;
    (0..count).map(move |i| -length / 2.0 + DASH_PITCH / 2.0 + i as f32 * DASH_PITCH)
}

pub fn marking_material() -> SurfaceMaterial {
    SurfaceMaterial::hex(0xFFFFFF).unlit()
}

// ---------------------------------------------------------------------------
// Road markings
// ---------------------------------------------------------------------------

/// Dashed centreline plus two solid edge lines inset from the long edges.
pub fn lane_markings(road_name: &str, footprint: &Footprint) -> Vec<SceneNode> {
    let axis = footprint.long_axis();
    let length = footprint.length();
    let half_width = footprint.width() / 2.0;
    let material = marking_material();

    let mut quads: Vec<SceneNode> = dash_centers(length)
        .enumerate()
        .map(|(i, u)| {
            marking_quad(
                format!("{road_name}/dash-{i}"),
                NodeTag::CenterDash,
                axis,
                DASH_LENGTH,
                DASH_WIDTH,
                u,
                0.0,
                material,
            )
        })
        .collect();

    let inset = (half_width - EDGE_LINE_INSET).max(0.0);
    for (side, v) in [("left", -inset), ("right", inset)] {
        quads.push(marking_quad(
            format!("{road_name}/edge-{side}"),
            NodeTag::EdgeLine,
            axis,
            length * EDGE_LINE_LENGTH_FACTOR,
            EDGE_LINE_WIDTH,
            0.0,
            v,
            material,
        ));
    }

    quads
}
