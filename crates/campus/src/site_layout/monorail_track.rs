//! Elevated monorail structure: pillars, guideway and station.
//!
//! Built from the same [`MonorailRoute`] the animator follows, so the car
//! always runs on top of the guideway.

use std::f32::consts::{PI, TAU};

use bevy::prelude::*;

use crate::config::{
    MONORAIL_GUIDEWAY_OFFSET, MONORAIL_GUIDEWAY_SEGMENTS, MONORAIL_PILLAR_COUNT,
};
use crate::scene_graph::{NodeTag, SceneNode, Shape, SurfaceMaterial};
use crate::transit::MonorailRoute;

const PILLAR_RADIUS: f32 = 2.0;
const BASE_RADIUS: f32 = 3.0;
const BASE_HEIGHT: f32 = 2.0;
const GUIDEWAY_SEGMENT: (f32, f32, f32) = (3.0, 1.0, 8.0);

fn concrete() -> SurfaceMaterial {
    SurfaceMaterial::hex(0xF5F5DC)
}

pub fn monorail_track(route: &MonorailRoute) -> SceneNode {
    let mut track = SceneNode::group("monorail-track", NodeTag::MonorailTrack);

    for i in 0..MONORAIL_PILLAR_COUNT {
        let angle = i as f32 / MONORAIL_PILLAR_COUNT as f32 * TAU;
        let foot = route.position(angle).with_y(0.0);
        track.push(
            SceneNode::new(
                format!("monorail-track/pillar-{i}"),
                NodeTag::Decor,
                Shape::Cylinder {
                    radius: PILLAR_RADIUS,
                    height: route.height,
                },
            )
            .at(foot.with_y(route.height / 2.0))
            .with_material(concrete()),
        );
        track.push(
            SceneNode::new(
                format!("monorail-track/base-{i}"),
                NodeTag::Decor,
                Shape::Cylinder {
                    radius: BASE_RADIUS,
                    height: BASE_HEIGHT,
                },
            )
            .at(foot.with_y(BASE_HEIGHT / 2.0))
            .with_material(SurfaceMaterial::hex(0xD3D3D3)),
        );
    }

    let guideway = MonorailRoute {
        radius_x: route.radius_x + MONORAIL_GUIDEWAY_OFFSET,
        radius_z: route.radius_z + MONORAIL_GUIDEWAY_OFFSET,
        ..route.clone()
    };
    let (w, h, d) = GUIDEWAY_SEGMENT;
    for i in 0..MONORAIL_GUIDEWAY_SEGMENTS {
        let angle = i as f32 / MONORAIL_GUIDEWAY_SEGMENTS as f32 * TAU;
        let t = guideway.tangent(angle);
        // The segment's long side is its local Z; turn it onto the tangent.
        let yaw = t.x.atan2(t.z);
        track.push(
            SceneNode::new(
                format!("monorail-track/guideway-{i}"),
                NodeTag::Decor,
                Shape::Box {
                    width: w,
                    height: h,
                    depth: d,
                },
            )
            .at(guideway.position(angle))
            .rotated_y(yaw)
            .with_material(concrete()),
        );
    }

    if let Some(station) = route.station {
        track.push(monorail_station(
            station.at_height(route.height),
            route.station_name.as_deref(),
        ));
    }

    track
}

/// Platform slab just above the track with a roof overhead and, when the
/// station is named, a sign board facing -Z.
fn monorail_station(at: Vec3, name: Option<&str>) -> SceneNode {
    let mut station = SceneNode::group("monorail-station", NodeTag::Station)
        .at(at)
        .with_child(
            SceneNode::new(
                "monorail-station/platform",
                NodeTag::Decor,
                Shape::Box {
                    width: 25.0,
                    height: 1.0,
                    depth: 8.0,
                },
            )
            .at(Vec3::new(0.0, 0.5, 0.0))
            .with_material(SurfaceMaterial::hex(0xF0F0F0)),
        )
        .with_child(
            SceneNode::new(
                "monorail-station/roof",
                NodeTag::Decor,
                Shape::Box {
                    width: 30.0,
                    height: 0.5,
                    depth: 12.0,
                },
            )
            .at(Vec3::new(0.0, 4.0, 0.0))
            .with_material(SurfaceMaterial::hex(0x4169E1)),
        );

    if let Some(name) = name {
        station.push(
            SceneNode::new(
                "monorail-station/sign",
                NodeTag::Sign,
                Shape::Quad {
                    width: 8.0,
                    height: 1.5,
                },
            )
            .at(Vec3::new(0.0, 2.0, 5.0))
            .rotated_y(PI)
            .with_material(SurfaceMaterial::hex(0xFFFFFF))
            .labeled(name),
        );
    }
    station
}
