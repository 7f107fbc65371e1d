use bevy::prelude::*;

use crate::buildings::{synthesize, BuildingSpec};
use crate::config::{Y_ROAD, Y_SIDEWALK};
use crate::error::CampusError;
use crate::ground::GroundPoint;
use crate::scene_graph::{NodeTag, SceneNode, Shape, SurfaceMaterial};

use super::crosswalk::crosswalk_stripes;
use super::decor::{street_light, tree};
use super::road_markings::lane_markings;
use super::types::{RoadKind, RoadSegment};

/// What a compose pass produced and what it had to leave out.
#[derive(Debug, Default)]
pub struct SiteReport {
    pub buildings: usize,
    pub roads: usize,
    pub lamps: usize,
    pub trees: usize,
    /// Every spec that was skipped, with the reason.
    pub rejected: Vec<CampusError>,
}

impl SiteReport {
    pub fn reject(&mut self, err: CampusError) {
        warn!("Site layout: {err}");
        self.rejected.push(err);
    }
}

#[derive(Debug)]
pub struct ComposedSite {
    pub root: SceneNode,
    pub report: SiteReport,
}

/// One road segment: a surface quad plus whatever markings its kind carries.
pub fn road_node(segment: &RoadSegment) -> Result<SceneNode, CampusError> {
    let footprint = segment.footprint()?;
    let surface_y = match segment.kind {
        RoadKind::Sidewalk => Y_SIDEWALK,
        _ => Y_ROAD,
    };

    let mut node = SceneNode::group(&segment.name, NodeTag::Road).at(footprint.center.at_height(0.0));
    node.push(
        SceneNode::new(
            format!("{}/surface", segment.name),
            NodeTag::RoadSurface,
            Shape::Quad {
                width: footprint.size_x,
                height: footprint.size_z,
            },
        )
        .at(Vec3::new(0.0, surface_y, 0.0))
        .flat()
        .with_material(SurfaceMaterial::hex(segment.kind.surface_color())),
    );

    if segment.kind.has_lane_markings() {
        node.children.extend(lane_markings(&segment.name, &footprint));
    }
    if segment.kind == RoadKind::Crosswalk {
        node.tag = NodeTag::Crosswalk;
        node.children.extend(crosswalk_stripes(&segment.name, &footprint));
    }

    Ok(node)
}

/// Place buildings, roads, lamps and trees under one scene root.
///
/// Children are appended in argument order (buildings in list order first).
/// Malformed entries are skipped and recorded in the report; this never
/// fails.
pub fn compose_site(
    buildings: &[BuildingSpec],
    roads: &[RoadSegment],
    lamps: &[GroundPoint],
    trees: &[GroundPoint],
) -> ComposedSite {
    let mut root = SceneNode::group("campus", NodeTag::Scene);
    let mut report = SiteReport::default();

    for spec in buildings {
        match synthesize(spec) {
            Ok(built) => {
                report.rejected.extend(built.skipped);
                root.push(built.node);
                report.buildings += 1;
            }
            Err(err) => report.reject(err),
        }
    }

    for segment in roads {
        match road_node(segment) {
            Ok(node) => {
                root.push(node);
                report.roads += 1;
            }
            Err(err) => report.reject(err),
        }
    }

    for (i, at) in lamps.iter().enumerate() {
        let name = format!("street-light-{i}");
        if !at.is_finite() {
            report.reject(CampusError::invalid(name, "position is not finite"));
            continue;
        }
        root.push(street_light(name, *at));
        report.lamps += 1;
    }

    for (i, at) in trees.iter().enumerate() {
        let name = format!("tree-{i}");
        if !at.is_finite() {
            report.reject(CampusError::invalid(name, "position is not finite"));
            continue;
        }
        root.push(tree(name, *at));
        report.trees += 1;
    }

    ComposedSite { root, report }
}
