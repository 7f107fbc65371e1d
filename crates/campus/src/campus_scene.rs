//! Whole-campus scene build from the layout tables.

use bevy::prelude::*;

use crate::buildings::synthesize_parking;
use crate::layout_tables::SiteConfig;
use crate::scene_graph::{NodeTag, SceneNode};
use crate::site_layout::{compose_site, green_area, ground_plane, monorail_track, SiteReport};

/// The static campus: one root node plus the report of what was skipped.
#[derive(Resource, Debug)]
pub struct CampusScene {
    pub root: SceneNode,
    pub report: SiteReport,
}

impl Default for CampusScene {
    fn default() -> Self {
        Self {
            root: SceneNode::group("campus", NodeTag::Scene),
            report: SiteReport::default(),
        }
    }
}

impl CampusScene {
    pub fn building_names(&self) -> impl Iterator<Item = &str> {
        self.root
            .children_tagged(NodeTag::Building)
            .map(|n| n.name.as_str())
    }
}

/// Build the full static scene: ground, composed site, green areas,
/// parking structures and the monorail structure.
pub fn build_scene(config: &SiteConfig) -> CampusScene {
    let site = compose_site(&config.buildings, &config.roads, &config.lamps, &config.trees);
    let mut root = site.root;
    let mut report = site.report;

    root.children.insert(0, ground_plane());

    for area in &config.green_areas {
        root.push(green_area(area));
    }

    for parking in &config.parking {
        match synthesize_parking(parking) {
            Ok(node) => root.push(node),
            Err(err) => report.reject(err),
        }
    }

    if let Some(route) = &config.transit.monorail {
        match route.validate() {
            Ok(()) => root.push(monorail_track(route)),
            Err(err) => report.reject(err),
        }
    }

    info!(
        "Campus scene built: {} buildings, {} roads, {} lamps, {} trees, {} rejected, {} nodes",
        report.buildings,
        report.roads,
        report.lamps,
        report.trees,
        report.rejected.len(),
        root.node_count()
    );

    CampusScene { root, report }
}
