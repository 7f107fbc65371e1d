//! # TestCampus: headless harness for campus integration tests
//!
//! Wraps a `bevy::app::App` with `MinimalPlugins` + [`CampusPlugin`] and a
//! fixed manual frame time, so ticks are reproducible without a window or a
//! renderer. Builder methods edit the layout tables before the first update;
//! the scene is built lazily on the first tick or query.

use std::time::Duration;

use bevy::app::App;
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;

use crate::buildings::BuildingSpec;
use crate::campus_scene::CampusScene;
use crate::interaction::InteractionState;
use crate::layout_tables::SiteConfig;
use crate::scene_graph::NodeTag;
use crate::site_layout::RoadSegment;
use crate::transit::{TransitAnimator, TransitConfig};
use crate::{CampusPlugin, CampusRng};

/// Default frame time: 60 Hz.
const FRAME_SECONDS: f32 = 1.0 / 60.0;

pub struct TestCampus {
    app: App,
    started: bool,
}

impl Default for TestCampus {
    fn default() -> Self {
        Self::new()
    }
}

impl TestCampus {
    // -----------------------------------------------------------------------
    // Constructors
    // -----------------------------------------------------------------------

    /// An empty site: no buildings, roads or transit.
    pub fn new() -> Self {
        Self::with_config(SiteConfig::empty())
    }

    /// The built-in Ariake campus tables.
    pub fn ariake() -> Self {
        Self::with_config(SiteConfig::default())
    }

    pub fn with_config(config: SiteConfig) -> Self {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f32(
            FRAME_SECONDS,
        )));
        app.insert_resource(config);
        app.add_plugins(CampusPlugin);
        Self {
            app,
            started: false,
        }
    }

    // -----------------------------------------------------------------------
    // Builder (before the first tick)
    // -----------------------------------------------------------------------

    fn config_mut(&mut self) -> Mut<'_, SiteConfig> {
        assert!(!self.started, "layout tables are read once at start-up");
        self.app.world_mut().resource_mut::<SiteConfig>()
    }

    pub fn with_building(mut self, spec: BuildingSpec) -> Self {
        self.config_mut().buildings.push(spec);
        self
    }

    pub fn with_road(mut self, road: RoadSegment) -> Self {
        self.config_mut().roads.push(road);
        self
    }

    pub fn with_transit(mut self, transit: TransitConfig) -> Self {
        self.config_mut().transit = transit;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        assert!(!self.started, "seed must be set before start-up");
        self.app.insert_resource(CampusRng::from_seed_u64(seed));
        self
    }

    pub fn with_frame_time(mut self, seconds: f32) -> Self {
        self.app
            .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f32(
                seconds,
            )));
        self
    }

    // -----------------------------------------------------------------------
    // Running
    // -----------------------------------------------------------------------

    /// Run the Startup schedule if it has not run yet.
    pub fn start(&mut self) {
        if !self.started {
            self.app.update();
            self.started = true;
        }
    }

    /// Advance `n` frames.
    pub fn tick(&mut self, n: u32) {
        self.start();
        for _ in 0..n {
            self.app.update();
        }
    }

    pub fn world_mut(&mut self) -> &mut World {
        self.app.world_mut()
    }

    /// The underlying app, for host crates that add their own systems on
    /// top of the campus before the first tick.
    pub fn app_mut(&mut self) -> &mut App {
        &mut self.app
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn resource<T: Resource>(&mut self) -> &T {
        self.start();
        self.app.world().resource::<T>()
    }

    pub fn scene(&mut self) -> &CampusScene {
        self.resource::<CampusScene>()
    }

    pub fn animator(&mut self) -> &TransitAnimator {
        self.resource::<TransitAnimator>()
    }

    pub fn interaction_mut(&mut self) -> Mut<'_, InteractionState> {
        self.start();
        self.app.world_mut().resource_mut::<InteractionState>()
    }

    pub fn building_count(&mut self) -> usize {
        self.scene().root.children_tagged(NodeTag::Building).count()
    }

    pub fn live_agents(&mut self) -> usize {
        self.animator().live_count()
    }

    // -----------------------------------------------------------------------
    // Assertions
    // -----------------------------------------------------------------------

    pub fn assert_building_count(&mut self, expected: usize) {
        let actual = self.building_count();
        assert_eq!(actual, expected, "expected {expected} buildings, got {actual}");
    }

    pub fn assert_agents_finite(&mut self) {
        for agent in self.animator().agents() {
            assert!(agent.pose.is_finite(), "agent {:?} has a non-finite pose", agent.id);
        }
    }

    pub fn assert_no_rejections(&mut self) {
        let rejected = &self.scene().report.rejected;
        assert!(rejected.is_empty(), "unexpected rejections: {rejected:?}");
    }
}
