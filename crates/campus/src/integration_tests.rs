//! Integration tests for the campus using the `TestCampus` harness.
//!
//! These spin up a headless Bevy App with `CampusPlugin` and check the scene
//! build, transit ticking and interaction timers working together.

use crate::buildings::{BuildingSpec, Section};
use crate::ground::{Axis, GroundPoint};
use crate::scene_graph::NodeTag;
use crate::site_layout::{RoadKind, RoadSegment};
use crate::test_harness::TestCampus;
use crate::transit::{MonorailRoute, TransitConfig, VehicleLane, Walkway};
use crate::InteractionState;

// ===========================================================================
// 1. Scene build
// ===========================================================================

#[test]
fn empty_site_has_only_ground() {
    let mut campus = TestCampus::new();
    campus.assert_building_count(0);
    assert_eq!(campus.scene().root.count_tagged(NodeTag::Ground), 1);
    assert_eq!(campus.live_agents(), 0);
}

#[test]
fn single_glass_building_end_to_end() {
    let mut campus = TestCampus::new().with_building(
        BuildingSpec::single("Solo", 0.0, 0.0, 30.0, 40.0, 30.0, 10, 0xFFFFFF).with_glass_ground_floor(),
    );
    campus.assert_building_count(1);
    campus.assert_no_rejections();

    let root = &campus.scene().root;
    let group = root.find("Solo").unwrap();
    assert_eq!(group.count_tagged(NodeTag::Section), 1);
    assert_eq!(group.count_tagged(NodeTag::Window), 9 * 7 * 4);
    assert_eq!(group.count_tagged(NodeTag::GlassPanel), 4);
}

#[test]
fn invalid_section_is_reported_not_fatal() {
    let mut campus = TestCampus::new()
        .with_building(BuildingSpec::composite(
            "Mixed",
            0.0,
            0.0,
            vec![Section::new(20.0, 0.0, 10.0), Section::new(20.0, 12.0, 10.0)],
            3,
            0xDDDDDD,
        ))
        .with_road(RoadSegment::centered("Road", RoadKind::MainRoad, 0.0, 40.0, 100.0, 10.0));

    campus.assert_building_count(1);
    let scene = campus.scene();
    assert_eq!(scene.report.rejected.len(), 1);
    assert_eq!(scene.report.roads, 1);
    assert!(scene.root.find("Mixed/section-0").is_none());
}

#[test]
fn ariake_campus_builds_cleanly() {
    let mut campus = TestCampus::ariake();
    campus.assert_building_count(5);
    campus.assert_no_rejections();

    let root = &campus.scene().root;
    assert_eq!(root.count_tagged(NodeTag::Tree), 26);
    assert_eq!(root.count_tagged(NodeTag::StreetLight), 8);
    assert_eq!(root.count_tagged(NodeTag::Crosswalk), 2);
    assert_eq!(root.count_tagged(NodeTag::ParkingStructure), 1);
    assert_eq!(root.count_tagged(NodeTag::MonorailTrack), 1);
    assert_eq!(root.count_tagged(NodeTag::GreenArea), 1);
    let sign = root.find("monorail-station/sign").unwrap();
    assert_eq!(sign.label.as_deref(), Some("有明テニスの森"));
}

#[test]
fn scene_build_is_deterministic() {
    let mut a = TestCampus::ariake();
    let mut b = TestCampus::ariake();
    assert_eq!(a.scene().root, b.scene().root);
}

// ===========================================================================
// 2. Transit
// ===========================================================================

fn small_transit() -> TransitConfig {
    TransitConfig {
        monorail: Some(MonorailRoute {
            center: GroundPoint::new(0.0, 0.0),
            radius_x: 50.0,
            radius_z: 30.0,
            height: 10.0,
            speed: 30.0,
            direction: -1.0,
            station: None,
            station_name: None,
        }),
        lanes: vec![VehicleLane {
            name: "lane".to_string(),
            axis: Axis::Z,
            offset: 5.0,
            min: -40.0,
            max: 40.0,
            direction: 1.0,
        }],
        vehicle_count: 3,
        vehicle_speed_kmh: 50.0,
        walkways: vec![Walkway {
            name: "path".to_string(),
            start: GroundPoint::new(-10.0, 0.0),
            end: GroundPoint::new(10.0, 0.0),
        }],
        pedestrian_count: 4,
        pedestrian_speed_kmh: 5.0,
        ..Default::default()
    }
}

#[test]
fn transit_moves_every_frame() {
    let mut campus = TestCampus::new().with_transit(small_transit());
    campus.start();
    let before: Vec<_> = campus.animator().agents().map(|a| a.pose).collect();
    campus.tick(10);
    let after: Vec<_> = campus.animator().agents().map(|a| a.pose).collect();
    assert_eq!(before.len(), 4);
    for (b, a) in before.iter().zip(after.iter()) {
        assert_ne!(b.translation, a.translation);
    }
    assert!(campus.animator().elapsed() > 0.0);
}

#[test]
fn vehicles_stay_on_lane_for_a_long_run() {
    let mut campus = TestCampus::new().with_transit(small_transit()).with_frame_time(0.25);
    for _ in 0..40 {
        campus.tick(5);
        let animator = campus.animator();
        for v in animator.vehicles() {
            assert!((-40.0..=40.0).contains(&v.position), "vehicle at {}", v.position);
        }
    }
    campus.assert_agents_finite();
}

#[test]
fn pedestrians_appear_after_schedule() {
    let mut campus = TestCampus::new().with_transit(small_transit()).with_frame_time(0.1);
    campus.start();
    assert_eq!(campus.animator().pedestrians().len(), 0);
    // Every initial spawn is due within 3 * 2 s + 5 s.
    campus.tick(120);
    assert!(campus.animator().stats().pedestrians_spawned >= 4);
}

#[test]
fn same_seed_same_traffic() {
    let run = |seed| {
        let mut campus = TestCampus::new().with_transit(small_transit()).with_seed(seed);
        campus.tick(90);
        campus.animator().agents().collect::<Vec<_>>()
    };
    assert_eq!(run(3), run(3));
}

#[test]
fn stop_freezes_transit_inside_app() {
    let mut campus = TestCampus::new().with_transit(small_transit());
    campus.tick(5);
    campus
        .world_mut()
        .resource_mut::<crate::TransitAnimator>()
        .stop();
    let before: Vec<_> = campus.animator().agents().collect();
    campus.tick(30);
    let after: Vec<_> = campus.animator().agents().collect();
    assert_eq!(before, after);
}

// ===========================================================================
// 3. Interaction
// ===========================================================================

#[test]
fn info_panel_hides_after_three_seconds() {
    // Virtual time clamps each frame to 0.25 s.
    let mut campus = TestCampus::ariake().with_frame_time(0.25);
    campus.start();
    campus
        .interaction_mut()
        .on_click("Building 3", "Research laboratories");
    campus.tick(8);
    assert!(campus.resource::<InteractionState>().info_panel().is_some());
    campus.tick(8);
    assert!(campus.resource::<InteractionState>().info_panel().is_none());
}
