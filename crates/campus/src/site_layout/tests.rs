#[cfg(test)]
mod tests {
    use bevy::prelude::*;

    use crate::buildings::{window_columns, BuildingSpec, Section};
    use crate::config::{DASH_PITCH, EDGE_LINE_INSET};
    use crate::ground::{Axis, GroundPoint};
    use crate::scene_graph::NodeTag;
    use crate::site_layout::*;
    use crate::transit::MonorailRoute;

    fn main_road_ew() -> RoadSegment {
        RoadSegment::centered("Main", RoadKind::MainRoad, 0.0, 65.0, 200.0, 12.0)
    }

    #[test]
    fn test_stripe_count_matches_pitch() {
        assert_eq!(stripe_count(10.0, 0.5, 0.5), 10);
        assert_eq!(stripe_count(8.0, 0.5, 0.5), 8);
        assert_eq!(stripe_count(0.9, 0.5, 0.5), 0);
        assert_eq!(stripe_count(10.0, 0.0, 0.0), 0);
    }

    #[test]
    fn test_crosswalk_stripes_centered_on_origin() {
        let seg = RoadSegment::centered("Cross", RoadKind::Crosswalk, 0.0, 59.0, 12.0, 10.0);
        let node = road_node(&seg).unwrap();
        assert_eq!(node.tag, NodeTag::Crosswalk);

        let stripes: Vec<_> = node.children_tagged(NodeTag::CrosswalkStripe).collect();
        assert_eq!(stripes.len(), 10);
        // Long axis is X, so stripes repeat along Z.
        let sum: f32 = stripes.iter().map(|s| s.transform.translation.z).sum();
        assert!(sum.abs() < 1e-4, "stripe offsets not centred: {sum}");
        for s in &stripes {
            assert_eq!(s.transform.translation.x, 0.0);
        }
    }

    #[test]
    fn test_east_west_road_markings_run_along_x() {
        let node = road_node(&main_road_ew()).unwrap();
        let dashes: Vec<_> = node.children_tagged(NodeTag::CenterDash).collect();
        assert_eq!(dashes.len(), (200.0 / DASH_PITCH) as usize);
        for d in &dashes {
            assert_eq!(d.transform.translation.z, 0.0);
        }
        let edges: Vec<_> = node.children_tagged(NodeTag::EdgeLine).collect();
        assert_eq!(edges.len(), 2);
        for e in &edges {
            assert!((e.transform.translation.z.abs() - (6.0 - EDGE_LINE_INSET)).abs() < 1e-5);
        }
    }

    #[test]
    fn test_north_south_road_markings_run_along_z() {
        let seg = RoadSegment::centered("Sub", RoadKind::SubRoad, -90.0, 0.0, 10.0, 150.0);
        let node = road_node(&seg).unwrap();
        for d in node.children_tagged(NodeTag::CenterDash) {
            assert_eq!(d.transform.translation.x, 0.0);
        }
        for e in node.children_tagged(NodeTag::EdgeLine) {
            assert!((e.transform.translation.x.abs() - (5.0 - EDGE_LINE_INSET)).abs() < 1e-5);
        }
    }

    #[test]
    fn test_endpoint_segment_resolves_footprint() {
        let seg = RoadSegment::between(
            "Walk",
            RoadKind::Sidewalk,
            GroundPoint::new(-30.0, -100.0),
            GroundPoint::new(-30.0, 100.0),
            4.0,
        );
        let fp = seg.footprint().unwrap();
        assert_eq!(fp.long_axis(), Axis::Z);
        assert_eq!(fp.length(), 200.0);
        assert_eq!(fp.width(), 4.0);
        assert_eq!(fp.center, GroundPoint::new(-30.0, 0.0));
    }

    #[test]
    fn test_diagonal_endpoints_rejected() {
        let seg = RoadSegment::between(
            "Diagonal",
            RoadKind::MainRoad,
            GroundPoint::new(0.0, 0.0),
            GroundPoint::new(10.0, 10.0),
            6.0,
        );
        assert!(seg.footprint().is_err());
    }

    #[test]
    fn test_sidewalk_and_driveway_unmarked() {
        for kind in [RoadKind::Sidewalk, RoadKind::Driveway] {
            let seg = RoadSegment::centered("Plain", kind, 0.0, 0.0, 8.0, 100.0);
            let node = road_node(&seg).unwrap();
            assert_eq!(node.children.len(), 1);
            assert_eq!(node.children[0].tag, NodeTag::RoadSurface);
        }
    }

    #[test]
    fn test_road_surface_faces_up() {
        let node = road_node(&main_road_ew()).unwrap();
        let surface = &node.children[0];
        let normal = surface.transform.rotation * Vec3::Z;
        assert!((normal - Vec3::Y).length() < 1e-5);
    }

    #[test]
    fn test_compose_single_glass_building_scenario() {
        let spec = BuildingSpec::single("Solo", 0.0, 0.0, 30.0, 40.0, 30.0, 10, 0xFFFFFF)
            .with_glass_ground_floor();
        let site = compose_site(&[spec], &[], &[], &[]);

        let buildings: Vec<_> = site.root.children_tagged(NodeTag::Building).collect();
        assert_eq!(buildings.len(), 1);
        let group = buildings[0];
        assert_eq!(group.count_tagged(NodeTag::Section), 1);

        let per_floor = window_columns(30.0) as usize;
        assert_eq!(group.count_tagged(NodeTag::Window), 9 * per_floor * 4);
        assert_eq!(group.count_tagged(NodeTag::GlassPanel), 4);
        assert!(site.report.rejected.is_empty());
    }

    #[test]
    fn test_compose_skips_malformed_and_continues() {
        let good = BuildingSpec::single("Good", 0.0, 0.0, 20.0, 20.0, 20.0, 4, 0xFFFFFF);
        let bad = BuildingSpec::composite("Bad", 0.0, 0.0, vec![Section::new(0.0, 1.0, 1.0)], 1, 0);
        let bad_road = RoadSegment::centered("Zero", RoadKind::MainRoad, 0.0, 0.0, 0.0, 10.0);
        let site = compose_site(
            &[bad, good],
            &[bad_road, main_road_ew()],
            &[GroundPoint::new(f32::NAN, 0.0), GroundPoint::new(5.0, 5.0)],
            &[GroundPoint::new(1.0, 1.0)],
        );

        assert_eq!(site.report.buildings, 1);
        assert_eq!(site.report.roads, 1);
        assert_eq!(site.report.lamps, 1);
        assert_eq!(site.report.trees, 1);
        // Bad building, zero-size road, non-finite lamp.
        assert_eq!(site.report.rejected.len(), 3);
        assert!(site.root.find("Good").is_some());
        assert!(site.root.find("Bad").is_none());
    }

    #[test]
    fn test_compose_order_follows_input() {
        let a = BuildingSpec::single("A", 0.0, 0.0, 10.0, 10.0, 10.0, 1, 0);
        let b = BuildingSpec::single("B", 20.0, 0.0, 10.0, 10.0, 10.0, 1, 0);
        let site = compose_site(&[a, b], &[main_road_ew()], &[], &[]);
        let names: Vec<&str> = site.root.children.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "Main"]);
    }

    #[test]
    fn test_compose_is_deterministic() {
        let specs = [BuildingSpec::single("A", 3.0, 4.0, 12.0, 30.0, 16.0, 6, 0xEBEBEB)];
        let roads = [main_road_ew()];
        let trees = [GroundPoint::new(1.0, 2.0)];
        let first = compose_site(&specs, &roads, &[], &trees);
        let second = compose_site(&specs, &roads, &[], &trees);
        assert_eq!(first.root, second.root);
    }

    #[test]
    fn test_decor_parts() {
        let site = compose_site(&[], &[], &[GroundPoint::new(0.0, 0.0)], &[GroundPoint::new(3.0, 3.0)]);
        let lamp = site.root.find("street-light-0").unwrap();
        assert_eq!(lamp.children.len(), 3);
        assert!(lamp.iter().any(|n| matches!(n.shape, crate::scene_graph::Shape::PointLight { .. })));
        let tree = site.root.find("tree-0").unwrap();
        assert_eq!(tree.children.len(), 2);
    }

    #[test]
    fn test_monorail_track_pillars_on_route() {
        let route = MonorailRoute {
            center: GroundPoint::new(50.0, 0.0),
            radius_x: 150.0,
            radius_z: 90.0,
            height: 18.0,
            speed: 30.0,
            direction: 1.0,
            station: Some(GroundPoint::new(180.0, -15.0)),
            station_name: Some("Tennis Park".to_string()),
        };
        let track = monorail_track(&route);
        let pillars = track
            .children
            .iter()
            .filter(|c| c.name.contains("/pillar-"))
            .count();
        assert_eq!(pillars, 12);
        let first = track.find("monorail-track/pillar-0").unwrap();
        assert!((first.transform.translation.x - 200.0).abs() < 1e-3);
        assert_eq!(track.count_tagged(NodeTag::Station), 1);
        let sign = track.find("monorail-station/sign").unwrap();
        assert_eq!(sign.tag, NodeTag::Sign);
        assert_eq!(sign.label.as_deref(), Some("Tennis Park"));
        // Faces -Z, two metres above the platform at the station's far edge.
        assert!((sign.transform.translation - Vec3::new(0.0, 2.0, 5.0)).length() < 1e-4);
        let facing = sign.transform.rotation * Vec3::Z;
        assert!((facing - Vec3::NEG_Z).length() < 1e-4);
    }

    #[test]
    fn test_unnamed_station_has_no_sign() {
        let route = MonorailRoute {
            center: GroundPoint::new(0.0, 0.0),
            radius_x: 50.0,
            radius_z: 40.0,
            height: 10.0,
            speed: 20.0,
            direction: 1.0,
            station: Some(GroundPoint::new(50.0, 0.0)),
            station_name: None,
        };
        let track = monorail_track(&route);
        assert_eq!(track.count_tagged(NodeTag::Station), 1);
        assert_eq!(track.count_tagged(NodeTag::Sign), 0);
    }
}
