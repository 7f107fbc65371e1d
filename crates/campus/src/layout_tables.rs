//! Static layout tables for the campus.
//!
//! `SiteConfig::default()` is the built-in Ariake campus. A JSON file with
//! the same shape can replace it at start-up; the tables are read once and
//! never mutated while the scene runs.

use std::path::Path;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::buildings::{BuildingSpec, ParkingSpec, Section};
use crate::error::CampusError;
use crate::ground::{Axis, GroundPoint};
use crate::site_layout::{GreenArea, RoadKind, RoadSegment};
use crate::transit::{MonorailRoute, TransitConfig, VehicleLane, VehiclePolicy, Walkway};

/// Storey height used to derive floor counts from building heights.
const STOREY_HEIGHT: f32 = 3.5;

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteConfig {
    #[serde(default)]
    pub buildings: Vec<BuildingSpec>,
    #[serde(default)]
    pub parking: Vec<ParkingSpec>,
    #[serde(default)]
    pub roads: Vec<RoadSegment>,
    #[serde(default)]
    pub green_areas: Vec<GreenArea>,
    #[serde(default)]
    pub lamps: Vec<GroundPoint>,
    #[serde(default)]
    pub trees: Vec<GroundPoint>,
    #[serde(default)]
    pub transit: TransitConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self::ariake()
    }
}

impl SiteConfig {
    /// A site with nothing in it; useful as a starting point for tests.
    pub fn empty() -> Self {
        Self {
            buildings: Vec::new(),
            parking: Vec::new(),
            roads: Vec::new(),
            green_areas: Vec::new(),
            lamps: Vec::new(),
            trees: Vec::new(),
            transit: TransitConfig::default(),
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, CampusError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self, CampusError> {
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&text)?;
        info!(
            "Loaded layout from {}: {} buildings, {} roads",
            path.display(),
            config.buildings.len(),
            config.roads.len()
        );
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> Result<String, CampusError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn building(&self, name: &str) -> Option<&BuildingSpec> {
        self.buildings.iter().find(|b| b.name == name)
    }

    /// The Ariake campus as modelled from aerial reference imagery.
    pub fn ariake() -> Self {
        Self {
            buildings: ariake_buildings(),
            parking: vec![ParkingSpec {
                name: "Parking".to_string(),
                position: GroundPoint::new(-70.0, -30.0),
                width: 40.0,
                height: 8.0,
                depth: 50.0,
            }],
            roads: ariake_roads(),
            green_areas: vec![GreenArea {
                name: "Central green".to_string(),
                center: GroundPoint::new(-30.0, 30.0),
                size_x: 30.0,
                size_z: 20.0,
            }],
            lamps: points(&[
                (-80.0, 65.0),
                (-40.0, 65.0),
                (0.0, 65.0),
                (40.0, 65.0),
                (80.0, 65.0),
                (-90.0, 30.0),
                (-90.0, 0.0),
                (-90.0, -30.0),
            ]),
            trees: points(&[
                // green area
                (-30.0, 35.0),
                (-25.0, 25.0),
                (-35.0, 28.0),
                (-28.0, 32.0),
                (-32.0, 22.0),
                // around buildings
                (30.0, 40.0),
                (35.0, 45.0),
                (25.0, 35.0),
                (-60.0, 10.0),
                (-65.0, 15.0),
                (-70.0, 5.0),
                (40.0, -20.0),
                (45.0, -25.0),
                (35.0, -15.0),
                // along the main road
                (-80.0, 50.0),
                (-60.0, 50.0),
                (-40.0, 50.0),
                (-20.0, 50.0),
                (0.0, 50.0),
                (20.0, 50.0),
                (40.0, 50.0),
                (60.0, 50.0),
                // inside the campus
                (-5.0, 10.0),
                (-15.0, 5.0),
                (5.0, -5.0),
                (15.0, -10.0),
            ]),
            transit: ariake_transit(),
        }
    }
}

fn points(coords: &[(f32, f32)]) -> Vec<GroundPoint> {
    coords.iter().map(|&(x, z)| GroundPoint::new(x, z)).collect()
}

fn floors_for(height: f32) -> u32 {
    ((height / STOREY_HEIGHT).floor() as u32).max(1)
}

fn ariake_buildings() -> Vec<BuildingSpec> {
    vec![
        BuildingSpec::composite(
            "Building 1",
            -40.0,
            0.0,
            vec![
                Section::new(35.0, 40.0, 50.0),
                Section::new(25.0, 40.0, 30.0).offset_by(20.0, 10.0),
                Section::new(20.0, 35.0, 25.0).offset_by(-15.0, 20.0),
            ],
            floors_for(40.0),
            0xE8E8E8,
        )
        .with_info("Main lecture building with the library and student services")
        .with_glass_ground_floor(),
        BuildingSpec::composite(
            "Building 2",
            20.0,
            -35.0,
            vec![
                Section::new(45.0, 35.0, 25.0),
                Section::new(30.0, 35.0, 20.0).offset_by(15.0, -10.0),
            ],
            floors_for(35.0),
            0xF0F0F0,
        )
        .with_info("Faculty offices and seminar rooms"),
        BuildingSpec::single("Building 3", 50.0, 10.0, 30.0, 45.0, 35.0, floors_for(45.0), 0xF5F5F5)
            .with_info("Research laboratories"),
        BuildingSpec::single("Building 4", 70.0, 35.0, 25.0, 30.0, 20.0, floors_for(30.0), 0xEBEBEB)
            .with_info("Design studios and workshops"),
        BuildingSpec::single("Building 5", 0.0, 0.0, 30.0, 15.0, 25.0, floors_for(15.0), 0xF8F8F8)
            .with_info("Cafeteria and entrance hall")
            .with_glass_ground_floor(),
    ]
}

fn ariake_roads() -> Vec<RoadSegment> {
    vec![
        RoadSegment::centered("Main road", RoadKind::MainRoad, 0.0, 65.0, 200.0, 12.0),
        RoadSegment::centered("Sub road", RoadKind::SubRoad, -90.0, 0.0, 10.0, 150.0),
        RoadSegment::centered("Campus drive", RoadKind::Driveway, 10.0, 0.0, 8.0, 100.0),
        RoadSegment::centered("Main sidewalk", RoadKind::Sidewalk, 0.0, 57.0, 200.0, 4.0),
        // Stripes repeat along X and run north-south across the main road.
        RoadSegment::centered("Main crossing", RoadKind::Crosswalk, 0.0, 59.0, 8.0, 12.0),
        RoadSegment::centered("Sub crossing", RoadKind::Crosswalk, -84.0, 0.0, 8.0, 10.0),
    ]
}

fn lane(name: &str, axis: Axis, offset: f32, direction: f32) -> VehicleLane {
    VehicleLane {
        name: name.to_string(),
        axis,
        offset,
        min: -150.0,
        max: 150.0,
        direction,
    }
}

fn ariake_transit() -> TransitConfig {
    TransitConfig {
        monorail: Some(MonorailRoute {
            center: GroundPoint::new(50.0, 0.0),
            radius_x: 150.0,
            radius_z: 90.0,
            height: 18.0,
            speed: 30.0,
            direction: 1.0,
            station: Some(GroundPoint::new(180.0, -15.0)),
            station_name: Some("有明テニスの森".to_string()),
        }),
        lanes: vec![
            lane("Main road eastbound", Axis::X, 62.5, 1.0),
            lane("Main road westbound", Axis::X, 67.5, -1.0),
            lane("Sub road northbound", Axis::Z, -92.5, 1.0),
            lane("Sub road southbound", Axis::Z, -87.5, -1.0),
        ],
        vehicle_count: 8,
        vehicle_speed_kmh: 40.0,
        vehicle_policy: VehiclePolicy::Wraparound,
        walkways: vec![
            Walkway {
                name: "West walkway".to_string(),
                start: GroundPoint::new(-30.0, -100.0),
                end: GroundPoint::new(-30.0, 100.0),
            },
            Walkway {
                name: "Central walkway".to_string(),
                start: GroundPoint::new(-15.0, -100.0),
                end: GroundPoint::new(-15.0, 100.0),
            },
            Walkway {
                name: "Crossing".to_string(),
                start: GroundPoint::new(-50.0, 59.0),
                end: GroundPoint::new(10.0, 59.0),
            },
        ],
        pedestrian_count: 20,
        pedestrian_speed_kmh: 5.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ariake_tables_are_populated() {
        let config = SiteConfig::default();
        assert_eq!(config.buildings.len(), 5);
        assert_eq!(config.lamps.len(), 8);
        assert_eq!(config.trees.len(), 26);
        assert_eq!(config.transit.lanes.len(), 4);
        assert_eq!(config.building("Building 3").unwrap().floors, 12);
    }

    #[test]
    fn test_crossings_stripe_along_x() {
        let config = SiteConfig::default();
        for name in ["Main crossing", "Sub crossing"] {
            let segment = config.roads.iter().find(|r| r.name == name).unwrap();
            let node = crate::site_layout::road_node(segment).unwrap();
            let stripes: Vec<_> = node
                .children_tagged(crate::scene_graph::NodeTag::CrosswalkStripe)
                .collect();
            assert_eq!(stripes.len(), 8, "{name}");
            for stripe in &stripes {
                assert_eq!(stripe.transform.translation.z, 0.0, "{name}");
                assert!(matches!(
                    stripe.shape,
                    crate::scene_graph::Shape::Quad { width, .. } if width == 0.5
                ));
            }
        }
    }

    #[test]
    fn test_json_round_trip() {
        let config = SiteConfig::default();
        let json = config.to_json_pretty().unwrap();
        let back = SiteConfig::from_json_str(&json).unwrap();
        assert_eq!(config, back);
    }

    #[test]
    fn test_missing_tables_default_to_empty() {
        let json = r#"{
            "buildings": [{
                "name": "Only",
                "position": {"x": 1.0, "z": 2.0},
                "sections": [{"width": 10.0, "height": 10.0, "depth": 10.0}],
                "floors": 3,
                "color": 16777215
            }]
        }"#;
        let config = SiteConfig::from_json_str(json).unwrap();
        assert_eq!(config.buildings.len(), 1);
        assert!(config.roads.is_empty());
        assert!(config.transit.monorail.is_none());
        assert!(!config.buildings[0].ground_floor_glass);
    }

    #[test]
    fn test_bad_json_is_config_error() {
        let err = SiteConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, CampusError::Config(_)));
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = SiteConfig::load(Path::new("/definitely/not/here/layout.json")).unwrap_err();
        assert!(matches!(err, CampusError::ExternalIo(_)));
    }
}
