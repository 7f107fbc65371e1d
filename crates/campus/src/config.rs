// ---------------------------------------------------------------------------
// Building massing
// ---------------------------------------------------------------------------

/// Horizontal distance between window centres on every facade.
pub const WINDOW_SPACING: f32 = 4.0;
/// Window quads sit this far outside the facade to avoid z-fighting.
pub const WINDOW_OFFSET: f32 = 0.15;
pub const WINDOW_WIDTH: f32 = 1.5;
pub const WINDOW_HEIGHT: f32 = 2.5;
/// Ground-floor glass panels cover this share of the floor height.
pub const GLASS_HEIGHT_FACTOR: f32 = 0.9;
/// Ground-floor glass panels cover this share of the windowed facade width.
pub const GLASS_WIDTH_FACTOR: f32 = 0.95;

// ---------------------------------------------------------------------------
// Ground layers (Y heights)
// ---------------------------------------------------------------------------

pub const GROUND_SIZE: f32 = 300.0;
pub const Y_ROAD: f32 = 0.01;
pub const Y_SIDEWALK: f32 = 0.02;
pub const Y_GREEN: f32 = 0.02;
/// Lane markings and crosswalk stripes, above every ground surface.
pub const Y_MARKING: f32 = 0.03;

// ---------------------------------------------------------------------------
// Road markings
// ---------------------------------------------------------------------------

pub const DASH_LENGTH: f32 = 2.0;
pub const DASH_WIDTH: f32 = 0.3;
/// Distance between the starts of consecutive centreline dashes.
pub const DASH_PITCH: f32 = 8.0;
pub const EDGE_LINE_WIDTH: f32 = 0.2;
/// Edge lines are inset from the road edge by this margin.
pub const EDGE_LINE_INSET: f32 = 0.5;
/// Edge lines cover this share of the segment length.
pub const EDGE_LINE_LENGTH_FACTOR: f32 = 0.95;
pub const CROSSWALK_STRIPE_WIDTH: f32 = 0.5;
pub const CROSSWALK_STRIPE_GAP: f32 = 0.5;

// ---------------------------------------------------------------------------
// Transit
// ---------------------------------------------------------------------------

/// Radians per second per unit of monorail speed (0.0003 rad per 60 Hz frame).
pub const MONORAIL_ANGULAR_RATE: f32 = 0.018;
pub const MONORAIL_PILLAR_COUNT: usize = 12;
pub const MONORAIL_GUIDEWAY_SEGMENTS: usize = 60;
/// The guideway ellipse sits this far outside the route ellipse.
pub const MONORAIL_GUIDEWAY_OFFSET: f32 = 5.0;

/// Vehicle speed is randomised within +/- this fraction of the base speed.
pub const VEHICLE_SPEED_JITTER: f32 = 0.2;
/// Initial spacing between vehicles sharing a lane.
pub const VEHICLE_SEED_SPACING: f32 = 30.0;
/// Respawn delay window for the destroy-and-respawn vehicle policy (seconds).
pub const VEHICLE_RESPAWN_DELAY: (f32, f32) = (5.0, 20.0);

/// Probability a pedestrian is replaced after reaching the end of its walkway.
pub const PEDESTRIAN_RESPAWN_PROBABILITY: f64 = 0.7;
/// Replacement pedestrian delay window (seconds).
pub const PEDESTRIAN_RESPAWN_DELAY: (f32, f32) = (3.0, 13.0);
/// Initial spawn schedule: `i * STAGGER + rand(0..JITTER)` seconds.
pub const PEDESTRIAN_SPAWN_STAGGER: f32 = 2.0;
pub const PEDESTRIAN_SPAWN_JITTER: f32 = 5.0;
/// Vertical walking bob: peak height and half period.
pub const PEDESTRIAN_BOB_HEIGHT: f32 = 0.1;
pub const PEDESTRIAN_BOB_HALF_PERIOD: f32 = 0.5;

/// Paths shorter than this are treated as zero length.
pub const MIN_PATH_LENGTH: f32 = 1.0e-3;

// ---------------------------------------------------------------------------
// Interaction
// ---------------------------------------------------------------------------

/// Seconds the building info panel stays visible after a click.
pub const INFO_PANEL_SECONDS: f32 = 3.0;
pub const HOVER_EMISSIVE: u32 = 0x444444;
pub const HOVER_EMISSIVE_INTENSITY: f32 = 0.2;

/// km/h to m/s.
pub fn kmh_to_ms(kmh: f32) -> f32 {
    kmh * 1000.0 / 3600.0
}
