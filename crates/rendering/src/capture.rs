//! Scripted capture mode.
//!
//! Walks nine camera presets and then four lighting presets seen from the
//! south overview. Each step poses the scene, waits `settle_frames` frames,
//! saves `campus-<preset>-<timestamp>.png` and only then moves on. The app
//! exits once the last screenshot has had time to reach the disk.

use std::path::PathBuf;
use std::time::SystemTime;

use bevy::prelude::*;
use bevy::render::view::screenshot::{save_to_disk, Screenshot};

use campus::{CampusError, SceneContext};
use compare::timestamp::iso_timestamp;

use crate::lighting::LightingPreset;

/// Frames to keep running after the last screenshot request.
const DRAIN_FRAMES: u32 = 30;

/// A fixed viewpoint: eye position plus pitch/yaw in degrees. Yaw 0 looks
/// toward -Z, positive yaw turns left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPreset {
    pub name: &'static str,
    pub eye: Vec3,
    pub pitch_deg: f32,
    pub yaw_deg: f32,
}

impl CameraPreset {
    const fn new(name: &'static str, x: f32, y: f32, z: f32, pitch_deg: f32, yaw_deg: f32) -> Self {
        Self {
            name,
            eye: Vec3::new(x, y, z),
            pitch_deg,
            yaw_deg,
        }
    }

    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.eye).with_rotation(Quat::from_euler(
            EulerRot::YXZ,
            self.yaw_deg.to_radians(),
            self.pitch_deg.to_radians(),
            0.0,
        ))
    }
}

pub const CAMERA_PRESETS: [CameraPreset; 9] = [
    CameraPreset::new("overview-south", 0.0, 50.0, 100.0, -30.0, 0.0),
    CameraPreset::new("aerial-top", 0.0, 100.0, 0.0, -90.0, 0.0),
    CameraPreset::new("overview-east", 100.0, 30.0, 0.0, -15.0, 90.0),
    CameraPreset::new("overview-west", -100.0, 30.0, 0.0, -15.0, -90.0),
    CameraPreset::new("overview-north", 0.0, 30.0, -100.0, -15.0, 180.0),
    CameraPreset::new("ground-level-south", 0.0, 1.6, 40.0, 0.0, 0.0),
    CameraPreset::new("ground-level-building1", -30.0, 1.6, 0.0, 0.0, 90.0),
    CameraPreset::new("ground-level-building3", 50.0, 1.6, 10.0, 0.0, -90.0),
    CameraPreset::new("mid-level-campus", 0.0, 20.0, 50.0, -10.0, 0.0),
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CaptureStep {
    Camera(CameraPreset),
    /// Lighting preset, seen from the first camera preset.
    Lighting(LightingPreset),
}

impl CaptureStep {
    pub fn label(&self) -> String {
        match self {
            CaptureStep::Camera(preset) => preset.name.to_string(),
            CaptureStep::Lighting(preset) => format!("lighting-{}", preset.label()),
        }
    }
}

/// All capture steps in order.
pub fn capture_steps() -> Vec<CaptureStep> {
    CAMERA_PRESETS
        .iter()
        .copied()
        .map(CaptureStep::Camera)
        .chain(LightingPreset::ALL.into_iter().map(CaptureStep::Lighting))
        .collect()
}

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct CaptureSettings {
    pub output_dir: PathBuf,
    pub settle_frames: u32,
}

impl Default for CaptureSettings {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("captures/webxr"),
            settle_frames: 120,
        }
    }
}

/// What the capture system must do this frame.
#[derive(Debug, Clone, PartialEq)]
pub enum CaptureAction {
    Pose(CaptureStep),
    Wait,
    Shoot(String),
    Finish,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Phase {
    Pose,
    Settle(u32),
    Drain(u32),
    Done,
}

/// Sequential capture state machine; one [`advance`](Self::advance) per
/// frame.
#[derive(Resource, Debug)]
pub struct CaptureScript {
    steps: Vec<CaptureStep>,
    next: usize,
    phase: Phase,
    settle_frames: u32,
}

impl CaptureScript {
    pub fn new(steps: Vec<CaptureStep>, settle_frames: u32) -> Self {
        Self {
            steps,
            next: 0,
            phase: Phase::Pose,
            settle_frames,
        }
    }

    pub fn advance(&mut self) -> CaptureAction {
        match self.phase {
            Phase::Pose => match self.steps.get(self.next) {
                Some(step) => {
                    self.phase = Phase::Settle(self.settle_frames);
                    CaptureAction::Pose(*step)
                }
                None => {
                    self.phase = Phase::Drain(DRAIN_FRAMES);
                    CaptureAction::Wait
                }
            },
            Phase::Settle(0) => {
                let label = self.steps[self.next].label();
                self.next += 1;
                self.phase = Phase::Pose;
                CaptureAction::Shoot(label)
            }
            Phase::Settle(n) => {
                self.phase = Phase::Settle(n - 1);
                CaptureAction::Wait
            }
            Phase::Drain(0) => {
                self.phase = Phase::Done;
                CaptureAction::Finish
            }
            Phase::Drain(n) => {
                self.phase = Phase::Drain(n - 1);
                CaptureAction::Wait
            }
            Phase::Done => CaptureAction::Wait,
        }
    }

    pub fn completed(&self) -> usize {
        self.next
    }

    pub fn total(&self) -> usize {
        self.steps.len()
    }
}

/// UTC timestamp with `:` and `.` replaced by `-`, e.g.
/// `2024-05-01T09-30-00-000Z`.
pub fn file_stamp(time: SystemTime) -> String {
    iso_timestamp(time).replace(&[':', '.'][..], "-")
}

pub fn capture_file_name(label: &str, stamp: &str) -> String {
    format!("campus-{label}-{stamp}.png")
}

/// Startup: make sure the output directory exists. A failure ends the run
/// with an error exit code.
pub fn prepare_capture_dir(settings: Res<CaptureSettings>, mut exit: EventWriter<AppExit>) {
    if let Err(err) = std::fs::create_dir_all(&settings.output_dir) {
        let err = CampusError::from(err);
        error!("Capture: cannot create {}: {err}", settings.output_dir.display());
        exit.send(AppExit::error());
        return;
    }
    info!("Capture: writing to {}", settings.output_dir.display());
}

pub fn run_capture_script(
    mut commands: Commands,
    mut script: ResMut<CaptureScript>,
    settings: Res<CaptureSettings>,
    context: Res<SceneContext>,
    mut lighting: ResMut<LightingPreset>,
    mut transforms: Query<&mut Transform, With<Camera3d>>,
    mut exit: EventWriter<AppExit>,
) {
    match script.advance() {
        CaptureAction::Pose(step) => {
            let camera = match step {
                CaptureStep::Camera(preset) => preset,
                CaptureStep::Lighting(preset) => {
                    *lighting = preset;
                    CAMERA_PRESETS[0]
                }
            };
            match context.camera() {
                Ok(entity) => {
                    if let Ok(mut transform) = transforms.get_mut(entity) {
                        *transform = camera.transform();
                    }
                }
                Err(err) => warn!("Capture {}: {err}", step.label()),
            }
        }
        CaptureAction::Shoot(label) => {
            let name = capture_file_name(&label, &file_stamp(SystemTime::now()));
            let path = settings.output_dir.join(name);
            info!(
                "Capture {}/{}: {}",
                script.completed(),
                script.total(),
                path.display()
            );
            commands
                .spawn(Screenshot::primary_window())
                .observe(save_to_disk(path));
        }
        CaptureAction::Finish => {
            info!("Capture finished: {} images", script.total());
            exit.send(AppExit::Success);
        }
        CaptureAction::Wait => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, UNIX_EPOCH};

    #[test]
    fn test_step_order_cameras_then_lighting() {
        let steps = capture_steps();
        assert_eq!(steps.len(), 13);
        assert_eq!(steps[0].label(), "overview-south");
        assert_eq!(steps[8].label(), "mid-level-campus");
        assert_eq!(steps[9].label(), "lighting-morning");
        assert_eq!(steps[12].label(), "lighting-night");
    }

    #[test]
    fn test_script_waits_before_each_shot() {
        let mut script = CaptureScript::new(capture_steps()[..2].to_vec(), 2);
        let actions: Vec<_> = (0..9).map(|_| script.advance()).collect();
        assert!(matches!(actions[0], CaptureAction::Pose(_)));
        assert_eq!(actions[1], CaptureAction::Wait);
        assert_eq!(actions[2], CaptureAction::Wait);
        assert_eq!(actions[3], CaptureAction::Shoot("overview-south".to_string()));
        assert!(matches!(actions[4], CaptureAction::Pose(_)));
        assert_eq!(actions[7], CaptureAction::Shoot("aerial-top".to_string()));
        assert_eq!(actions[8], CaptureAction::Wait);
        assert_eq!(script.completed(), 2);
    }

    #[test]
    fn test_script_finishes_once() {
        let mut script = CaptureScript::new(Vec::new(), 0);
        let actions: Vec<_> = (0..(DRAIN_FRAMES + 5)).map(|_| script.advance()).collect();
        let finishes = actions.iter().filter(|a| **a == CaptureAction::Finish).count();
        assert_eq!(finishes, 1);
    }

    #[test]
    fn test_file_stamp_format() {
        let t = UNIX_EPOCH + Duration::from_millis(1_714_555_800_250);
        assert_eq!(file_stamp(t), "2024-05-01T09-30-00-250Z");
        assert_eq!(file_stamp(UNIX_EPOCH), "1970-01-01T00-00-00-000Z");
    }

    #[test]
    fn test_capture_file_name() {
        assert_eq!(
            capture_file_name("aerial-top", "2024-05-01T09-30-00-250Z"),
            "campus-aerial-top-2024-05-01T09-30-00-250Z.png"
        );
    }

    #[test]
    fn test_aerial_preset_looks_down() {
        let forward = CAMERA_PRESETS[1].transform().forward();
        assert!((forward.y + 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_east_preset_looks_west() {
        let forward = CAMERA_PRESETS[2].transform().forward();
        assert!(forward.x < -0.9);
        assert!(forward.z.abs() < 1e-4);
        assert!(forward.y < 0.0);
    }
}
