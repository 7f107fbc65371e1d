use bevy::prelude::*;

use campus::CampusSet;

pub mod camera;
pub mod capture;
pub mod hover;
pub mod lighting;
pub mod scene_spawn;
pub mod transit_render;

use capture::{CaptureScript, CaptureSettings};
use lighting::LightingPreset;
use scene_spawn::MeshCache;

/// Scene host: instantiates the campus, keeps agent visuals in sync and
/// owns camera, lighting and picking.
///
/// With `capture` set, interactive camera and picking are left out and the
/// capture script drives the camera instead. Interactive picking reads the
/// egui context, so add `EguiPlugin` (the UI plugin does) alongside it.
#[derive(Default)]
pub struct RenderingPlugin {
    pub capture: Option<CaptureSettings>,
}

impl Plugin for RenderingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MeshCache>()
            .init_resource::<LightingPreset>()
            .add_systems(
                Startup,
                (
                    camera::setup_camera,
                    lighting::setup_lighting,
                    scene_spawn::spawn_campus_scene,
                )
                    .chain()
                    .after(CampusSet::Build),
            )
            .add_systems(
                Update,
                (
                    transit_render::sync_agent_visuals,
                    lighting::apply_lighting_preset,
                )
                    .in_set(CampusSet::Visual),
            );

        match &self.capture {
            Some(settings) => {
                app.insert_resource(settings.clone())
                    .insert_resource(CaptureScript::new(
                        capture::capture_steps(),
                        settings.settle_frames,
                    ))
                    .add_systems(Startup, capture::prepare_capture_dir)
                    .add_systems(
                        Update,
                        capture::run_capture_script.after(CampusSet::Visual),
                    );
            }
            None => {
                app.init_resource::<camera::CameraDrag>()
                    .add_systems(
                        Update,
                        (
                            camera::camera_keyboard,
                            camera::camera_drag,
                            camera::camera_zoom,
                            hover::pick_building,
                        )
                            .in_set(CampusSet::Input),
                    )
                    .add_systems(
                        Update,
                        (camera::apply_orbit_camera, hover::apply_hover_highlight)
                            .in_set(CampusSet::Visual),
                    );
            }
        }
    }
}
