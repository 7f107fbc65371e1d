use bevy::input::mouse::{MouseScrollUnit, MouseWheel};
use bevy::pbr::{DistanceFog, FogFalloff};
use bevy::prelude::*;

use campus::SceneContext;

use crate::lighting::{LightingPreset, FOG_END, FOG_START};

const PAN_SPEED: f32 = 60.0;
const ZOOM_SPEED: f32 = 0.12;
const MIN_DISTANCE: f32 = 5.0;
const MAX_DISTANCE: f32 = 450.0;
const MIN_PITCH: f32 = 3.0 * std::f32::consts::PI / 180.0;
const MAX_PITCH: f32 = 89.0 * std::f32::consts::PI / 180.0;
const ORBIT_SENSITIVITY: f32 = 0.005;
/// Focus stays within this distance of the campus origin.
const FOCUS_LIMIT: f32 = 200.0;

/// Orbit camera: the eye circles a focus point on the ground.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct OrbitCamera {
    pub focus: Vec3,
    /// Horizontal angle in radians; 0 puts the eye on the +Z side.
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
}

impl Default for OrbitCamera {
    /// Matches the `overview-south` capture position.
    fn default() -> Self {
        Self::looking_from(Vec3::new(0.0, 50.0, 100.0), Vec3::ZERO)
    }
}

impl OrbitCamera {
    /// Orbit parameters that put the eye at `eye` looking at `focus`.
    pub fn looking_from(eye: Vec3, focus: Vec3) -> Self {
        let offset = eye - focus;
        let distance = offset.length().max(MIN_DISTANCE);
        Self {
            focus,
            yaw: offset.x.atan2(offset.z),
            pitch: (offset.y / distance).clamp(-1.0, 1.0).asin().clamp(MIN_PITCH, MAX_PITCH),
            distance: distance.min(MAX_DISTANCE),
        }
    }

    pub fn eye(&self) -> Vec3 {
        let x = self.distance * self.pitch.cos() * self.yaw.sin();
        let y = self.distance * self.pitch.sin();
        let z = self.distance * self.pitch.cos() * self.yaw.cos();
        self.focus + Vec3::new(x, y, z)
    }

    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.eye()).looking_at(self.focus, Vec3::Y)
    }

    /// Move the focus along the ground relative to the current yaw.
    fn pan(&mut self, right: f32, back: f32) {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        self.focus.x += right * cos_yaw + back * sin_yaw;
        self.focus.z += -right * sin_yaw + back * cos_yaw;
        self.focus.x = self.focus.x.clamp(-FOCUS_LIMIT, FOCUS_LIMIT);
        self.focus.z = self.focus.z.clamp(-FOCUS_LIMIT, FOCUS_LIMIT);
    }
}

#[derive(Resource, Default)]
pub struct CameraDrag {
    pub button: Option<MouseButton>,
    pub last_pos: Vec2,
}

/// Startup: spawn the camera with fog in the active sky colour and register
/// it with the scene context.
pub fn setup_camera(
    mut commands: Commands,
    preset: Res<LightingPreset>,
    mut context: ResMut<SceneContext>,
) {
    let orbit = OrbitCamera::default();
    let camera = commands
        .spawn((
            Camera3d::default(),
            orbit.transform(),
            DistanceFog {
                color: preset.sky_color(),
                falloff: FogFalloff::Linear {
                    start: FOG_START,
                    end: FOG_END,
                },
                ..default()
            },
        ))
        .id();
    context.camera = Some(camera);
    commands.insert_resource(orbit);
}

/// Copy the orbit state onto the registered camera.
pub fn apply_orbit_camera(
    orbit: Res<OrbitCamera>,
    context: Res<SceneContext>,
    mut transforms: Query<&mut Transform, With<Camera3d>>,
) {
    if !orbit.is_changed() {
        return;
    }
    let camera = match context.camera() {
        Ok(camera) => camera,
        Err(err) => {
            warn!("Orbit camera: {err}");
            return;
        }
    };
    if let Ok(mut transform) = transforms.get_mut(camera) {
        *transform = orbit.transform();
    }
}

/// WASD/arrow keys pan the focus; Q/E rotate.
pub fn camera_keyboard(keys: Res<ButtonInput<KeyCode>>, time: Res<Time>, mut orbit: ResMut<OrbitCamera>) {
    let mut dir = Vec2::ZERO;
    if keys.pressed(KeyCode::KeyW) || keys.pressed(KeyCode::ArrowUp) {
        dir.y -= 1.0;
    }
    if keys.pressed(KeyCode::KeyS) || keys.pressed(KeyCode::ArrowDown) {
        dir.y += 1.0;
    }
    if keys.pressed(KeyCode::KeyA) || keys.pressed(KeyCode::ArrowLeft) {
        dir.x -= 1.0;
    }
    if keys.pressed(KeyCode::KeyD) || keys.pressed(KeyCode::ArrowRight) {
        dir.x += 1.0;
    }

    let dt = time.delta_secs();
    if dir != Vec2::ZERO {
        let step = dir.normalize() * PAN_SPEED * (orbit.distance / 100.0) * dt;
        orbit.pan(step.x, step.y);
    }
    if keys.pressed(KeyCode::KeyQ) {
        orbit.yaw -= dt;
    }
    if keys.pressed(KeyCode::KeyE) {
        orbit.yaw += dt;
    }
}

/// Right-drag orbits, middle-drag pans.
pub fn camera_drag(
    buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window>,
    mut drag: ResMut<CameraDrag>,
    mut orbit: ResMut<OrbitCamera>,
) {
    let Ok(window) = windows.get_single() else {
        return;
    };
    let Some(pos) = window.cursor_position() else {
        return;
    };

    for button in [MouseButton::Right, MouseButton::Middle] {
        if buttons.just_pressed(button) {
            drag.button = Some(button);
            drag.last_pos = pos;
        }
        if buttons.just_released(button) && drag.button == Some(button) {
            drag.button = None;
        }
    }

    let delta = pos - drag.last_pos;
    drag.last_pos = pos;
    match drag.button {
        Some(MouseButton::Right) => {
            orbit.yaw -= delta.x * ORBIT_SENSITIVITY;
            orbit.pitch = (orbit.pitch + delta.y * ORBIT_SENSITIVITY).clamp(MIN_PITCH, MAX_PITCH);
        }
        Some(MouseButton::Middle) => {
            let scale = orbit.distance / 500.0;
            orbit.pan(-delta.x * scale, -delta.y * scale);
        }
        _ => {}
    }
}

/// Scroll wheel: zoom.
pub fn camera_zoom(mut scroll_evts: EventReader<MouseWheel>, mut orbit: ResMut<OrbitCamera>) {
    for evt in scroll_evts.read() {
        let dy = match evt.unit {
            MouseScrollUnit::Line => evt.y,
            MouseScrollUnit::Pixel => evt.y / 100.0,
        };
        let factor = 1.0 - dy * ZOOM_SPEED;
        orbit.distance = (orbit.distance * factor).clamp(MIN_DISTANCE, MAX_DISTANCE);
    }
}
