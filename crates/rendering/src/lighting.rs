//! Time-of-day lighting presets: ambient colour and level, a directional
//! sun at 1.3x the ambient level, and a matching sky and fog colour.

use bevy::pbr::DistanceFog;
use bevy::prelude::*;

use campus::scene_graph::hex_to_srgb;
use campus::SceneContext;

/// Linear fog band, in metres from the camera.
pub const FOG_START: f32 = 100.0;
pub const FOG_END: f32 = 500.0;

const SUN_FACTOR: f32 = 1.3;
/// Bevy ambient brightness per unit of preset intensity.
const AMBIENT_BRIGHTNESS: f32 = 750.0;
/// Sun illuminance (lux) per unit of preset intensity.
const SUN_LUX: f32 = 12_000.0;

#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum LightingPreset {
    Morning,
    #[default]
    Noon,
    Evening,
    Night,
}

fn srgb(hex: u32) -> Color {
    let [r, g, b] = hex_to_srgb(hex);
    Color::srgb(r, g, b)
}

impl LightingPreset {
    pub const ALL: [LightingPreset; 4] = [
        LightingPreset::Morning,
        LightingPreset::Noon,
        LightingPreset::Evening,
        LightingPreset::Night,
    ];

    pub fn label(self) -> &'static str {
        match self {
            LightingPreset::Morning => "morning",
            LightingPreset::Noon => "noon",
            LightingPreset::Evening => "evening",
            LightingPreset::Night => "night",
        }
    }

    pub fn intensity(self) -> f32 {
        match self {
            LightingPreset::Morning => 0.4,
            LightingPreset::Noon => 0.6,
            LightingPreset::Evening => 0.3,
            LightingPreset::Night => 0.2,
        }
    }

    pub fn ambient_color(self) -> Color {
        srgb(match self {
            LightingPreset::Morning => 0xFFE4B5,
            LightingPreset::Noon => 0xFFFFFF,
            LightingPreset::Evening => 0xFFB347,
            LightingPreset::Night => 0x4169E1,
        })
    }

    pub fn sun_color(self) -> Color {
        srgb(match self {
            LightingPreset::Morning => 0xFFFACD,
            LightingPreset::Noon => 0xFFFFFF,
            LightingPreset::Evening => 0xFF8C00,
            LightingPreset::Night => 0x6495ED,
        })
    }

    /// Background and fog colour.
    pub fn sky_color(self) -> Color {
        srgb(match self {
            LightingPreset::Morning | LightingPreset::Noon => 0x87CEEB,
            LightingPreset::Evening => 0xFF6347,
            LightingPreset::Night => 0x191970,
        })
    }

    pub fn ambient_brightness(self) -> f32 {
        self.intensity() * AMBIENT_BRIGHTNESS
    }

    pub fn sun_illuminance(self) -> f32 {
        self.intensity() * SUN_FACTOR * SUN_LUX
    }
}

/// Startup: ambient light, sky colour and the sun.
pub fn setup_lighting(mut commands: Commands, preset: Res<LightingPreset>, mut context: ResMut<SceneContext>) {
    commands.insert_resource(AmbientLight {
        color: preset.ambient_color(),
        brightness: preset.ambient_brightness(),
    });
    commands.insert_resource(ClearColor(preset.sky_color()));

    let sun = commands
        .spawn((
            DirectionalLight {
                color: preset.sun_color(),
                illuminance: preset.sun_illuminance(),
                shadows_enabled: true,
                ..default()
            },
            Transform::from_xyz(50.0, 100.0, 50.0).looking_at(Vec3::ZERO, Vec3::Y),
        ))
        .id();
    context.sun = Some(sun);
}

/// Push the active preset onto the ambient light, the sun, the sky and the
/// camera fog whenever it changes.
pub fn apply_lighting_preset(
    preset: Res<LightingPreset>,
    context: Res<SceneContext>,
    mut ambient: ResMut<AmbientLight>,
    mut clear: ResMut<ClearColor>,
    mut suns: Query<&mut DirectionalLight>,
    mut fogs: Query<&mut DistanceFog>,
) {
    if !preset.is_changed() {
        return;
    }

    ambient.color = preset.ambient_color();
    ambient.brightness = preset.ambient_brightness();
    clear.0 = preset.sky_color();

    match context.sun() {
        Ok(entity) => {
            if let Ok(mut sun) = suns.get_mut(entity) {
                sun.color = preset.sun_color();
                sun.illuminance = preset.sun_illuminance();
            }
        }
        Err(err) => warn!("Lighting preset {}: {err}", preset.label()),
    }

    match context.camera() {
        Ok(entity) => {
            if let Ok(mut fog) = fogs.get_mut(entity) {
                fog.color = preset.sky_color();
            }
        }
        Err(err) => warn!("Lighting preset {}: {err}", preset.label()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sun_is_brighter_than_ambient_by_fixed_factor() {
        for preset in LightingPreset::ALL {
            let ratio = preset.sun_illuminance() / (preset.intensity() * SUN_LUX);
            assert!((ratio - SUN_FACTOR).abs() < 1e-5);
        }
    }

    #[test]
    fn test_noon_is_brightest() {
        let noon = LightingPreset::Noon.intensity();
        for preset in LightingPreset::ALL {
            assert!(preset.intensity() <= noon);
        }
        assert_eq!(LightingPreset::default(), LightingPreset::Noon);
    }

    #[test]
    fn test_sky_colours() {
        assert_eq!(LightingPreset::Morning.sky_color(), LightingPreset::Noon.sky_color());
        assert_ne!(LightingPreset::Night.sky_color(), LightingPreset::Noon.sky_color());
        assert_ne!(LightingPreset::Evening.sky_color(), LightingPreset::Night.sky_color());
    }

    #[test]
    fn test_labels_are_unique() {
        let mut labels: Vec<_> = LightingPreset::ALL.iter().map(|p| p.label()).collect();
        labels.sort_unstable();
        labels.dedup();
        assert_eq!(labels.len(), 4);
    }
}
