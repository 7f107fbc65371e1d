//! Pointer picking for buildings.
//!
//! The cursor ray is tested against every section box; the nearest hit
//! drives `InteractionState` hover and click transitions. The highlight the
//! state asks for is then written into the section materials.

use bevy::prelude::*;
use bevy_egui::EguiContexts;

use campus::{InteractionState, SceneContext, SiteConfig};

use crate::scene_spawn::{emissive_nits, BuildingSection};

/// Distance along the ray to the first hit on an axis-aligned box, or
/// `None` on a miss. Origins inside the box hit at 0.
pub fn ray_box_distance(origin: Vec3, dir: Vec3, min: Vec3, max: Vec3) -> Option<f32> {
    let mut near = 0.0_f32;
    let mut far = f32::INFINITY;
    for axis in 0..3 {
        let (o, d, lo, hi) = (origin[axis], dir[axis], min[axis], max[axis]);
        if d.abs() < 1e-8 {
            if o < lo || o > hi {
                return None;
            }
            continue;
        }
        let (t0, t1) = ((lo - o) / d, (hi - o) / d);
        near = near.max(t0.min(t1));
        far = far.min(t0.max(t1));
        if near > far {
            return None;
        }
    }
    Some(near)
}

/// True while egui owns the pointer, so clicks on panels don't reach the
/// campus underneath.
fn pointer_over_ui(contexts: &mut EguiContexts) -> bool {
    contexts
        .try_ctx_mut()
        .is_some_and(|ctx| ctx.wants_pointer_input() || ctx.is_pointer_over_area())
}

/// Hover and click handling for building sections.
#[allow(clippy::too_many_arguments)]
pub fn pick_building(
    windows: Query<&Window>,
    cameras: Query<(&Camera, &GlobalTransform)>,
    sections: Query<(&BuildingSection, &GlobalTransform)>,
    buttons: Res<ButtonInput<MouseButton>>,
    context: Res<SceneContext>,
    config: Res<SiteConfig>,
    mut interaction: ResMut<InteractionState>,
    mut contexts: EguiContexts,
) {
    let Ok(window) = windows.get_single() else {
        return;
    };
    let Ok(camera_entity) = context.camera() else {
        return;
    };
    let Ok((camera, camera_transform)) = cameras.get(camera_entity) else {
        return;
    };

    let hit = if pointer_over_ui(&mut contexts) {
        None
    } else {
        window
            .cursor_position()
            .and_then(|cursor| camera.viewport_to_world(camera_transform, cursor).ok())
            .and_then(|ray| {
                sections
                    .iter()
                    .filter_map(|(section, transform)| {
                        let center = transform.translation();
                        ray_box_distance(
                            ray.origin,
                            *ray.direction,
                            center - section.half_extents,
                            center + section.half_extents,
                        )
                        .map(|t| (t, section.building.as_str()))
                    })
                    .min_by(|a, b| a.0.total_cmp(&b.0))
                    .map(|(_, building)| building.to_string())
            })
    };

    let previous = interaction.hovered().map(str::to_string);
    if previous != hit {
        if let Some(old) = previous {
            interaction.on_hover_leave(&old);
        }
        if let Some(new) = &hit {
            interaction.on_hover_enter(new);
        }
    }

    if buttons.just_pressed(MouseButton::Left) {
        if let Some(building) = &hit {
            let info = config.building(building).map_or("", |spec| spec.info.as_str());
            interaction.on_click(building, info);
        }
    }
}

/// Write the hover emissive into section materials when the hovered
/// building changes.
pub fn apply_hover_highlight(
    interaction: Res<InteractionState>,
    sections: Query<(&BuildingSection, &MeshMaterial3d<StandardMaterial>)>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut last: Local<Option<String>>,
) {
    let current = interaction.hovered().map(str::to_string);
    if *last == current {
        return;
    }
    for (section, handle) in &sections {
        let touched = [last.as_deref(), current.as_deref()].contains(&Some(section.building.as_str()));
        if !touched {
            continue;
        }
        let emissive = interaction
            .highlight(&section.building)
            .map_or(section.base_emissive, |h| emissive_nits(h.emissive, h.intensity));
        if let Some(material) = materials.get_mut(&handle.0) {
            material.emissive = emissive;
        }
    }
    *last = current;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ray_hits_box_front_face() {
        let t = ray_box_distance(
            Vec3::new(0.0, 5.0, 100.0),
            Vec3::NEG_Z,
            Vec3::new(-10.0, 0.0, -10.0),
            Vec3::new(10.0, 20.0, 10.0),
        );
        assert_eq!(t, Some(90.0));
    }

    #[test]
    fn test_ray_misses_box_beside_it() {
        let t = ray_box_distance(
            Vec3::new(50.0, 5.0, 100.0),
            Vec3::NEG_Z,
            Vec3::new(-10.0, 0.0, -10.0),
            Vec3::new(10.0, 20.0, 10.0),
        );
        assert!(t.is_none());
    }

    #[test]
    fn test_ray_pointing_away_misses() {
        let t = ray_box_distance(
            Vec3::new(0.0, 5.0, 100.0),
            Vec3::Z,
            Vec3::new(-10.0, 0.0, -10.0),
            Vec3::new(10.0, 20.0, 10.0),
        );
        assert!(t.is_none());
    }

    #[test]
    fn test_origin_inside_box_hits_at_zero() {
        let t = ray_box_distance(Vec3::ZERO, Vec3::X, Vec3::splat(-1.0), Vec3::splat(1.0));
        assert_eq!(t, Some(0.0));
    }

    #[test]
    fn test_diagonal_ray_from_above() {
        let dir = Vec3::new(0.0, -1.0, -1.0).normalize();
        let t = ray_box_distance(
            Vec3::new(0.0, 30.0, 30.0),
            dir,
            Vec3::new(-5.0, 0.0, -5.0),
            Vec3::new(5.0, 10.0, 5.0),
        )
        .unwrap();
        // Enters through the near z face, halfway up.
        let hit = Vec3::new(0.0, 30.0, 30.0) + dir * t;
        assert!((hit.z - 5.0).abs() < 1e-3);
        assert!((hit.y - 5.0).abs() < 1e-3);
    }
}
