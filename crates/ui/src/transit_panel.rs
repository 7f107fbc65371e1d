//! Transit statistics and the lighting preset selector.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use campus::transit::{AgentKind, TransitStats};
use campus::TransitAnimator;
use rendering::lighting::LightingPreset;

#[derive(Resource)]
pub struct TransitPanelVisible(pub bool);

impl Default for TransitPanelVisible {
    fn default() -> Self {
        Self(true)
    }
}

/// Live agent counts by kind: `(monorail, vehicles, pedestrians)`.
pub fn live_counts(kinds: impl Iterator<Item = AgentKind>) -> (usize, usize, usize) {
    kinds.fold((0, 0, 0), |(m, v, p), kind| match kind {
        AgentKind::Monorail => (m + 1, v, p),
        AgentKind::Vehicle => (m, v + 1, p),
        AgentKind::Pedestrian => (m, v, p + 1),
    })
}

pub fn stats_rows(stats: &TransitStats) -> [(&'static str, u32); 5] {
    [
        ("Pedestrians spawned", stats.pedestrians_spawned),
        ("Pedestrians arrived", stats.pedestrians_arrived),
        ("Vehicles spawned", stats.vehicles_spawned),
        ("Vehicles exited", stats.vehicles_exited),
        ("Rejected spawns", stats.rejected_spawns),
    ]
}

pub fn transit_panel_ui(
    mut contexts: EguiContexts,
    visible: Res<TransitPanelVisible>,
    animator: Res<TransitAnimator>,
    mut lighting: ResMut<LightingPreset>,
) {
    if !visible.0 {
        return;
    }
    let Some(ctx) = contexts.try_ctx_mut() else {
        return;
    };
    let (monorail, vehicles, pedestrians) = live_counts(animator.agents().map(|a| a.kind));
    let stats = animator.stats();

    egui::Window::new("Campus")
        .default_width(240.0)
        .anchor(egui::Align2::RIGHT_TOP, egui::vec2(-12.0, 12.0))
        .show(ctx, |ui| {
            ui.label(format!("Elapsed: {:.0} s", animator.elapsed()));
            egui::Grid::new("transit_live").num_columns(2).show(ui, |ui| {
                ui.label("Monorail:");
                ui.label(if monorail > 0 { "running" } else { "none" });
                ui.end_row();
                ui.label("Vehicles:");
                ui.label(vehicles.to_string());
                ui.end_row();
                ui.label("Pedestrians:");
                ui.label(pedestrians.to_string());
                ui.end_row();
                ui.label("Pending spawns:");
                ui.label(animator.pending().len().to_string());
                ui.end_row();
            });

            ui.collapsing("Totals", |ui| {
                egui::Grid::new("transit_totals").num_columns(2).show(ui, |ui| {
                    for (label, value) in stats_rows(&stats) {
                        ui.label(label);
                        ui.label(value.to_string());
                        ui.end_row();
                    }
                });
            });

            ui.separator();
            ui.label("Lighting");
            ui.horizontal(|ui| {
                let mut selected = *lighting;
                for preset in LightingPreset::ALL {
                    ui.selectable_value(&mut selected, preset, preset.label());
                }
                if selected != *lighting {
                    *lighting = selected;
                }
            });
        });
}

/// `T` toggles the transit panel.
pub fn panel_keybinds(keys: Res<ButtonInput<KeyCode>>, mut visible: ResMut<TransitPanelVisible>) {
    if keys.just_pressed(KeyCode::KeyT) {
        visible.0 = !visible.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_live_counts_by_kind() {
        let kinds = [
            AgentKind::Monorail,
            AgentKind::Vehicle,
            AgentKind::Vehicle,
            AgentKind::Pedestrian,
        ];
        assert_eq!(live_counts(kinds.into_iter()), (1, 2, 1));
        assert_eq!(live_counts(std::iter::empty()), (0, 0, 0));
    }

    #[test]
    fn test_stats_rows_follow_counters() {
        let stats = TransitStats {
            pedestrians_spawned: 4,
            rejected_spawns: 2,
            ..Default::default()
        };
        let rows = stats_rows(&stats);
        assert_eq!(rows[0], ("Pedestrians spawned", 4));
        assert_eq!(rows[4], ("Rejected spawns", 2));
    }
}
