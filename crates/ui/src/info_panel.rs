//! Building info panel and hover tooltip.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use campus::InteractionState;

/// Split panel text into its title line and the remaining body.
pub fn split_panel_text(text: &str) -> (&str, &str) {
    text.split_once('\n').unwrap_or((text, ""))
}

/// Panel opacity: fully opaque until the last half second.
pub fn panel_alpha(remaining: f32) -> f32 {
    (remaining / 0.5).clamp(0.0, 1.0)
}

pub fn building_info_ui(mut contexts: EguiContexts, interaction: Res<InteractionState>) {
    let Some(panel) = interaction.info_panel() else {
        return;
    };
    let (title, body) = split_panel_text(&panel.text);
    let Some(ctx) = contexts.try_ctx_mut() else {
        return;
    };

    egui::Window::new("Building")
        .id(egui::Id::new("building_info_panel"))
        .title_bar(false)
        .resizable(false)
        .anchor(egui::Align2::LEFT_TOP, egui::vec2(12.0, 12.0))
        .show(ctx, |ui| {
            ui.set_opacity(panel_alpha(panel.remaining));
            ui.heading(title);
            if !body.is_empty() {
                ui.separator();
                ui.label(body);
            }
        });
}

pub fn hover_tooltip_ui(mut contexts: EguiContexts, interaction: Res<InteractionState>) {
    let Some(building) = interaction.hovered() else {
        return;
    };
    let Some(ctx) = contexts.try_ctx_mut() else {
        return;
    };
    let Some(pointer) = ctx.pointer_hover_pos() else {
        return;
    };

    egui::Area::new(egui::Id::new("building_hover_tooltip"))
        .fixed_pos(pointer + egui::vec2(16.0, 16.0))
        .interactable(false)
        .show(ctx, |ui| {
            egui::Frame::popup(ui.style()).show(ui, |ui| {
                ui.label(building);
                ui.small("Click for details");
            });
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_title_and_body() {
        assert_eq!(
            split_panel_text("Building 3\nResearch laboratories"),
            ("Building 3", "Research laboratories")
        );
    }

    #[test]
    fn test_split_without_info() {
        assert_eq!(split_panel_text("Library\n"), ("Library", ""));
        assert_eq!(split_panel_text("Library"), ("Library", ""));
    }

    #[test]
    fn test_alpha_fades_in_last_half_second() {
        assert_eq!(panel_alpha(3.0), 1.0);
        assert_eq!(panel_alpha(0.5), 1.0);
        assert!((panel_alpha(0.25) - 0.5).abs() < 1e-6);
        assert_eq!(panel_alpha(-1.0), 0.0);
    }
}
