use bevy::prelude::*;
use bevy_egui::EguiPlugin;

use campus::CampusSet;

pub mod info_panel;
pub mod transit_panel;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(EguiPlugin)
            .init_resource::<transit_panel::TransitPanelVisible>()
            .add_systems(
                Update,
                (
                    info_panel::building_info_ui,
                    info_panel::hover_tooltip_ui,
                    transit_panel::transit_panel_ui,
                    transit_panel::panel_keybinds,
                )
                    .after(CampusSet::Simulate),
            );
    }
}
