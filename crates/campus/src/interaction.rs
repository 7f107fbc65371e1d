//! Pointer interaction as explicit state transitions.
//!
//! The host translates its input events into `on_hover_enter`,
//! `on_hover_leave` and `on_click` calls keyed by building name; renderers
//! and UI read the resulting state. Only one building is highlighted at a
//! time, and a click shows its info panel for [`INFO_PANEL_SECONDS`].

use bevy::prelude::*;

use crate::config::{HOVER_EMISSIVE, HOVER_EMISSIVE_INTENSITY, INFO_PANEL_SECONDS};
use crate::scene_graph::hex_to_srgb;

/// Emissive override applied to every section of a hovered building.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Highlight {
    pub emissive: [f32; 3],
    pub intensity: f32,
}

impl Highlight {
    pub fn hover() -> Self {
        Self {
            emissive: hex_to_srgb(HOVER_EMISSIVE),
            intensity: HOVER_EMISSIVE_INTENSITY,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InfoPanel {
    pub building: String,
    pub text: String,
    /// Seconds until the panel hides itself.
    pub remaining: f32,
}

#[derive(Resource, Debug, Default)]
pub struct InteractionState {
    hovered: Option<String>,
    info: Option<InfoPanel>,
}

impl InteractionState {
    /// Pointer entered `building`. Any previous hover is dropped first.
    pub fn on_hover_enter(&mut self, building: &str) {
        if self.hovered.as_deref() != Some(building) {
            self.hovered = Some(building.to_string());
        }
    }

    /// Pointer left `building`. A stale leave for some other building is
    /// ignored.
    pub fn on_hover_leave(&mut self, building: &str) {
        if self.hovered.as_deref() == Some(building) {
            self.hovered = None;
        }
    }

    /// Show `name\ninfo` for the clicked building, restarting the timer.
    pub fn on_click(&mut self, building: &str, info: &str) {
        self.info = Some(InfoPanel {
            building: building.to_string(),
            text: format!("{building}\n{info}"),
            remaining: INFO_PANEL_SECONDS,
        });
    }

    /// Count down the info panel; hides it once the timer runs out.
    pub fn tick(&mut self, dt: f32) {
        if !dt.is_finite() || dt <= 0.0 {
            return;
        }
        if let Some(panel) = self.info.as_mut() {
            panel.remaining -= dt;
            if panel.remaining <= 0.0 {
                self.info = None;
            }
        }
    }

    pub fn hovered(&self) -> Option<&str> {
        self.hovered.as_deref()
    }

    pub fn info_panel(&self) -> Option<&InfoPanel> {
        self.info.as_ref()
    }

    /// Highlight to apply to `building`, or `None` for its normal look.
    pub fn highlight(&self, building: &str) -> Option<Highlight> {
        (self.hovered.as_deref() == Some(building)).then(Highlight::hover)
    }
}

pub fn tick_interaction(time: Res<Time>, mut state: ResMut<InteractionState>) {
    state.tick(time.delta_secs());
}
