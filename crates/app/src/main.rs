use bevy::prelude::*;
use bevy::window::PresentMode;

use campus::{CampusPlugin, CampusRng, SiteConfig};

mod settings;

use settings::ViewerSettings;

fn main() -> AppExit {
    let settings = match ViewerSettings::from_env() {
        Ok(settings) => settings,
        Err(err) => {
            eprintln!("campus-viewer: {err}");
            return AppExit::error();
        }
    };

    let site = match &settings.layout {
        Some(path) => match SiteConfig::load(path) {
            Ok(site) => site,
            Err(err) => {
                eprintln!("campus-viewer: {}: {err}", path.display());
                return AppExit::error();
            }
        },
        None => SiteConfig::default(),
    };

    let capturing = settings.capture.is_some();
    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Ariake Campus".to_string(),
            resolution: (1920.0, 1080.0).into(),
            present_mode: PresentMode::AutoVsync,
            ..default()
        }),
        ..default()
    }))
    .insert_resource(site);

    if let Some(seed) = settings.seed {
        app.insert_resource(CampusRng::from_seed_u64(seed));
    }

    app.add_plugins((
        CampusPlugin,
        rendering::RenderingPlugin {
            capture: settings.capture,
        },
    ));

    // Captures show the bare scene.
    if !capturing {
        app.add_plugins(ui::UiPlugin);
    }

    app.run()
}
