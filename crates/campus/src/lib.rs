use bevy::prelude::*;

pub mod buildings;
pub mod campus_rng;
pub mod campus_scene;
pub mod campus_sets;
pub mod config;
pub mod error;
pub mod ground;
pub mod interaction;
pub mod layout_tables;
pub mod scene_context;
pub mod scene_graph;
pub mod site_layout;
pub mod transit;

#[cfg(test)]
mod integration_tests;
#[cfg(any(test, feature = "bench"))]
pub mod test_harness;

pub use campus_rng::CampusRng;
pub use campus_scene::{build_scene, CampusScene};
pub use campus_sets::CampusSet;
pub use error::CampusError;
pub use interaction::InteractionState;
pub use layout_tables::SiteConfig;
pub use scene_context::SceneContext;
pub use scene_graph::{NodeTag, SceneNode, Shape, SurfaceMaterial};
pub use transit::TransitAnimator;

/// Core campus plugin: layout tables, scene build, transit and interaction
/// state. Rendering-free, so it runs under `MinimalPlugins` as well.
///
/// Insert a `SiteConfig` or `CampusRng` before adding the plugin to override
/// the defaults.
pub struct CampusPlugin;

impl Plugin for CampusPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SiteConfig>()
            .init_resource::<CampusRng>()
            .init_resource::<InteractionState>()
            .init_resource::<SceneContext>()
            .init_resource::<CampusScene>()
            .init_resource::<TransitAnimator>()
            .add_systems(Startup, init_campus.in_set(CampusSet::Build))
            .add_systems(
                Update,
                (transit::advance_transit, interaction::tick_interaction).in_set(CampusSet::Simulate),
            );
        campus_sets::configure_sets(app);
    }
}

/// Build the static scene and seed the animator from the layout tables.
pub fn init_campus(world: &mut World) {
    let config = world.resource::<SiteConfig>().clone();
    let scene = build_scene(&config);
    let animator = {
        let mut rng = world.resource_mut::<CampusRng>();
        TransitAnimator::new(config.transit, &mut rng.0)
    };
    world.insert_resource(scene);
    world.insert_resource(animator);
}
