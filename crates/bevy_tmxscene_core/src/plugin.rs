//! Plugin for `bevy_tmxscene_core`.

use bevy::prelude::*;
use bevy_tmxscene_assets::TmxSceneAssetsPlugin;

use crate::colliders::TileCollider;
use crate::components::{TmxLayer, TmxScene, TmxSceneFailed, TmxSceneRoot};
use crate::systems::spawn_requested_scenes;

/// Configuration for scene assembly.
///
/// # Example
///
/// ```rust,no_run
/// use bevy::prelude::*;
/// use bevy_tmxscene_core::{TmxSceneConfig, TmxSceneCorePlugin};
///
/// App::new()
///     .add_plugins(TmxSceneCorePlugin::new(
///         TmxSceneConfig::default().with_collider_depth(16.0),
///     ));
/// ```
#[derive(Resource, Debug, Clone)]
pub struct TmxSceneConfig {
    /// Extent of tile collider boxes perpendicular to the map plane
    pub collider_depth: f32,
    /// Sample atlases and image layers with nearest-neighbour filtering
    pub nearest_sampling: bool,
    /// Z distance between consecutive content layers.
    ///
    /// Groups don't take a slot, only the tile, object and image layers inside them.
    pub layer_z_step: f32,
}

impl Default for TmxSceneConfig {
    fn default() -> Self {
        Self {
            collider_depth: 32.0,
            nearest_sampling: true,
            layer_z_step: 1.0,
        }
    }
}

impl TmxSceneConfig {
    pub fn with_collider_depth(mut self, depth: f32) -> Self {
        self.collider_depth = depth;
        self
    }

    pub fn with_nearest_sampling(mut self, nearest: bool) -> Self {
        self.nearest_sampling = nearest;
        self
    }

    pub fn with_layer_z_step(mut self, step: f32) -> Self {
        self.layer_z_step = step;
        self
    }
}

/// Plugin that turns [`TmxScene`] requests into spawned hierarchies.
///
/// # Example
///
/// ```rust,no_run
/// use bevy::prelude::*;
/// use bevy_tmxscene_core::prelude::*;
///
/// App::new()
///     .add_plugins(DefaultPlugins)
///     .add_plugins(TmxSceneCorePlugin::default())
///     .add_systems(Startup, |mut commands: Commands, asset_server: Res<AssetServer>| {
///         commands.spawn(Camera2d);
///         commands.spawn(TmxScene::new(asset_server.load("maps/level1.tmx")));
///     })
///     .run();
/// ```
#[derive(Default)]
pub struct TmxSceneCorePlugin {
    config: TmxSceneConfig,
}

impl TmxSceneCorePlugin {
    /// Create a new plugin with custom configuration.
    pub fn new(config: TmxSceneConfig) -> Self {
        Self { config }
    }
}

impl Plugin for TmxSceneCorePlugin {
    fn build(&self, app: &mut App) {
        if !app.is_plugin_added::<TmxSceneAssetsPlugin>() {
            app.add_plugins(TmxSceneAssetsPlugin);
        }
        app.insert_resource(self.config.clone());

        app.register_type::<TmxScene>()
            .register_type::<TmxSceneRoot>()
            .register_type::<TmxSceneFailed>()
            .register_type::<TmxLayer>()
            .register_type::<TileCollider>();

        // Runs before user systems so spawned scenes are visible the same frame
        app.add_systems(PreUpdate, spawn_requested_scenes);
    }
}
