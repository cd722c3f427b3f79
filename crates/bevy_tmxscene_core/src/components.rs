//! Components attached to spawned scenes.

use bevy::prelude::*;
use bevy_tmxscene_assets::TmxDocument;

/// Request to spawn a `.tmx` map as a child hierarchy of this entity.
///
/// The map is assembled as soon as its asset has finished loading.
///
/// # Example
///
/// ```rust,no_run
/// use bevy::prelude::*;
/// use bevy_tmxscene_core::prelude::*;
///
/// fn spawn_level(mut commands: Commands, asset_server: Res<AssetServer>) {
///     commands.spawn(TmxScene::new(asset_server.load("maps/level1.tmx")));
/// }
/// ```
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
#[require(Transform, Visibility)]
pub struct TmxScene {
    pub handle: Handle<TmxDocument>,
}

impl TmxScene {
    pub fn new(handle: Handle<TmxDocument>) -> Self {
        Self { handle }
    }
}

/// Marker for a request entity whose map has been spawned.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct TmxSceneRoot;

/// Marker for a request entity whose map failed to load.
#[derive(Component, Debug, Clone, Default, Reflect)]
#[reflect(Component)]
pub struct TmxSceneFailed {
    pub message: String,
}

/// Kind of map layer a spawned node represents.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub enum TmxLayer {
    Tiles,
    Objects,
    Image,
    Group,
}
