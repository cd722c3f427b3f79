//! Entity events fired on `TmxScene` request entities.

use bevy::prelude::*;

/// Fired when a requested map has been assembled and its hierarchy spawned.
///
/// # Example
///
/// ```rust,no_run
/// use bevy::prelude::*;
/// use bevy_tmxscene_core::prelude::*;
///
/// fn setup(mut commands: Commands, asset_server: Res<AssetServer>) {
///     commands
///         .spawn(TmxScene::new(asset_server.load("maps/level1.tmx")))
///         .observe(|trigger: On<TmxSceneSpawned>| {
///             info!("Map ready: {:?}", trigger.event().entity);
///         });
/// }
/// ```
#[derive(EntityEvent, Debug, Clone)]
pub struct TmxSceneSpawned {
    /// The request entity the scene was spawned under
    #[event_target]
    pub entity: Entity,
}

/// Fired when a requested map could not be loaded. Nothing is spawned.
#[derive(EntityEvent, Debug, Clone)]
pub struct TmxSceneLoadFailed {
    #[event_target]
    pub entity: Entity,
    pub message: String,
}
