//! Plugin for `Avian2D` physics integration.

use bevy::prelude::*;

use crate::colliders;
use crate::config::PhysicsConfig;

/// Plugin that integrates `Avian2D` physics with `bevy_tmxscene`.
///
/// This plugin:
/// - Registers the [`PhysicsConfig`] resource for global configuration
/// - Adds an observer turning `TileCollider` components into static colliders
///
/// # Example
///
/// ```rust,no_run
/// use bevy::prelude::*;
/// use bevy_tmxscene_avian::{TmxSceneAvianPlugin, PhysicsConfig};
/// use avian2d::prelude::*;
///
/// App::new()
///     .add_plugins(DefaultPlugins)
///     .add_plugins(PhysicsPlugins::default())
///     .add_plugins(TmxSceneAvianPlugin::new(
///         PhysicsConfig::default().with_body_type(RigidBody::Kinematic),
///     ))
///     .run();
/// ```
#[derive(Default)]
pub struct TmxSceneAvianPlugin {
    /// Physics configuration
    pub config: PhysicsConfig,
}

impl TmxSceneAvianPlugin {
    /// Create a new plugin with custom configuration.
    pub fn new(config: PhysicsConfig) -> Self {
        Self { config }
    }
}

impl Plugin for TmxSceneAvianPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(self.config.clone());

        // The observer reads the resource, so toggling it at runtime takes effect
        app.add_observer(colliders::on_tile_collider_added);

        info!("TmxSceneAvianPlugin initialized");
    }
}
