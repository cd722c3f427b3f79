//! Global physics configuration.

use avian2d::prelude::*;
use bevy::prelude::*;

/// Physics settings shared by every spawned scene.
///
/// Read by the collider observer each time a `TileCollider` is added, so changes
/// to the resource apply to scenes spawned afterwards.
#[derive(Resource, Clone, Debug)]
pub struct PhysicsConfig {
    /// Generate colliders for tile collision boxes.
    pub enable_tile_colliders: bool,
    /// Body type inserted next to each tile collider.
    pub body_type: RigidBody,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            enable_tile_colliders: true,
            body_type: RigidBody::Static,
        }
    }
}

impl PhysicsConfig {
    pub fn with_tile_colliders(mut self, enabled: bool) -> Self {
        self.enable_tile_colliders = enabled;
        self
    }

    pub fn with_body_type(mut self, body_type: RigidBody) -> Self {
        self.body_type = body_type;
        self
    }
}
