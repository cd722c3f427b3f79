//! Tile collider generation.

use avian2d::prelude::*;
use bevy::prelude::*;
use bevy_tmxscene_core::colliders::TileCollider;

use crate::config::PhysicsConfig;

/// Observer that gives every new [`TileCollider`] a physics body.
///
/// All boxes of the tile become one compound collider on the same entity. The box
/// depth has no 2D counterpart and is dropped.
pub fn on_tile_collider_added(
    trigger: On<Add, TileCollider>,
    colliders: Query<&TileCollider>,
    config: Res<PhysicsConfig>,
    mut commands: Commands,
) {
    if !config.enable_tile_colliders {
        return;
    }

    let entity = trigger.event().entity;
    let Ok(tile_collider) = colliders.get(entity) else {
        return;
    };

    let shapes = collider_shapes(tile_collider);
    if shapes.is_empty() {
        return;
    }

    debug!(
        "Generated compound collider with {} shape(s) for {:?}",
        shapes.len(),
        entity
    );
    commands
        .entity(entity)
        .insert((config.body_type, Collider::compound(shapes)));
}

/// One rectangle per box, centred on the box in the entity's local space.
pub fn collider_shapes(tile_collider: &TileCollider) -> Vec<(Vec2, f32, Collider)> {
    tile_collider
        .boxes
        .iter()
        .map(|collision_box| {
            let size = collision_box.size();
            (
                collision_box.center().truncate(),
                0.0,
                Collider::rectangle(size.x, size.y),
            )
        })
        .collect()
}
