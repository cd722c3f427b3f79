//! Per-tile collision shapes extracted from tileset metadata.

use bevy::platform::collections::HashMap;
use bevy::prelude::*;
use bevy_tmxscene_assets::document::{ObjectShape, Tileset};

use crate::error::{SceneError, SceneResult};

/// Axis-aligned box in the local space of the node it is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct ColliderBox {
    pub min: Vec3,
    pub max: Vec3,
}

impl ColliderBox {
    /// Box for a `width × height` rectangle whose top face sits at the origin,
    /// extending `depth` perpendicular to the map plane.
    pub fn from_rectangle(width: f32, height: f32, depth: f32) -> Self {
        Self {
            min: Vec3::new(0.0, -height, -depth / 2.0),
            max: Vec3::new(width, 0.0, depth / 2.0),
        }
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) / 2.0
    }
}

/// Collision shapes of one tile, attached to the node that places it.
///
/// Physics integrations turn this into real colliders.
#[derive(Component, Debug, Clone, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct TileCollider {
    pub boxes: Vec<ColliderBox>,
}

/// Tile colliders keyed by global tile id.
///
/// Filled once per map before any layer is built, then only read.
#[derive(Debug, Default)]
pub struct ColliderRegistry {
    colliders: HashMap<u32, TileCollider>,
}

impl ColliderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a collider for every tile of `tileset` that has a collision group.
    ///
    /// Fails on the first shape that is not a rectangle.
    pub fn load_colliders(&mut self, tileset: &Tileset, depth: f32) -> SceneResult<()> {
        for (local_id, tile) in &tileset.tiles {
            let Some(objects) = tile.objects.as_ref() else {
                continue;
            };

            let boxes = objects
                .iter()
                .map(|object| match object.shape {
                    ObjectShape::Rectangle { width, height } => {
                        Ok(ColliderBox::from_rectangle(width, height, depth))
                    }
                    ref other => Err(SceneError::Unsupported(format!(
                        "{} collider on tile {} of tileset '{}'",
                        other.kind(),
                        local_id,
                        tileset.name
                    ))),
                })
                .collect::<SceneResult<Vec<_>>>()?;

            let gid = tileset.first_gid + local_id;
            debug!("Registered {} collider box(es) for gid {}", boxes.len(), gid);
            self.colliders.insert(gid, TileCollider { boxes });
        }
        Ok(())
    }

    /// Collider registered for a clean gid.
    pub fn get_collider(&self, gid: u32) -> Option<&TileCollider> {
        self.colliders.get(&gid)
    }

    pub fn len(&self) -> usize {
        self.colliders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colliders.is_empty()
    }
}
