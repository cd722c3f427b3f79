//! Map-level assembly: validation, tileset lookup and the root node.

use std::path::{Path, PathBuf};

use bevy::prelude::*;
use bevy_tmxscene_assets::document::{Orientation, TiledMap, Tileset};
use bevy_tmxscene_assets::load_tmx_document;

use crate::colliders::ColliderRegistry;
use crate::error::{SceneError, SceneResult};
use crate::gid::clean_gid;
use crate::node::SceneNode;
use crate::plugin::TmxSceneConfig;
use crate::spawn::compose_layer;
use crate::systems::SceneContext;

/// Reject maps this crate cannot assemble.
pub fn validate_map(map: &TiledMap) -> SceneResult<()> {
    if map.infinite {
        return Err(SceneError::Unsupported(format!(
            "cannot load infinite map '{}'",
            map.source.display()
        )));
    }
    if map.orientation != Orientation::Orthogonal {
        return Err(SceneError::Unsupported(format!(
            "unsupported map orientation '{}'",
            map.orientation.as_str()
        )));
    }
    Ok(())
}

/// Drives layer composition for one map.
pub struct MapAssembler<'m> {
    pub map: &'m TiledMap,
    pub config: &'m TmxSceneConfig,
    colliders: ColliderRegistry,
    z_counter: usize,
}

impl<'m> MapAssembler<'m> {
    pub fn new(map: &'m TiledMap, config: &'m TmxSceneConfig) -> Self {
        Self {
            map,
            config,
            colliders: ColliderRegistry::new(),
            z_counter: 0,
        }
    }

    /// Tileset owning `gid`; flip flags are ignored.
    pub fn find_source(&self, gid: u32) -> SceneResult<&'m Tileset> {
        let gid = clean_gid(gid);
        self.map
            .tilesets
            .values()
            .find(|tileset| tileset.contains(gid))
            .ok_or(SceneError::Lookup { gid })
    }

    /// Fill the collider registry from every tileset of the map.
    pub fn load_tile_colliders(&mut self) -> SceneResult<()> {
        for tileset in self.map.tilesets.values() {
            self.colliders
                .load_colliders(tileset, self.config.collider_depth)?;
        }
        debug!("Collider registry holds {} tile(s)", self.colliders.len());
        Ok(())
    }

    pub fn colliders(&self) -> &ColliderRegistry {
        &self.colliders
    }

    /// Map tile size in pixels.
    pub fn tile_size(&self) -> Vec2 {
        Vec2::new(self.map.tile_width as f32, self.map.tile_height as f32)
    }

    /// Resolve a path relative to the map file's directory.
    pub fn resolve_path(&self, relative: &Path) -> PathBuf {
        self.map.resolve(relative)
    }

    /// Z offset for the next content layer.
    pub(crate) fn next_layer_z(&mut self) -> f32 {
        let z = self.z_counter as f32 * self.config.layer_z_step;
        self.z_counter += 1;
        z
    }

    /// Validate, register colliders and compose every top-level layer under one root.
    pub fn load_map(&mut self, ctx: &mut SceneContext) -> SceneResult<SceneNode> {
        validate_map(self.map)?;
        self.load_tile_colliders()?;

        let map = self.map;
        let mut root = SceneNode::new(map.name());
        for layer in &map.layers {
            let node = compose_layer(self, layer, ctx)?;
            root.attach(node);
        }
        Ok(root)
    }
}

/// Assemble an already loaded document.
pub fn build_scene(
    map: &TiledMap,
    ctx: &mut SceneContext,
    config: &TmxSceneConfig,
) -> SceneResult<SceneNode> {
    MapAssembler::new(map, config).load_map(ctx)
}

/// Read a `.tmx` file and assemble it.
pub fn load_map(
    path: impl AsRef<Path>,
    ctx: &mut SceneContext,
    config: &TmxSceneConfig,
) -> SceneResult<SceneNode> {
    let map = load_tmx_document(path)?;
    let root = build_scene(&map, ctx, config)?;
    info!(
        "Assembled map '{}' ({} atlas texture(s))",
        root.name,
        ctx.atlas_count()
    );
    Ok(root)
}
