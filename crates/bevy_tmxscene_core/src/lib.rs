//! # `bevy_tmxscene_core`
//!
//! Scene assembly for `bevy_tmxscene`. Turns a map document from
//! `bevy_tmxscene_assets` into a tree of named nodes carrying batched tile meshes,
//! atlas materials and collider boxes, then spawns that tree as entities.
//!
//! **This crate does NOT create physics bodies** - `TileCollider` components are
//! plain data; `bevy_tmxscene_avian` turns them into colliders.
//!
//! ## Pipeline
//!
//! 1. The `.tmx` asset is loaded through the asset server (or read from disk with
//!    [`load_map`](spawn::load_map)) and validated (finite, orthogonal).
//! 2. Tile collision objects are collected into a [`ColliderRegistry`](colliders::ColliderRegistry).
//! 3. Every layer is composed into a [`SceneNode`](node::SceneNode): tile layers become one
//!    batched mesh, objects are placed individually, image layers become one quad,
//!    groups recurse.
//! 4. The tree is spawned under the entity that requested it.
//!
//! Any error aborts the whole load; nothing is spawned for a failed map.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use bevy::prelude::*;
//! use bevy_tmxscene_core::prelude::*;
//!
//! fn main() {
//!     App::new()
//!         .add_plugins(DefaultPlugins)
//!         .add_plugins(TmxSceneCorePlugin::default())
//!         .add_systems(Startup, spawn_map)
//!         .run();
//! }
//!
//! fn spawn_map(mut commands: Commands, asset_server: Res<AssetServer>) {
//!     commands.spawn(Camera2d);
//!     commands
//!         .spawn(TmxScene::new(asset_server.load("maps/level1.tmx")))
//!         .observe(|trigger: On<TmxSceneLoadFailed>| {
//!             error!("{}", trigger.event().message);
//!         });
//! }
//! ```

pub mod atlas;
pub mod batch;
pub mod colliders;
pub mod components;
pub mod error;
pub mod events;
pub mod gid;
pub mod node;
pub mod plugin;
pub mod spawn;
pub mod systems;
pub mod textures;

#[cfg(test)]
pub(crate) mod fixtures;

pub mod prelude {
    //! Common imports for `bevy_tmxscene_core` users.

    pub use crate::colliders::{ColliderBox, TileCollider};
    pub use crate::components::{TmxLayer, TmxScene, TmxSceneFailed, TmxSceneRoot};
    pub use crate::error::{SceneError, SceneResult};
    pub use crate::events::{TmxSceneLoadFailed, TmxSceneSpawned};
    pub use crate::node::{MeshBinding, SceneNode};
    pub use crate::plugin::{TmxSceneConfig, TmxSceneCorePlugin};
    pub use crate::spawn::{build_scene, load_map};
    pub use crate::systems::{RespawnTmxScene, SceneContext};
    pub use crate::textures::{DocumentImageSource, FileImageSource, ImageSource, MemoryImageSource};
}

// Re-export plugin types at crate root for convenience
pub use plugin::{TmxSceneConfig, TmxSceneCorePlugin};
