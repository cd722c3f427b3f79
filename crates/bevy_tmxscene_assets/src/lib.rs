//! # `bevy_tmxscene_assets`
//!
//! Layer 1 of `bevy_tmxscene`: reads `.tmx` files with the `tiled` crate and converts
//! them into a small, read-only document model that scene assembly consumes.
//!
//! Maps are loaded either as Bevy assets ([`TmxDocument`] through
//! [`TmxSceneAssetsPlugin`]), with every dependency read through the asset server,
//! or directly from disk with [`load_tmx_document`].
//!
//! Tile references are kept as packed global ids with their flip flags, so the
//! model matches what Tiled writes to disk regardless of how `tiled` resolves them.
//!
//! ```rust,no_run
//! use bevy_tmxscene_assets::prelude::*;
//!
//! let map = load_tmx_document("assets/maps/level1.tmx").unwrap();
//! for layer in &map.layers {
//!     println!("{}", layer.name());
//! }
//! ```

pub mod asset;
pub mod document;
pub mod gid;
pub mod loaders;
pub mod plugin;

pub mod prelude {
    //! Common imports for `bevy_tmxscene_assets` users.

    pub use crate::document::{
        GroupLayer, ImageLayer, Layer, ObjectLayer, ObjectShape, Orientation, TileLayer,
        TileMetadata, TiledMap, TiledObject, Tileset,
    };
    pub use crate::asset::TmxDocument;
    pub use crate::loaders::{DocumentError, load_tmx_document};
    pub use crate::plugin::TmxSceneAssetsPlugin;
}

pub use asset::TmxDocument;
pub use loaders::{DocumentError, load_tmx_document};
pub use plugin::TmxSceneAssetsPlugin;
