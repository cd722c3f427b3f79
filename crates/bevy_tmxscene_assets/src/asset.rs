//! The `.tmx` asset type.

use std::path::PathBuf;

use bevy::platform::collections::HashMap;
use bevy::prelude::*;

use crate::document::TiledMap;

/// A parsed map plus the encoded bytes of every image it draws.
///
/// Produced by [`TmxDocumentLoader`](crate::loaders::TmxDocumentLoader). Image bytes
/// are keyed by the paths returned from [`TiledMap::image_paths`], relative to the
/// asset root; decoding is left to scene assembly.
#[derive(Asset, TypePath, Debug)]
pub struct TmxDocument {
    pub map: TiledMap,
    pub images: HashMap<PathBuf, Vec<u8>>,
}
