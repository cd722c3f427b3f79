//! Adapter from the `tiled` crate's map representation to the document model.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use bevy::asset::io::Reader;
use bevy::asset::{AssetLoader, LoadContext, ReadAssetBytesError};
use bevy::log::{debug, info};
use bevy::math::Vec2;
use bevy::platform::collections::HashMap;
use bevy::tasks::ConditionalSendFuture;
use normalize_path::NormalizePath;
use thiserror::Error;
use tiled::{LayerType, TilesetLocation};

use crate::asset::TmxDocument;
use crate::document::{
    GroupLayer, ImageLayer, Layer, ObjectLayer, ObjectShape, Orientation, TileLayer,
    TileMetadata, TiledMap, TiledObject, Tileset,
};
use crate::gid::{FLIPPED_DIAGONALLY_FLAG, FLIPPED_HORIZONTALLY_FLAG, FLIPPED_VERTICALLY_FLAG};
use crate::loaders::reader::{ParseStep, PreloadedFiles, parse_preloaded};

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Failed to load map: {0}")]
    TiledError(#[from] tiled::Error),

    #[error("Unsupported map content: {0}")]
    Unsupported(String),
}

/// Asset loader for `.tmx` files.
///
/// Everything the map needs goes through Bevy's asset I/O, so paths resolve
/// against the asset root:
/// - the map itself
/// - external tilesets (`.tsx`) and templates, fetched as `tiled` asks for them
/// - tileset atlases and image layer images, stored as raw bytes
#[derive(Default)]
pub struct TmxDocumentLoader;

#[derive(Debug, Error)]
pub enum TmxLoaderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read map dependency: {0}")]
    Dependency(#[from] ReadAssetBytesError),

    #[error(transparent)]
    Document(#[from] DocumentError),
}

impl AssetLoader for TmxDocumentLoader {
    type Asset = TmxDocument;
    type Settings = ();
    type Error = TmxLoaderError;

    fn load(
        &self,
        reader: &mut dyn Reader,
        _settings: &Self::Settings,
        load_context: &mut LoadContext,
    ) -> impl ConditionalSendFuture<Output = Result<Self::Asset, Self::Error>> {
        async move {
            let path = load_context.asset_path().path().to_path_buf();

            let mut bytes = Vec::new();
            reader.read_to_end(&mut bytes).await?;
            let mut files = PreloadedFiles::new();
            files.insert(path.clone(), bytes);

            // Each round adds one file, so this ends once every dependency is present
            let map = loop {
                match parse_preloaded(&path, &files)? {
                    ParseStep::Done(map) => break map,
                    ParseStep::NeedsFile(missing) => {
                        debug!("Fetching '{}' for map '{}'", missing.display(), path.display());
                        let bytes = load_context.read_asset_bytes(missing.normalize()).await?;
                        files.insert(missing, bytes);
                    }
                }
            };

            let mut images = HashMap::default();
            for image in map.image_paths() {
                if images.contains_key(&image) {
                    continue;
                }
                let bytes = load_context.read_asset_bytes(image.clone()).await?;
                images.insert(image, bytes);
            }

            info!(
                "Loaded map asset '{}' ({} file(s), {} image(s))",
                path.display(),
                files.len(),
                images.len()
            );
            Ok(TmxDocument { map, images })
        }
    }

    fn extensions(&self) -> &[&str] {
        &["tmx"]
    }
}

/// Parse a `.tmx` file from disk into a [`TiledMap`].
///
/// External tilesets (`.tsx`) and templates are resolved by the `tiled` loader
/// relative to the map file.
pub fn load_tmx_document(path: impl AsRef<Path>) -> Result<TiledMap, DocumentError> {
    let path = path.as_ref();
    let mut loader = tiled::Loader::new();
    let map = loader.load_tmx_map(path)?;

    let document = document_from_map(&map, path)?;
    info!(
        "Loaded map '{}' ({} tilesets, {} top-level layers)",
        path.display(),
        document.tilesets.len(),
        document.layers.len()
    );
    Ok(document)
}

/// Convert an already parsed `tiled::Map`.
///
/// `tiled` resolves every tile reference to a `(tileset_index, local_id)` pair, so
/// firstgids are reassigned contiguously in tileset order and tile references are
/// packed back into flagged gids.
pub fn document_from_map(map: &tiled::Map, source: &Path) -> Result<TiledMap, DocumentError> {
    let map_dir = source.parent().unwrap_or_else(|| Path::new(""));

    let mut first_gids = Vec::with_capacity(map.tilesets().len());
    let mut tilesets = BTreeMap::new();
    let mut current_gid = 1u32; // GIDs start at 1

    for tileset in map.tilesets() {
        first_gids.push(current_gid);
        tilesets.insert(current_gid, convert_tileset(tileset, current_gid, map_dir)?);
        current_gid += tileset.tilecount;
    }

    let converter = LayerConverter {
        first_gids: &first_gids,
        map_dir,
    };
    let layers = map
        .layers()
        .map(|layer| converter.convert(&layer))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(TiledMap {
        source: source.to_path_buf(),
        orientation: convert_orientation(map.orientation),
        infinite: map.infinite(),
        width: map.width,
        height: map.height,
        tile_width: map.tile_width,
        tile_height: map.tile_height,
        tilesets,
        layers,
    })
}

fn convert_orientation(orientation: tiled::Orientation) -> Orientation {
    match orientation {
        tiled::Orientation::Orthogonal => Orientation::Orthogonal,
        tiled::Orientation::Isometric => Orientation::Isometric,
        tiled::Orientation::Staggered => Orientation::Staggered,
        tiled::Orientation::Hexagonal => Orientation::Hexagonal,
    }
}

fn convert_tileset(
    tileset: &tiled::Tileset,
    first_gid: u32,
    map_dir: &Path,
) -> Result<Tileset, DocumentError> {
    let mut tiles = BTreeMap::new();
    for (id, tile) in tileset.tiles() {
        let objects = match tile.collision.as_ref() {
            Some(group) => Some(
                group
                    .object_data()
                    .iter()
                    .map(|object| convert_object_data(object, None))
                    .collect::<Result<Vec<_>, _>>()?,
            ),
            None => None,
        };
        if objects.is_some() {
            tiles.insert(id, TileMetadata { objects });
        }
    }

    let image = tileset.image.as_ref();
    debug!(
        "Tileset '{}' firstgid={} tilecount={} columns={}",
        tileset.name, first_gid, tileset.tilecount, tileset.columns
    );

    Ok(Tileset {
        name: tileset.name.clone(),
        first_gid,
        tile_width: tileset.tile_width,
        tile_height: tileset.tile_height,
        margin: tileset.margin,
        spacing: tileset.spacing,
        columns: tileset.columns,
        tile_count: tileset.tilecount,
        image: image.map(|image| relative_to(&image.source, map_dir)),
        image_width: image.and_then(|image| u32::try_from(image.width).ok()),
        image_height: image.and_then(|image| u32::try_from(image.height).ok()),
        tiles,
    })
}

/// Strip the map directory that `tiled` prepends to image sources.
fn relative_to(path: &Path, map_dir: &Path) -> PathBuf {
    path.strip_prefix(map_dir).unwrap_or(path).to_path_buf()
}

/// Pack a resolved tile reference back into a flagged gid.
pub fn pack_gid(first_gid: u32, local_id: u32, flip_h: bool, flip_v: bool, flip_d: bool) -> u32 {
    let mut gid = first_gid + local_id;
    if flip_h {
        gid |= FLIPPED_HORIZONTALLY_FLAG;
    }
    if flip_v {
        gid |= FLIPPED_VERTICALLY_FLAG;
    }
    if flip_d {
        gid |= FLIPPED_DIAGONALLY_FLAG;
    }
    gid
}

fn convert_object_data(
    object: &tiled::ObjectData,
    first_gids: Option<&[u32]>,
) -> Result<TiledObject, DocumentError> {
    let shape = match (&object.shape, object.tile_data()) {
        (tiled::ObjectShape::Rect { width, height }, Some(tile)) => {
            let Some(first_gids) = first_gids else {
                return Err(DocumentError::Unsupported(format!(
                    "tile object {} inside a tile collision group",
                    object.id()
                )));
            };
            let first_gid = match tile.tileset_location() {
                TilesetLocation::Map(index) => {
                    first_gids.get(*index).copied().ok_or_else(|| {
                        DocumentError::Unsupported(format!(
                            "object {} references missing tileset index {}",
                            object.id(),
                            index
                        ))
                    })?
                }
                TilesetLocation::Template(_) => {
                    return Err(DocumentError::Unsupported(format!(
                        "object {} uses a tileset that only exists in its template",
                        object.id()
                    )));
                }
            };
            ObjectShape::Tile {
                gid: pack_gid(first_gid, tile.id(), tile.flip_h, tile.flip_v, tile.flip_d),
                width: *width,
                height: *height,
            }
        }
        (tiled::ObjectShape::Rect { width, height }, None) => ObjectShape::Rectangle {
            width: *width,
            height: *height,
        },
        (tiled::ObjectShape::Ellipse { width, height }, _) => ObjectShape::Ellipse {
            width: *width,
            height: *height,
        },
        (tiled::ObjectShape::Polygon { points }, _) => ObjectShape::Polygon {
            points: points.iter().map(|(x, y)| Vec2::new(*x, *y)).collect(),
        },
        (tiled::ObjectShape::Polyline { points }, _) => ObjectShape::Polyline {
            points: points.iter().map(|(x, y)| Vec2::new(*x, *y)).collect(),
        },
        (tiled::ObjectShape::Point(_, _), _) => ObjectShape::Point,
        (tiled::ObjectShape::Text { .. }, _) => ObjectShape::Text,
    };

    Ok(TiledObject {
        id: object.id(),
        name: object.name.clone(),
        x: object.x,
        y: object.y,
        rotation: object.rotation,
        shape,
    })
}

struct LayerConverter<'a> {
    first_gids: &'a [u32],
    map_dir: &'a Path,
}

impl LayerConverter<'_> {
    fn convert(&self, layer: &tiled::Layer) -> Result<Layer, DocumentError> {
        let name = layer.name.clone();
        let converted = match layer.layer_type() {
            LayerType::Tiles(tile_layer) => Layer::Tiles(self.convert_tiles(name, &tile_layer)),
            LayerType::Objects(object_layer) => {
                let objects = object_layer
                    .objects()
                    .map(|object| convert_object_data(&object, Some(self.first_gids)))
                    .collect::<Result<Vec<_>, _>>()?;
                Layer::Objects(ObjectLayer { name, objects })
            }
            LayerType::Image(image_layer) => Layer::Image(ImageLayer {
                name,
                image: image_layer
                    .image
                    .as_ref()
                    .map(|image| relative_to(&image.source, self.map_dir)),
                opacity: layer.opacity,
            }),
            LayerType::Group(group) => Layer::Group(GroupLayer {
                name,
                layers: group
                    .layers()
                    .map(|child| self.convert(&child))
                    .collect::<Result<Vec<_>, _>>()?,
            }),
        };
        Ok(converted)
    }

    fn convert_tiles(&self, name: String, tile_layer: &tiled::TileLayer) -> TileLayer {
        // Infinite layers have no fixed size; the map itself is rejected at assembly.
        let (Some(width), Some(height)) = (tile_layer.width(), tile_layer.height()) else {
            debug!("Tile layer '{}' is chunked, storing it empty", name);
            return TileLayer {
                name,
                ..Default::default()
            };
        };

        let mut data = Vec::with_capacity((width * height) as usize);
        for y in 0..height {
            for x in 0..width {
                let gid = tile_layer
                    .get_tile(x as i32, y as i32)
                    .and_then(|tile| {
                        let first_gid = self.first_gids.get(tile.tileset_index())?;
                        Some(pack_gid(
                            *first_gid,
                            tile.id(),
                            tile.flip_h,
                            tile.flip_v,
                            tile.flip_d,
                        ))
                    })
                    .unwrap_or(0);
                data.push(gid);
            }
        }

        TileLayer {
            name,
            width,
            height,
            data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const TERRAIN_MAP: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<map version="1.10" tiledversion="1.10.2" orientation="orthogonal" renderorder="right-down" width="2" height="1" tilewidth="16" tileheight="16" infinite="0" nextlayerid="5" nextobjectid="3">
 <tileset firstgid="1" name="terrain" tilewidth="16" tileheight="16" tilecount="8" columns="4">
  <image source="terrain.png" width="64" height="32"/>
  <tile id="4">
   <objectgroup draworder="index" id="2">
    <object id="1" x="0" y="0" width="16" height="8"/>
   </objectgroup>
  </tile>
 </tileset>
 <tileset firstgid="9" name="props" tilewidth="32" tileheight="32" tilecount="4" columns="2">
  <image source="props.png" width="64" height="64"/>
 </tileset>
 <layer id="1" name="ground" width="2" height="1">
  <data encoding="csv">
5,2147483650
</data>
 </layer>
 <group id="2" name="decor">
  <objectgroup id="3" name="things">
   <object id="1" name="crate" gid="10" x="16" y="32" width="32" height="16" rotation="90"/>
   <object id="2" name="zone" x="4" y="4" width="8" height="8"/>
  </objectgroup>
  <imagelayer id="4" name="sky" opacity="0.5">
   <image source="sky.png" width="40" height="20"/>
  </imagelayer>
 </group>
</map>
"#;

    fn write_map(test_name: &str, contents: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "bevy_tmxscene_assets_{}_{}",
            test_name,
            std::process::id()
        ));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("level.tmx");
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_pack_gid_flags() {
        assert_eq!(pack_gid(1, 4, false, false, false), 5);
        assert_eq!(pack_gid(1, 1, true, false, false), 0x8000_0002);
        assert_eq!(pack_gid(9, 0, false, true, true), 0x6000_0009);
    }

    #[test]
    fn test_load_document_tilesets() {
        let path = write_map("tilesets", TERRAIN_MAP);
        let map = load_tmx_document(&path).unwrap();

        assert_eq!(map.orientation, Orientation::Orthogonal);
        assert!(!map.infinite);
        assert_eq!((map.tile_width, map.tile_height), (16, 16));
        assert_eq!(map.tilesets.keys().copied().collect::<Vec<_>>(), vec![1, 9]);

        let terrain = &map.tilesets[&1];
        assert_eq!(terrain.columns, 4);
        assert_eq!(terrain.image.as_deref(), Some(Path::new("terrain.png")));
        assert_eq!((terrain.image_width, terrain.image_height), (Some(64), Some(32)));

        let collision = terrain.tiles[&4].objects.as_ref().unwrap();
        assert_eq!(collision.len(), 1);
        assert_eq!(
            collision[0].shape,
            ObjectShape::Rectangle {
                width: 16.0,
                height: 8.0
            }
        );
    }

    #[test]
    fn test_load_document_layers() {
        let path = write_map("layers", TERRAIN_MAP);
        let map = load_tmx_document(&path).unwrap();

        assert_eq!(map.layers.len(), 2);
        let Layer::Tiles(ground) = &map.layers[0] else {
            panic!("expected tile layer");
        };
        assert_eq!(ground.data, vec![5, 0x8000_0002]);

        let Layer::Group(decor) = &map.layers[1] else {
            panic!("expected group layer");
        };
        assert_eq!(decor.name, "decor");

        let Layer::Objects(things) = &decor.layers[0] else {
            panic!("expected object layer");
        };
        assert_eq!(things.objects.len(), 2);
        assert_eq!(
            things.objects[0].shape,
            ObjectShape::Tile {
                gid: 10,
                width: 32.0,
                height: 16.0
            }
        );
        assert_eq!(things.objects[0].rotation, 90.0);
        assert_eq!(things.objects[1].shape.kind(), "rectangle");

        let Layer::Image(sky) = &decor.layers[1] else {
            panic!("expected image layer");
        };
        assert_eq!(sky.image.as_deref(), Some(Path::new("sky.png")));
        assert_eq!(sky.opacity, 0.5);
    }

    #[test]
    fn test_missing_file_is_tiled_error() {
        let result = load_tmx_document("/nonexistent/bevy_tmxscene/missing.tmx");
        assert!(matches!(result, Err(DocumentError::TiledError(_))));
    }
}
