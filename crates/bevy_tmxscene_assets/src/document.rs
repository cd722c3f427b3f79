//! Read-only TMX document model.
//!
//! Mirrors the parts of a Tiled map that scene assembly consumes. Tile references
//! are stored as packed global ids (flip flags in the high bits), the way they
//! appear in the `.tmx` file itself.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use bevy::math::Vec2;
use normalize_path::NormalizePath;

/// Map orientation as declared in the `.tmx` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Orthogonal,
    Isometric,
    Staggered,
    Hexagonal,
}

impl Orientation {
    /// Name used by Tiled for this orientation.
    pub fn as_str(self) -> &'static str {
        match self {
            Orientation::Orthogonal => "orthogonal",
            Orientation::Isometric => "isometric",
            Orientation::Staggered => "staggered",
            Orientation::Hexagonal => "hexagonal",
        }
    }
}

/// Root of a parsed map document.
#[derive(Debug, Clone)]
pub struct TiledMap {
    /// Path of the `.tmx` file this document was read from
    pub source: PathBuf,
    pub orientation: Orientation,
    pub infinite: bool,
    /// Map size in tiles
    pub width: u32,
    pub height: u32,
    /// Global tile size in pixels
    pub tile_width: u32,
    pub tile_height: u32,
    /// Tilesets keyed by firstgid
    pub tilesets: BTreeMap<u32, Tileset>,
    /// Top-level layers in document order
    pub layers: Vec<Layer>,
}

impl TiledMap {
    /// Directory that relative image paths are resolved against.
    pub fn map_dir(&self) -> &Path {
        self.source.parent().unwrap_or_else(|| Path::new(""))
    }

    /// Resolve a path relative to the map directory, collapsing `..` segments.
    pub fn resolve(&self, relative: &Path) -> PathBuf {
        self.map_dir().join(relative).normalize()
    }

    /// Resolved paths of every image the map draws: tileset atlases first, then
    /// image layers in document order. Duplicates are kept.
    pub fn image_paths(&self) -> Vec<PathBuf> {
        let mut paths: Vec<PathBuf> = self
            .tilesets
            .values()
            .filter_map(|tileset| tileset.image.as_deref())
            .map(|image| self.resolve(image))
            .collect();
        collect_layer_images(&self.layers, &mut |image| paths.push(self.resolve(image)));
        paths
    }

    /// File stem of the map, used to name the scene root.
    pub fn name(&self) -> String {
        self.source
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("Map")
            .to_string()
    }
}

fn collect_layer_images<'a>(layers: &'a [Layer], visit: &mut impl FnMut(&'a Path)) {
    for layer in layers {
        match layer {
            Layer::Image(ImageLayer {
                image: Some(image), ..
            }) => visit(image),
            Layer::Group(group) => collect_layer_images(&group.layers, visit),
            _ => {}
        }
    }
}

/// A tileset backed by a single atlas image.
#[derive(Debug, Clone, Default)]
pub struct Tileset {
    pub name: String,
    /// First global id owned by this tileset
    pub first_gid: u32,
    pub tile_width: u32,
    pub tile_height: u32,
    pub margin: u32,
    pub spacing: u32,
    pub columns: u32,
    pub tile_count: u32,
    /// Atlas image, relative to the map directory
    pub image: Option<PathBuf>,
    pub image_width: Option<u32>,
    pub image_height: Option<u32>,
    /// Per-tile metadata keyed by local tile id
    pub tiles: BTreeMap<u32, TileMetadata>,
}

impl Tileset {
    /// Whether `gid` (flags already stripped) falls in this tileset's range.
    pub fn contains(&self, gid: u32) -> bool {
        gid >= self.first_gid && gid - self.first_gid < self.tile_count
    }

    /// Local tile id for a clean gid owned by this tileset.
    pub fn local_id(&self, gid: u32) -> u32 {
        gid - self.first_gid
    }
}

/// Metadata attached to one tile of a tileset.
#[derive(Debug, Clone, Default)]
pub struct TileMetadata {
    /// Collision object group, if the tile declares one
    pub objects: Option<Vec<TiledObject>>,
}

/// A map layer.
#[derive(Debug, Clone)]
pub enum Layer {
    Tiles(TileLayer),
    Objects(ObjectLayer),
    Image(ImageLayer),
    Group(GroupLayer),
}

impl Layer {
    pub fn name(&self) -> &str {
        match self {
            Layer::Tiles(layer) => &layer.name,
            Layer::Objects(layer) => &layer.name,
            Layer::Image(layer) => &layer.name,
            Layer::Group(layer) => &layer.name,
        }
    }
}

/// A rectangular grid of packed gids, stored row-major.
#[derive(Debug, Clone, Default)]
pub struct TileLayer {
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub data: Vec<u32>,
}

impl TileLayer {
    /// Raw gid at `(x, y)`, 0 when empty or out of bounds.
    pub fn gid(&self, x: u32, y: u32) -> u32 {
        if x >= self.width || y >= self.height {
            return 0;
        }
        self.data
            .get(y as usize * self.width as usize + x as usize)
            .copied()
            .unwrap_or(0)
    }

    /// Iterates `(column, row, raw_gid)` over non-empty cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (u32, u32, u32)> + '_ {
        (0..self.height)
            .flat_map(move |y| (0..self.width).map(move |x| (x, y, self.gid(x, y))))
            .filter(|&(_, _, gid)| gid != 0)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ObjectLayer {
    pub name: String,
    pub objects: Vec<TiledObject>,
}

#[derive(Debug, Clone, Default)]
pub struct ImageLayer {
    pub name: String,
    /// Image path relative to the map directory
    pub image: Option<PathBuf>,
    pub opacity: f32,
}

#[derive(Debug, Clone, Default)]
pub struct GroupLayer {
    pub name: String,
    pub layers: Vec<Layer>,
}

/// A free-form object, either on an object layer or inside a tile's collision group.
#[derive(Debug, Clone)]
pub struct TiledObject {
    pub id: u32,
    pub name: String,
    pub x: f32,
    pub y: f32,
    /// Clockwise rotation in degrees
    pub rotation: f32,
    pub shape: ObjectShape,
}

impl TiledObject {
    pub fn new(id: u32, shape: ObjectShape) -> Self {
        Self {
            id,
            name: String::new(),
            x: 0.0,
            y: 0.0,
            rotation: 0.0,
            shape,
        }
    }

    pub fn with_position(mut self, x: f32, y: f32) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    pub fn with_rotation(mut self, degrees: f32) -> Self {
        self.rotation = degrees;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ObjectShape {
    /// Tile object referencing a packed gid
    Tile { gid: u32, width: f32, height: f32 },
    Rectangle { width: f32, height: f32 },
    Ellipse { width: f32, height: f32 },
    Polygon { points: Vec<Vec2> },
    Polyline { points: Vec<Vec2> },
    Point,
    Text,
}

impl ObjectShape {
    /// Short name for log and error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            ObjectShape::Tile { .. } => "tile",
            ObjectShape::Rectangle { .. } => "rectangle",
            ObjectShape::Ellipse { .. } => "ellipse",
            ObjectShape::Polygon { .. } => "polygon",
            ObjectShape::Polyline { .. } => "polyline",
            ObjectShape::Point => "point",
            ObjectShape::Text => "text",
        }
    }
}
