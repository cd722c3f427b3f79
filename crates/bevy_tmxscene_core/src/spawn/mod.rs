//! Scene assembly, one module per map level.

pub mod images;
pub mod layers;
pub mod map;
pub mod objects;
pub mod tiles;

pub use images::compose_image_layer;
pub use layers::compose_layer;
pub use map::{MapAssembler, build_scene, load_map, validate_map};
pub use objects::{compose_object_layer, place_object};
pub use tiles::{TileArranger, compose_tile_layer};
