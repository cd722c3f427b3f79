//! Atlas UV mapping.

use bevy::math::{Affine2, UVec2, Vec2};
use bevy_tmxscene_assets::document::Tileset;

use crate::error::{SceneError, SceneResult};

/// Atlas image size, required for any UV math.
pub fn atlas_size(tileset: &Tileset) -> SceneResult<UVec2> {
    match (tileset.image_width, tileset.image_height) {
        (Some(width), Some(height)) if width > 0 && height > 0 => Ok(UVec2::new(width, height)),
        _ => Err(SceneError::Configuration(format!(
            "tileset '{}' has no atlas image dimensions",
            tileset.name
        ))),
    }
}

/// Grid cell `(column, row)` of a local tile id.
pub fn tile_cell(tileset: &Tileset, local_id: u32) -> SceneResult<UVec2> {
    if tileset.columns == 0 {
        return Err(SceneError::Configuration(format!(
            "tileset '{}' declares zero columns",
            tileset.name
        )));
    }
    Ok(UVec2::new(local_id % tileset.columns, local_id / tileset.columns))
}

/// Top-left pixel of a tile in the atlas, in Tiled's y-down image space.
pub fn tile_pixel_origin(tileset: &Tileset, local_id: u32) -> SceneResult<UVec2> {
    let cell = tile_cell(tileset, local_id)?;
    Ok(UVec2::new(
        tileset.margin + cell.x * (tileset.tile_width + tileset.spacing),
        tileset.margin + cell.y * (tileset.tile_height + tileset.spacing),
    ))
}

/// Transform taking the unit quad onto the tile's sub-rectangle of the atlas.
///
/// Output is in bottom-left-origin UV space: `(0, 0)` is the bottom-left corner of
/// the atlas and `(1, 1)` the top-right.
pub fn tile_uv_transform(tileset: &Tileset, local_id: u32) -> SceneResult<Affine2> {
    let size = atlas_size(tileset)?.as_vec2();
    let cell = tile_cell(tileset, local_id)?.as_vec2();

    let tile = Vec2::new(tileset.tile_width as f32, tileset.tile_height as f32);
    let margin = tileset.margin as f32;
    let spacing = tileset.spacing as f32;

    let origin = Vec2::new(
        margin + cell.x * (tile.x + spacing),
        size.y - margin - tile.y - cell.y * (tile.y + spacing),
    );

    Ok(Affine2::from_scale(size.recip())
        * Affine2::from_translation(origin)
        * Affine2::from_scale(tile))
}
