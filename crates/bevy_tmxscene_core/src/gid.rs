//! Decoding of packed tile references into a base id and a quad transform.
//!
//! The transform acts on the unit quad `[0, 1]²` (y up) and maps it onto itself,
//! so it can be applied before the tile is scaled and placed in the grid.

use bevy::math::{Affine2, Mat2, Vec2};

pub use bevy_tmxscene_assets::gid::{
    ALL_FLAGS, FLIPPED_DIAGONALLY_FLAG, FLIPPED_HORIZONTALLY_FLAG, FLIPPED_VERTICALLY_FLAG,
    ROTATED_HEXAGONAL_120_FLAG, clean_gid,
};

/// Flip bits carried by a raw gid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TileFlags {
    pub horizontal: bool,
    pub vertical: bool,
    pub diagonal: bool,
    pub hexagonal_120: bool,
}

impl TileFlags {
    pub fn from_gid(raw: u32) -> Self {
        Self {
            horizontal: raw & FLIPPED_HORIZONTALLY_FLAG != 0,
            vertical: raw & FLIPPED_VERTICALLY_FLAG != 0,
            diagonal: raw & FLIPPED_DIAGONALLY_FLAG != 0,
            hexagonal_120: raw & ROTATED_HEXAGONAL_120_FLAG != 0,
        }
    }

    /// Combined transform: diagonal first, then horizontal, then vertical.
    pub fn transform(self) -> Affine2 {
        let mut transform = Affine2::IDENTITY;
        if self.diagonal {
            transform = flip_diagonal() * transform;
        }
        if self.horizontal {
            transform = flip_horizontal() * transform;
        }
        if self.vertical {
            transform = flip_vertical() * transform;
        }
        transform
    }
}

/// `(x, y) -> (1 - x, y)`
fn flip_horizontal() -> Affine2 {
    Affine2::from_mat2_translation(Mat2::from_diagonal(Vec2::new(-1.0, 1.0)), Vec2::X)
}

/// `(x, y) -> (x, 1 - y)`
fn flip_vertical() -> Affine2 {
    Affine2::from_mat2_translation(Mat2::from_diagonal(Vec2::new(1.0, -1.0)), Vec2::Y)
}

/// Reflection across the anti-diagonal, `(x, y) -> (1 - y, 1 - x)`.
///
/// Tiled's diagonal flip swaps the axes in its y-down image space; with y up that
/// is the anti-diagonal of the unit quad.
fn flip_diagonal() -> Affine2 {
    Affine2::from_mat2_translation(
        Mat2::from_cols(Vec2::new(0.0, -1.0), Vec2::new(-1.0, 0.0)),
        Vec2::ONE,
    )
}

/// Split a raw gid into its clean base id and the flip transform for its quad.
pub fn decode_gid(raw: u32) -> (u32, Affine2) {
    (clean_gid(raw), TileFlags::from_gid(raw).transform())
}
