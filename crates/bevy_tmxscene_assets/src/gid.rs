//! Flag bits packed into the high nibble of a global tile id.

pub const FLIPPED_HORIZONTALLY_FLAG: u32 = 0x8000_0000;
pub const FLIPPED_VERTICALLY_FLAG: u32 = 0x4000_0000;
pub const FLIPPED_DIAGONALLY_FLAG: u32 = 0x2000_0000;
/// Hexagonal 120° rotation; recognized and stripped, never applied.
pub const ROTATED_HEXAGONAL_120_FLAG: u32 = 0x1000_0000;

pub const ALL_FLAGS: u32 = FLIPPED_HORIZONTALLY_FLAG
    | FLIPPED_VERTICALLY_FLAG
    | FLIPPED_DIAGONALLY_FLAG
    | ROTATED_HEXAGONAL_120_FLAG;

/// Base id with every flag bit masked out.
#[inline]
pub fn clean_gid(raw: u32) -> u32 {
    raw & !ALL_FLAGS
}
