//! Tile batching into a single triangle-list mesh.

use bevy::asset::RenderAssetUsages;
use bevy::math::{Affine2, Vec2};
use bevy::mesh::PrimitiveTopology;
use bevy::prelude::*;

/// Unit quad as two counter-clockwise triangles.
const QUAD: [Vec2; 6] = [
    Vec2::new(0.0, 0.0),
    Vec2::new(1.0, 0.0),
    Vec2::new(1.0, 1.0),
    Vec2::new(1.0, 1.0),
    Vec2::new(0.0, 1.0),
    Vec2::new(0.0, 0.0),
];

/// Append-only vertex buffer for one atlas.
///
/// Consumed by [`TileBatch::into_mesh`], so a finished batch cannot be extended.
#[derive(Debug, Default)]
pub struct TileBatch {
    positions: Vec<[f32; 3]>,
    uvs: Vec<[f32; 2]>,
}

impl TileBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one quad.
    ///
    /// `shape` places the unit quad in layer space; `uv` maps it into the atlas in
    /// bottom-left-origin UV space.
    pub fn add_tile(&mut self, shape: Affine2, uv: Affine2) {
        for corner in QUAD {
            let position = shape.transform_point2(corner);
            let texcoord = uv.transform_point2(corner);
            self.positions.push([position.x, position.y, 0.0]);
            // Bevy samples textures with v pointing down.
            self.uvs.push([texcoord.x, 1.0 - texcoord.y]);
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn tile_count(&self) -> usize {
        self.positions.len() / QUAD.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn positions(&self) -> &[[f32; 3]] {
        &self.positions
    }

    pub fn uvs(&self) -> &[[f32; 2]] {
        &self.uvs
    }

    /// Finalize into a triangle-list mesh.
    pub fn into_mesh(self) -> Mesh {
        let normals = vec![[0.0, 0.0, 1.0]; self.positions.len()];
        Mesh::new(PrimitiveTopology::TriangleList, RenderAssetUsages::default())
            .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, self.positions)
            .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, normals)
            .with_inserted_attribute(Mesh::ATTRIBUTE_UV_0, self.uvs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_tile_appends_six_vertices() {
        let mut batch = TileBatch::new();
        assert!(batch.is_empty());

        batch.add_tile(Affine2::IDENTITY, Affine2::IDENTITY);
        assert_eq!(batch.vertex_count(), 6);
        assert_eq!(batch.tile_count(), 1);

        batch.add_tile(Affine2::from_translation(Vec2::X), Affine2::IDENTITY);
        assert_eq!(batch.vertex_count(), 12);
        assert_eq!(batch.positions()[6], [1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_winding_is_counter_clockwise() {
        let mut batch = TileBatch::new();
        batch.add_tile(Affine2::IDENTITY, Affine2::IDENTITY);

        for triangle in batch.positions().chunks(3) {
            let a = Vec2::new(triangle[0][0], triangle[0][1]);
            let b = Vec2::new(triangle[1][0], triangle[1][1]);
            let c = Vec2::new(triangle[2][0], triangle[2][1]);
            assert!((b - a).perp_dot(c - a) > 0.0);
        }
    }

    #[test]
    fn test_uvs_flip_to_top_left_origin() {
        let mut batch = TileBatch::new();
        let uv = Affine2::from_scale(Vec2::splat(0.5));
        batch.add_tile(Affine2::IDENTITY, uv);

        assert_eq!(batch.uvs()[0], [0.0, 1.0]);
        assert_eq!(batch.uvs()[2], [0.5, 0.5]);
    }

    #[test]
    fn test_into_mesh_carries_attributes() {
        let mut batch = TileBatch::new();
        batch.add_tile(Affine2::from_scale(Vec2::splat(16.0)), Affine2::IDENTITY);
        batch.add_tile(Affine2::from_scale(Vec2::splat(16.0)), Affine2::IDENTITY);

        let mesh = batch.into_mesh();
        assert_eq!(mesh.primitive_topology(), PrimitiveTopology::TriangleList);
        assert_eq!(mesh.count_vertices(), 12);
        assert_eq!(
            mesh.attribute(Mesh::ATTRIBUTE_UV_0).map(|uvs| uvs.len()),
            Some(12)
        );
    }
}
