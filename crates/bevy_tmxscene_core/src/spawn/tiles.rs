//! Tile layer spawning.

use bevy::math::Affine2;
use bevy::prelude::*;
use bevy_tmxscene_assets::document::{TileLayer, Tileset};

use crate::atlas::tile_uv_transform;
use crate::batch::TileBatch;
use crate::components::TmxLayer;
use crate::error::{SceneError, SceneResult};
use crate::gid::{clean_gid, decode_gid};
use crate::node::{MeshBinding, SceneNode};
use crate::spawn::MapAssembler;
use crate::systems::SceneContext;

/// Places tiles of a single tileset into one batch.
pub struct TileArranger<'m> {
    tileset: &'m Tileset,
    batch: TileBatch,
}

impl<'m> TileArranger<'m> {
    pub fn new(tileset: &'m Tileset) -> Self {
        Self {
            tileset,
            batch: TileBatch::new(),
        }
    }

    pub fn tileset(&self) -> &'m Tileset {
        self.tileset
    }

    /// Add the tile `raw_gid` at grid cell `(column, row)`, rows growing downwards.
    ///
    /// Gid 0 is skipped.
    pub fn add_tile(&mut self, raw_gid: u32, column: u32, row: u32) -> SceneResult<()> {
        let (gid, flip) = decode_gid(raw_gid);
        if gid == 0 {
            return Ok(());
        }
        if !self.tileset.contains(gid) {
            return Err(SceneError::Unsupported(format!(
                "gid {} is outside tileset '{}'; a batch draws from a single tileset",
                gid, self.tileset.name
            )));
        }

        let tile_size = Vec2::new(self.tileset.tile_width as f32, self.tileset.tile_height as f32);
        let shape = Affine2::from_scale(tile_size)
            * Affine2::from_translation(Vec2::new(column as f32, -(row as f32) - 1.0))
            * flip;
        let uv = tile_uv_transform(self.tileset, self.tileset.local_id(gid))?;

        self.batch.add_tile(shape, uv);
        Ok(())
    }

    pub fn batch(&self) -> &TileBatch {
        &self.batch
    }

    /// Finalize the batch into a mesh bound to the tileset's atlas.
    pub fn generate_mesh(
        self,
        assembler: &MapAssembler,
        ctx: &mut SceneContext,
    ) -> SceneResult<MeshBinding> {
        let image = self.tileset.image.as_ref().ok_or_else(|| {
            SceneError::Configuration(format!("tileset '{}' has no atlas image", self.tileset.name))
        })?;
        let material = ctx.atlas_material(&assembler.resolve_path(image))?;
        Ok(ctx.bind_mesh(self.batch.into_mesh(), material))
    }
}

/// Build the node tree for a tile layer.
///
/// ```text
/// <layer name>
/// └── tile                  (batched mesh)
///     └── cluster_collider
///         └── collider_location   (one per tile with a collider)
///             └── collision_node  (TileCollider)
/// ```
///
/// The whole layer must draw from one tileset: the owner of its first non-empty
/// cell. A tile owned by another tileset fails with [`SceneError::Unsupported`].
pub fn compose_tile_layer(
    assembler: &MapAssembler,
    layer: &TileLayer,
    ctx: &mut SceneContext,
) -> SceneResult<SceneNode> {
    let tile_size = assembler.tile_size();
    let mut arranger: Option<TileArranger> = None;
    let mut cluster = SceneNode::new("cluster_collider");

    for (column, row, raw_gid) in layer.cells() {
        let tileset = assembler.find_source(raw_gid)?;
        arranger
            .get_or_insert_with(|| TileArranger::new(tileset))
            .add_tile(raw_gid, column, row)?;

        // Flipped tiles keep the collider of their base tile
        if let Some(collider) = assembler.colliders().get_collider(clean_gid(raw_gid)) {
            let mut location = SceneNode::new("collider_location").with_transform(
                Transform::from_xyz(column as f32 * tile_size.x, -(row as f32) * tile_size.y, 0.0),
            );
            location.attach(SceneNode::new("collision_node").with_collider(collider.clone()));
            cluster.attach(location);
        }
    }

    let mut tile_node = SceneNode::new("tile");
    if let Some(arranger) = arranger {
        debug!(
            "Tile layer '{}': {} tile(s) from tileset '{}', {} collider(s)",
            layer.name,
            arranger.batch().tile_count(),
            arranger.tileset().name,
            cluster.children.len()
        );
        tile_node.mesh = Some(arranger.generate_mesh(assembler, ctx)?);
    }
    tile_node.attach(cluster);

    let mut node = SceneNode::new(&layer.name).with_layer(TmxLayer::Tiles);
    node.attach(tile_node);
    Ok(node)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::path::PathBuf;

    use bevy::sprite_render::ColorMaterial;
    use bevy_tmxscene_assets::document::{
        Layer, ObjectShape, Orientation, TileMetadata, TiledMap, TiledObject,
    };

    use super::*;
    use crate::colliders::ColliderBox;
    use crate::gid::FLIPPED_HORIZONTALLY_FLAG;
    use crate::plugin::TmxSceneConfig;
    use crate::textures::MemoryImageSource;
    use crate::textures::tests::solid_image;

    fn terrain(with_collider: bool) -> Tileset {
        let mut tiles = BTreeMap::new();
        if with_collider {
            tiles.insert(
                4,
                TileMetadata {
                    objects: Some(vec![TiledObject::new(
                        1,
                        ObjectShape::Rectangle {
                            width: 16.0,
                            height: 8.0,
                        },
                    )]),
                },
            );
        }
        Tileset {
            name: "terrain".into(),
            first_gid: 1,
            tile_width: 16,
            tile_height: 16,
            columns: 4,
            tile_count: 8,
            image: Some(PathBuf::from("terrain.png")),
            image_width: Some(64),
            image_height: Some(32),
            tiles,
            ..Default::default()
        }
    }

    fn map_with_layer(data: Vec<u32>, width: u32, height: u32, tilesets: Vec<Tileset>) -> TiledMap {
        TiledMap {
            source: PathBuf::from("maps/level.tmx"),
            orientation: Orientation::Orthogonal,
            infinite: false,
            width,
            height,
            tile_width: 16,
            tile_height: 16,
            tilesets: tilesets.into_iter().map(|ts| (ts.first_gid, ts)).collect(),
            layers: vec![Layer::Tiles(TileLayer {
                name: "ground".into(),
                width,
                height,
                data,
            })],
        }
    }

    struct Fixture {
        meshes: Assets<Mesh>,
        materials: Assets<ColorMaterial>,
        images: Assets<Image>,
        source: MemoryImageSource,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                meshes: Assets::default(),
                materials: Assets::default(),
                images: Assets::default(),
                source: MemoryImageSource::new()
                    .with_image("maps/terrain.png", solid_image(64, 32, [255, 255, 255, 255]))
                    .with_image("maps/props.png", solid_image(32, 32, [0, 0, 0, 0])),
            }
        }

        fn build(&mut self, map: &TiledMap) -> SceneResult<SceneNode> {
            let config = TmxSceneConfig::default();
            let mut ctx = SceneContext::new(
                &mut self.meshes,
                &mut self.materials,
                &mut self.images,
                &mut self.source,
            );
            MapAssembler::new(map, &config).load_map(&mut ctx)
        }
    }

    fn vertex_count(fixture: &Fixture, node: &SceneNode) -> usize {
        let binding = node.mesh.as_ref().unwrap();
        fixture.meshes.get(&binding.mesh).unwrap().count_vertices()
    }

    #[test]
    fn test_arranger_places_tile_in_pixels() {
        let tileset = terrain(false);
        let mut arranger = TileArranger::new(&tileset);
        arranger.add_tile(2, 3, 1).unwrap();
        arranger.add_tile(0, 0, 0).unwrap();

        let positions = arranger.batch().positions();
        assert_eq!(positions.len(), 6);
        // Cell (3, 1) spans x in [48, 64] and y in [-32, -16].
        assert_eq!(positions[0], [48.0, -32.0, 0.0]);
        assert_eq!(positions[2], [64.0, -16.0, 0.0]);
    }

    #[test]
    fn test_arranger_applies_flip() {
        let tileset = terrain(false);
        let mut arranger = TileArranger::new(&tileset);
        arranger.add_tile(FLIPPED_HORIZONTALLY_FLAG | 1, 0, 0).unwrap();

        // The first corner of the unit quad lands on the right edge.
        assert_eq!(arranger.batch().positions()[0], [16.0, -16.0, 0.0]);
    }

    #[test]
    fn test_two_cell_layer_with_one_empty_cell() {
        let map = map_with_layer(vec![5, 0], 2, 1, vec![terrain(true)]);
        let mut fixture = Fixture::new();
        let root = fixture.build(&map).unwrap();

        let tile = root.find("tile").unwrap();
        assert_eq!(vertex_count(&fixture, tile), 6);

        let cluster = root.find("cluster_collider").unwrap();
        assert_eq!(cluster.children.len(), 1);
        let location = &cluster.children[0];
        assert_eq!(location.name, "collider_location");
        assert_eq!(location.transform.translation, Vec3::ZERO);

        let collision = &location.children[0];
        assert_eq!(collision.name, "collision_node");
        assert_eq!(
            collision.collider.as_ref().unwrap().boxes,
            vec![ColliderBox::from_rectangle(16.0, 8.0, 32.0)]
        );
    }

    #[test]
    fn test_tile_without_collider_adds_only_geometry() {
        let map = map_with_layer(vec![5, 0], 2, 1, vec![terrain(false)]);
        let mut fixture = Fixture::new();
        let root = fixture.build(&map).unwrap();

        assert_eq!(vertex_count(&fixture, root.find("tile").unwrap()), 6);
        assert!(root.find("cluster_collider").unwrap().children.is_empty());
    }

    #[test]
    fn test_collider_locations_use_map_tile_size() {
        let map = map_with_layer(vec![0, 0, 0, 5 | FLIPPED_HORIZONTALLY_FLAG], 2, 2, vec![terrain(true)]);
        let mut fixture = Fixture::new();
        let root = fixture.build(&map).unwrap();

        let cluster = root.find("cluster_collider").unwrap();
        assert_eq!(cluster.children.len(), 1);
        assert_eq!(
            cluster.children[0].transform.translation,
            Vec3::new(16.0, -16.0, 0.0)
        );
    }

    #[test]
    fn test_atlas_shared_across_layers() {
        let mut map = map_with_layer(vec![1, 2], 2, 1, vec![terrain(false)]);
        map.layers.push(map.layers[0].clone());
        let mut fixture = Fixture::new();
        fixture.build(&map).unwrap();

        assert_eq!(fixture.meshes.len(), 2);
        assert_eq!(fixture.images.len(), 1);
        assert_eq!(fixture.materials.len(), 1);
    }

    #[test]
    fn test_mixed_tilesets_rejected() {
        let props = Tileset {
            name: "props".into(),
            first_gid: 9,
            tile_width: 16,
            tile_height: 16,
            columns: 2,
            tile_count: 4,
            image: Some(PathBuf::from("props.png")),
            image_width: Some(32),
            image_height: Some(32),
            ..Default::default()
        };
        let map = map_with_layer(vec![1, 9], 2, 1, vec![terrain(false), props]);
        let mut fixture = Fixture::new();
        assert!(matches!(
            fixture.build(&map),
            Err(SceneError::Unsupported(_))
        ));
    }

    #[test]
    fn test_unknown_gid_is_lookup_failure() {
        let map = map_with_layer(vec![42], 1, 1, vec![terrain(false)]);
        let mut fixture = Fixture::new();
        assert!(matches!(
            fixture.build(&map),
            Err(SceneError::Lookup { gid: 42 })
        ));
    }

    #[test]
    fn test_missing_atlas_dimensions_is_configuration_error() {
        let mut tileset = terrain(false);
        tileset.image_width = None;
        let map = map_with_layer(vec![1], 1, 1, vec![tileset]);
        let mut fixture = Fixture::new();
        assert!(matches!(
            fixture.build(&map),
            Err(SceneError::Configuration(_))
        ));
    }

    #[test]
    fn test_empty_layer_has_no_mesh() {
        let map = map_with_layer(vec![0, 0], 2, 1, vec![terrain(false)]);
        let mut fixture = Fixture::new();
        let root = fixture.build(&map).unwrap();
        assert!(root.find("tile").unwrap().mesh.is_none());
        assert_eq!(fixture.meshes.len(), 0);
    }
}
