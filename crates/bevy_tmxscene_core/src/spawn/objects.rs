//! Object layer spawning.

use bevy::prelude::*;
use bevy_tmxscene_assets::document::{ObjectLayer, ObjectShape, TiledObject};

use crate::components::TmxLayer;
use crate::error::SceneResult;
use crate::gid::clean_gid;
use crate::node::SceneNode;
use crate::spawn::{MapAssembler, TileArranger};
use crate::systems::SceneContext;

/// Build the node for an object layer, one child per object.
pub fn compose_object_layer(
    assembler: &MapAssembler,
    layer: &ObjectLayer,
    ctx: &mut SceneContext,
) -> SceneResult<SceneNode> {
    let mut node = SceneNode::new(&layer.name).with_layer(TmxLayer::Objects);
    for object in &layer.objects {
        node.attach(place_object(assembler, object, ctx)?);
    }
    Ok(node)
}

/// Place one object at its map position, rotated clockwise about its origin.
///
/// Tile objects get a `tile` child holding a single-quad mesh, scaled from the
/// map tile size to the object's own size, plus the tile's collider if it has one.
/// Every other shape is placed as an empty node.
pub fn place_object(
    assembler: &MapAssembler,
    object: &TiledObject,
    ctx: &mut SceneContext,
) -> SceneResult<SceneNode> {
    let transform = Transform::from_xyz(object.x, -object.y, 0.0)
        .with_rotation(Quat::from_rotation_z(-object.rotation.to_radians()));
    let mut node = SceneNode::new(&object.name).with_transform(transform);

    if let ObjectShape::Tile { gid, width, height } = object.shape {
        let tileset = assembler.find_source(gid)?;
        let mut arranger = TileArranger::new(tileset);
        arranger.add_tile(gid, 0, 0)?;

        let map_tile = assembler.tile_size();
        let mut tile = SceneNode::new("tile")
            .with_transform(
                Transform::from_xyz(0.0, height, 0.0)
                    .with_scale(Vec3::new(width / map_tile.x, height / map_tile.y, 1.0)),
            )
            .with_mesh(arranger.generate_mesh(assembler, ctx)?);

        if let Some(collider) = assembler.colliders().get_collider(clean_gid(gid)) {
            tile.attach(SceneNode::new("collision_node").with_collider(collider.clone()));
        }
        node.attach(tile);
    } else {
        trace!(
            "Object {} ('{}') is a {}, placed without geometry",
            object.id,
            object.name,
            object.shape.kind()
        );
    }

    Ok(node)
}
