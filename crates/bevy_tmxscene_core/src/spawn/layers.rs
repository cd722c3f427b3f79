//! Layer dispatch.

use bevy::prelude::*;
use bevy_tmxscene_assets::document::{GroupLayer, Layer};

use crate::components::TmxLayer;
use crate::error::SceneResult;
use crate::node::SceneNode;
use crate::spawn::{MapAssembler, compose_image_layer, compose_object_layer, compose_tile_layer};
use crate::systems::SceneContext;

/// Build the node for one layer, recursing into groups.
///
/// Content layers (tiles, objects, images) get sequential z values from the
/// assembler; groups stay at z = 0 so their children keep a flat ordering.
pub fn compose_layer(
    assembler: &mut MapAssembler,
    layer: &Layer,
    ctx: &mut SceneContext,
) -> SceneResult<SceneNode> {
    let node = match layer {
        Layer::Tiles(tile_layer) => {
            let z = assembler.next_layer_z();
            compose_tile_layer(assembler, tile_layer, ctx)?
                .with_transform(Transform::from_xyz(0.0, 0.0, z))
        }
        Layer::Objects(object_layer) => {
            let z = assembler.next_layer_z();
            compose_object_layer(assembler, object_layer, ctx)?
                .with_transform(Transform::from_xyz(0.0, 0.0, z))
        }
        Layer::Image(image_layer) => {
            let z = assembler.next_layer_z();
            compose_image_layer(assembler, image_layer, ctx)?
                .with_transform(Transform::from_xyz(0.0, 0.0, z))
        }
        Layer::Group(group) => compose_group(assembler, group, ctx)?,
    };

    debug!(
        "Composed layer '{}' with {} child node(s)",
        node.name,
        node.children.len()
    );
    Ok(node)
}

fn compose_group(
    assembler: &mut MapAssembler,
    group: &GroupLayer,
    ctx: &mut SceneContext,
) -> SceneResult<SceneNode> {
    let mut node = SceneNode::new(&group.name).with_layer(TmxLayer::Group);
    for child in &group.layers {
        node.attach(compose_layer(assembler, child, ctx)?);
    }
    Ok(node)
}
