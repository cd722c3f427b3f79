//! Image layer spawning.

use bevy::math::Affine2;
use bevy::prelude::*;
use bevy_tmxscene_assets::document::ImageLayer;

use crate::batch::TileBatch;
use crate::components::TmxLayer;
use crate::error::SceneResult;
use crate::node::SceneNode;
use crate::spawn::MapAssembler;
use crate::systems::SceneContext;
use crate::textures::{has_alpha, with_opacity};

/// Build the node for an image layer.
///
/// The image becomes one quad at its native pixel size with its top-left corner
/// at the layer origin. Layer opacity is baked into a copy of the texture.
pub fn compose_image_layer(
    assembler: &MapAssembler,
    layer: &ImageLayer,
    ctx: &mut SceneContext,
) -> SceneResult<SceneNode> {
    let mut node = SceneNode::new(&layer.name).with_layer(TmxLayer::Image);
    let Some(relative) = layer.image.as_ref() else {
        debug!("Image layer '{}' has no image", layer.name);
        return Ok(node);
    };

    let path = assembler.resolve_path(relative);
    let image = ctx.image_source.load_image(&path)?;
    let size = image.size().as_vec2();

    let faded = with_opacity(&image, layer.opacity)?;
    let blended = has_alpha(&faded);
    let material = ctx.add_image_material(faded, blended);

    let mut batch = TileBatch::new();
    batch.add_tile(
        Affine2::from_translation(Vec2::new(0.0, -size.y)) * Affine2::from_scale(size),
        Affine2::IDENTITY,
    );

    let name = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("image");
    node.attach(SceneNode::new(name).with_mesh(ctx.bind_mesh(batch.into_mesh(), material)));
    Ok(node)
}
