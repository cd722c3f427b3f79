//! Image loading and texture preparation.

use std::path::{Path, PathBuf};

use bevy::asset::RenderAssetUsages;
use bevy::image::{CompressedImageFormats, ImageSampler, ImageType};
use bevy::platform::collections::HashMap;
use bevy::prelude::*;
use bevy::render::render_resource::TextureFormat;
use bevy::sprite_render::{AlphaMode2d, ColorMaterial};
use bevy_tmxscene_assets::TmxDocument;

use crate::error::{SceneError, SceneResult};

/// Source of decoded images for atlases and image layers.
///
/// Scene assembly never touches the filesystem directly, so tests and embedders
/// can hand in pre-built images.
pub trait ImageSource {
    fn load_image(&mut self, path: &Path) -> SceneResult<Image>;
}

/// Reads and decodes image files from disk.
#[derive(Debug, Clone)]
pub struct FileImageSource {
    /// Use nearest-neighbour sampling, which keeps pixel art crisp.
    pub nearest_sampling: bool,
}

impl Default for FileImageSource {
    fn default() -> Self {
        Self {
            nearest_sampling: true,
        }
    }
}

impl ImageSource for FileImageSource {
    fn load_image(&mut self, path: &Path) -> SceneResult<Image> {
        let bytes = std::fs::read(path).map_err(|e| SceneError::Image {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        decode_image(path, &bytes, self.nearest_sampling)
    }
}

/// Decodes the image bytes bundled with a [`TmxDocument`] asset.
///
/// Paths are the resolved, asset-root relative ones the document was loaded with.
pub struct DocumentImageSource<'a> {
    images: &'a HashMap<PathBuf, Vec<u8>>,
    nearest_sampling: bool,
}

impl<'a> DocumentImageSource<'a> {
    pub fn new(document: &'a TmxDocument, nearest_sampling: bool) -> Self {
        Self {
            images: &document.images,
            nearest_sampling,
        }
    }
}

impl ImageSource for DocumentImageSource<'_> {
    fn load_image(&mut self, path: &Path) -> SceneResult<Image> {
        let bytes = self.images.get(path).ok_or_else(|| SceneError::Image {
            path: path.to_path_buf(),
            reason: "not part of the loaded map asset".to_string(),
        })?;
        decode_image(path, bytes, self.nearest_sampling)
    }
}

/// Decode an encoded image, picking the format from the file extension.
pub fn decode_image(path: &Path, bytes: &[u8], nearest_sampling: bool) -> SceneResult<Image> {
    let image_error = |reason: String| SceneError::Image {
        path: path.to_path_buf(),
        reason,
    };

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .ok_or_else(|| image_error("missing file extension".to_string()))?;

    let sampler = if nearest_sampling {
        ImageSampler::nearest()
    } else {
        ImageSampler::Default
    };

    Image::from_buffer(
        bytes,
        ImageType::Extension(extension),
        CompressedImageFormats::NONE,
        true,
        sampler,
        RenderAssetUsages::default(),
    )
    .map_err(|e| image_error(e.to_string()))
}

/// In-memory images keyed by path.
#[derive(Debug, Default, Clone)]
pub struct MemoryImageSource {
    images: Vec<(PathBuf, Image)>,
}

impl MemoryImageSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_image(mut self, path: impl Into<PathBuf>, image: Image) -> Self {
        self.images.push((path.into(), image));
        self
    }
}

impl ImageSource for MemoryImageSource {
    fn load_image(&mut self, path: &Path) -> SceneResult<Image> {
        self.images
            .iter()
            .find(|(known, _)| known == path)
            .map(|(_, image)| image.clone())
            .ok_or_else(|| SceneError::Image {
                path: path.to_path_buf(),
                reason: "not registered".to_string(),
            })
    }
}

fn rgba8(format: TextureFormat) -> bool {
    matches!(
        format,
        TextureFormat::Rgba8Unorm
            | TextureFormat::Rgba8UnormSrgb
            | TextureFormat::Bgra8Unorm
            | TextureFormat::Bgra8UnormSrgb
    )
}

/// Whether any pixel is not fully opaque.
///
/// Decoders expand every image to four channels, so the pixels are the only
/// reliable signal for whether the source carried alpha.
pub fn has_alpha(image: &Image) -> bool {
    if !rgba8(image.texture_descriptor.format) {
        return false;
    }
    image
        .data
        .as_ref()
        .is_some_and(|data| data.chunks_exact(4).any(|pixel| pixel[3] < u8::MAX))
}

/// Copy of `image` with every alpha byte set to `opacity`.
pub fn with_opacity(image: &Image, opacity: f32) -> SceneResult<Image> {
    let format = image.texture_descriptor.format;
    if !rgba8(format) {
        return Err(SceneError::Unsupported(format!(
            "cannot rewrite alpha of {format:?} image"
        )));
    }

    let alpha = (opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
    let mut faded = image.clone();
    if let Some(data) = faded.data.as_mut() {
        for pixel in data.chunks_exact_mut(4) {
            pixel[3] = alpha;
        }
    }
    Ok(faded)
}

/// Material for a textured batch, blended only when the texture has transparency.
pub fn make_material(texture: Handle<Image>, blended: bool) -> ColorMaterial {
    ColorMaterial {
        texture: Some(texture),
        alpha_mode: if blended {
            AlphaMode2d::Blend
        } else {
            AlphaMode2d::Opaque
        },
        ..default()
    }
}
