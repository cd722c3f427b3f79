//! Asset access for scene assembly.

use std::path::{Path, PathBuf};

use bevy::platform::collections::HashMap;
use bevy::prelude::*;
use bevy::sprite_render::ColorMaterial;

use crate::error::SceneResult;
use crate::node::MeshBinding;
use crate::textures::{self, ImageSource};

/// Renderer backend handed to every assembly step that allocates assets.
///
/// Atlas textures are loaded once per path and shared by every batch that uses them.
pub struct SceneContext<'a> {
    pub meshes: &'a mut Assets<Mesh>,
    pub materials: &'a mut Assets<ColorMaterial>,
    pub images: &'a mut Assets<Image>,
    pub image_source: &'a mut dyn ImageSource,
    atlases: HashMap<PathBuf, Handle<ColorMaterial>>,
}

impl<'a> SceneContext<'a> {
    pub fn new(
        meshes: &'a mut Assets<Mesh>,
        materials: &'a mut Assets<ColorMaterial>,
        images: &'a mut Assets<Image>,
        image_source: &'a mut dyn ImageSource,
    ) -> Self {
        Self {
            meshes,
            materials,
            images,
            image_source,
            atlases: HashMap::default(),
        }
    }

    /// Material for an atlas image, loading it on first use.
    pub fn atlas_material(&mut self, path: &Path) -> SceneResult<Handle<ColorMaterial>> {
        if let Some(material) = self.atlases.get(path) {
            return Ok(material.clone());
        }

        let image = self.image_source.load_image(path)?;
        let blended = textures::has_alpha(&image);
        debug!("Loaded atlas {} (alpha blending: {})", path.display(), blended);

        let material = self.add_image_material(image, blended);
        self.atlases.insert(path.to_path_buf(), material.clone());
        Ok(material)
    }

    /// Store an image and wrap it in a material.
    pub fn add_image_material(&mut self, image: Image, blended: bool) -> Handle<ColorMaterial> {
        let texture = self.images.add(image);
        self.materials.add(textures::make_material(texture, blended))
    }

    pub fn bind_mesh(&mut self, mesh: Mesh, material: Handle<ColorMaterial>) -> MeshBinding {
        MeshBinding {
            mesh: self.meshes.add(mesh),
            material,
        }
    }

    /// Number of distinct atlases loaded so far.
    pub fn atlas_count(&self) -> usize {
        self.atlases.len()
    }
}
