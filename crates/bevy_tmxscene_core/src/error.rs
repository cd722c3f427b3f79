//! Errors raised while assembling a scene from a map document.

use std::path::PathBuf;

use bevy_tmxscene_assets::DocumentError;
use thiserror::Error;

/// Every failure aborts the whole load; no partial scene is produced.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("Unsupported input: {0}")]
    Unsupported(String),

    #[error("Invalid configuration: {0}")]
    Configuration(String),

    #[error("No tileset owns gid {gid}")]
    Lookup { gid: u32 },

    #[error(transparent)]
    Document(#[from] DocumentError),

    #[error("Failed to load image {}: {reason}", path.display())]
    Image { path: PathBuf, reason: String },
}

pub type SceneResult<T> = Result<T, SceneError>;
