//! Systems and context used by the spawning pipeline.

mod context;
mod spawn;

pub use context::SceneContext;
pub use spawn::{RespawnTmxScene, spawn_requested_scenes};
