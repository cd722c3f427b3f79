//! # bevy_tmxscene
//!
//! Tiled `.tmx` maps as Bevy scene graphs.
//!
//! This is a unified meta-crate that combines the `bevy_tmxscene_*` sub-crates with a
//! feature flag for physics.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use bevy::prelude::*;
//! use bevy_tmxscene::prelude::*;
//!
//! fn main() {
//!     App::new()
//!         .add_plugins(DefaultPlugins)
//!         .add_plugins(BevyTmxScenePlugin::default())
//!         .add_systems(Startup, spawn_map)
//!         .run();
//! }
//!
//! fn spawn_map(mut commands: Commands, asset_server: Res<AssetServer>) {
//!     commands.spawn(Camera2d);
//!     commands.spawn(TmxScene::new(asset_server.load("maps/level1.tmx")));
//! }
//! ```
//!
//! ## Features
//!
//! - **default**: Includes `avian`
//! - **avian**: Physics collider generation using `avian2d`
//!
//! ## Architecture
//!
//! - **Layer 1** ([`assets`]): Reads `.tmx` files into a plain document model
//! - **Layer 2** ([`core`]): Batched tile meshes, object placement and collider data
//! - **Layer 3** (optional): [`avian`] turns collider data into physics bodies

pub mod plugin;

// Re-export sub-crates for advanced usage
pub use bevy_tmxscene_assets as assets;
pub use bevy_tmxscene_core as core;

#[cfg(feature = "avian")]
pub use bevy_tmxscene_avian as avian;

/// Unified prelude for bevy_tmxscene
pub mod prelude {
    pub use crate::assets::prelude::*;
    pub use crate::core::prelude::*;

    #[cfg(feature = "avian")]
    pub use crate::avian::prelude::*;

    pub use crate::plugin::BevyTmxScenePlugin;
}
