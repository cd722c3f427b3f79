//! `Avian2D` physics integration for `bevy_tmxscene`.
//!
//! Tile collision boxes spawned by `bevy_tmxscene_core` arrive as plain
//! `TileCollider` components. This crate turns each one into a compound
//! [`Collider`](avian2d::prelude::Collider) of rectangles with a static body.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use bevy::prelude::*;
//! use bevy_tmxscene_avian::TmxSceneAvianPlugin;
//! use avian2d::prelude::*;
//!
//! App::new()
//!     .add_plugins(DefaultPlugins)
//!     .add_plugins(PhysicsPlugins::default())
//!     .add_plugins(TmxSceneAvianPlugin::default())
//!     .run();
//! ```

pub mod colliders;
pub mod config;
pub mod plugin;

pub mod prelude {
    //! Common imports for `bevy_tmxscene_avian`.

    pub use crate::config::*;
    pub use crate::plugin::TmxSceneAvianPlugin;
}

// Re-export at crate root for convenience
pub use config::PhysicsConfig;
pub use plugin::TmxSceneAvianPlugin;
