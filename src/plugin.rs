//! Unified plugin for bevy_tmxscene.

use bevy::prelude::*;

use bevy_tmxscene_core::{TmxSceneConfig, TmxSceneCorePlugin};

#[cfg(feature = "avian")]
use bevy_tmxscene_avian::{PhysicsConfig, TmxSceneAvianPlugin};

/// Unified plugin that adds all enabled bevy_tmxscene functionality.
///
/// This plugin automatically includes:
/// - Scene assembly and spawning ([`TmxSceneCorePlugin`])
/// - Avian2D colliders for tile collision boxes when the `avian` feature is on
///
/// # With Custom Configuration
///
/// ```rust,no_run
/// use bevy::prelude::*;
/// use bevy_tmxscene::prelude::*;
///
/// App::new()
///     .add_plugins(DefaultPlugins)
///     .add_plugins(
///         BevyTmxScenePlugin::default()
///             .with_core(TmxSceneConfig::default().with_nearest_sampling(false)),
///     )
///     .run();
/// ```
#[derive(Default)]
pub struct BevyTmxScenePlugin {
    /// Core configuration
    pub core: TmxSceneConfig,

    /// Avian physics configuration (if feature enabled)
    #[cfg(feature = "avian")]
    pub avian: PhysicsConfig,
}

impl BevyTmxScenePlugin {
    /// Create with custom core configuration
    pub fn with_core(mut self, config: TmxSceneConfig) -> Self {
        self.core = config;
        self
    }

    /// Create with custom Avian physics configuration
    #[cfg(feature = "avian")]
    pub fn with_avian(mut self, config: PhysicsConfig) -> Self {
        self.avian = config;
        self
    }
}

impl Plugin for BevyTmxScenePlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(TmxSceneCorePlugin::new(self.core.clone()));

        // Layer 3: Physics (feature-gated)
        #[cfg(feature = "avian")]
        app.add_plugins(TmxSceneAvianPlugin::new(self.avian.clone()));

        info!("BevyTmxScenePlugin initialized");
    }
}
