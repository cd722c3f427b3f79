use bevy::prelude::*;

use crate::asset::TmxDocument;
use crate::loaders::TmxDocumentLoader;

/// Plugin that registers the [`TmxDocument`] asset and its `.tmx` loader.
///
/// # Example
/// ```no_run
/// use bevy::prelude::*;
/// use bevy_tmxscene_assets::TmxSceneAssetsPlugin;
///
/// App::new()
///     .add_plugins(DefaultPlugins)
///     .add_plugins(TmxSceneAssetsPlugin)
///     .run();
/// ```
///
/// This is a **Layer 1** plugin: asset loading only, nothing is spawned.
pub struct TmxSceneAssetsPlugin;

impl Plugin for TmxSceneAssetsPlugin {
    fn build(&self, app: &mut App) {
        app.init_asset::<TmxDocument>()
            .register_asset_loader(TmxDocumentLoader);
    }
}
