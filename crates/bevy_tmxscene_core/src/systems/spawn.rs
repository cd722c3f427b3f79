//! Reactive spawning system for `TmxScene` requests.

use bevy::asset::LoadState;
use bevy::prelude::*;
use bevy::sprite_render::ColorMaterial;
use bevy_tmxscene_assets::TmxDocument;

use crate::components::{TmxScene, TmxSceneFailed, TmxSceneRoot};
use crate::events::{TmxSceneLoadFailed, TmxSceneSpawned};
use crate::plugin::TmxSceneConfig;
use crate::spawn::build_scene;
use crate::systems::SceneContext;
use crate::textures::DocumentImageSource;

/// Marker component to trigger scene respawning.
///
/// The current children of the request entity are despawned and the map is
/// assembled again from its current asset.
#[derive(Component)]
pub struct RespawnTmxScene;

/// Assembles every pending [`TmxScene`] whose asset has loaded and spawns its
/// hierarchy under the request entity.
///
/// Runs in `PreUpdate`. A request is pending until it carries [`TmxSceneRoot`] or
/// [`TmxSceneFailed`], or whenever [`RespawnTmxScene`] is present. Requests whose
/// asset is still loading are retried next frame.
pub fn spawn_requested_scenes(
    mut commands: Commands,
    config: Res<TmxSceneConfig>,
    asset_server: Res<AssetServer>,
    documents: Res<Assets<TmxDocument>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    mut images: ResMut<Assets<Image>>,
    requests: Query<
        (Entity, &TmxScene, Has<RespawnTmxScene>),
        Or<(
            (Without<TmxSceneRoot>, Without<TmxSceneFailed>),
            With<RespawnTmxScene>,
        )>,
    >,
) {
    for (entity, request, respawn) in &requests {
        let Some(document) = documents.get(&request.handle) else {
            if let Some(LoadState::Failed(err)) = asset_server.get_load_state(&request.handle) {
                fail_request(&mut commands, entity, format!("map asset failed to load: {err}"));
            }
            continue;
        };

        info!(
            "Spawning map '{}' for entity {:?}",
            document.map.source.display(),
            entity
        );

        if respawn {
            commands
                .entity(entity)
                .despawn_related::<Children>()
                .remove::<(TmxSceneRoot, TmxSceneFailed, RespawnTmxScene)>();
        }

        let mut source = DocumentImageSource::new(document, config.nearest_sampling);
        let mut ctx = SceneContext::new(&mut meshes, &mut materials, &mut images, &mut source);

        match build_scene(&document.map, &mut ctx, &config) {
            Ok(root) => {
                root.spawn_onto(&mut commands, entity);
                commands.entity(entity).insert(TmxSceneRoot);

                info!("Map hierarchy spawned successfully");
                commands
                    .entity(entity)
                    .trigger(|entity| TmxSceneSpawned { entity });
            }
            Err(err) => fail_request(&mut commands, entity, err.to_string()),
        }
    }
}

fn fail_request(commands: &mut Commands, entity: Entity, message: String) {
    error!("Failed to spawn map for entity {:?}: {}", entity, message);
    commands
        .entity(entity)
        .remove::<RespawnTmxScene>()
        .insert(TmxSceneFailed {
            message: message.clone(),
        });
    commands
        .entity(entity)
        .trigger(move |entity| TmxSceneLoadFailed { entity, message });
}
