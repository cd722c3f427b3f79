//! Basic example spawning a TMX map as a batched scene.
//!
//! This example shows:
//! - Requesting a map with a `TmxScene` component holding an asset handle
//! - Reacting to `TmxSceneSpawned` / `TmxSceneLoadFailed` with observers
//! - Walking the spawned layer hierarchy
//! - Respawning the scene with the `RespawnTmxScene` marker (press R)

use bevy::prelude::*;
use bevy_tmxscene_core::prelude::*;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(ImagePlugin::default_nearest()))
        .add_plugins(TmxSceneCorePlugin::default())
        .add_observer(on_scene_spawned)
        .add_observer(on_scene_failed)
        .add_systems(Startup, setup)
        .add_systems(Update, respawn_on_key)
        .run();
}

fn setup(mut commands: Commands, asset_server: Res<AssetServer>) {
    commands.spawn((
        Camera2d,
        Projection::Orthographic(OrthographicProjection {
            scale: 0.25,
            ..OrthographicProjection::default_2d()
        }),
        Transform::from_xyz(64.0, -32.0, 0.0),
    ));

    commands.spawn(TmxScene::new(asset_server.load("maps/demo.tmx")));

    info!("Map requested - layers will appear once the asset has loaded");
}

/// Log every layer of a freshly spawned scene.
fn on_scene_spawned(
    spawned: On<TmxSceneSpawned>,
    names: Query<&Name>,
    children: Query<&Children>,
    layers: Query<&TmxLayer>,
) {
    let root = spawned.event().entity;
    let map_name = names.get(root).map(Name::as_str).unwrap_or("?");
    info!("=== Map: {} (Entity: {:?}) ===", map_name, root);

    for layer in children.iter_descendants(root) {
        let Ok(kind) = layers.get(layer) else {
            continue;
        };
        let name = names.get(layer).map(Name::as_str).unwrap_or("?");
        let count = children.get(layer).map(|c| c.len()).unwrap_or(0);
        info!("  {:?} layer '{}' with {} child node(s)", kind, name, count);
    }
}

fn on_scene_failed(failed: On<TmxSceneLoadFailed>) {
    error!("Map failed to load: {}", failed.event().message);
}

fn respawn_on_key(
    keys: Res<ButtonInput<KeyCode>>,
    scenes: Query<Entity, With<TmxSceneRoot>>,
    mut commands: Commands,
) {
    if !keys.just_pressed(KeyCode::KeyR) {
        return;
    }
    for entity in &scenes {
        commands.entity(entity).insert(RespawnTmxScene);
    }
}
