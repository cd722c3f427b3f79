//! Tile colliders turned into Avian physics bodies.
//!
//! This example demonstrates:
//! - Loading the demo map shipped with `bevy_tmxscene_core`
//! - Static compound colliders generated for every tile with collision boxes
//! - A dynamic ball falling onto the tiles
//! - Debug gizmo visualization of the colliders
//!
//! Press Space to drop another ball.

use avian2d::prelude::*;
use bevy::prelude::*;
use bevy_tmxscene_avian::prelude::*;
use bevy_tmxscene_core::prelude::*;

fn main() {
    App::new()
        .add_plugins(
            DefaultPlugins
                .set(ImagePlugin::default_nearest())
                .set(AssetPlugin {
                    file_path: "../bevy_tmxscene_core/assets".to_string(),
                    ..default()
                }),
        )
        .add_plugins(PhysicsPlugins::default().with_length_unit(16.0))
        .add_plugins(PhysicsDebugPlugin)
        .add_plugins(TmxSceneCorePlugin::default())
        .add_plugins(TmxSceneAvianPlugin::default())
        .insert_resource(Gravity(Vec2::NEG_Y * 200.0))
        .add_observer(on_scene_spawned)
        .add_systems(Startup, setup)
        .add_systems(Update, drop_ball)
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
}

fn on_scene_spawned(
    spawned: On<TmxSceneSpawned>,
    children: Query<&Children>,
    bodies: Query<&RigidBody>,
) {
    let bodies = children
        .iter_descendants(spawned.event().entity)
        .filter(|entity| bodies.contains(*entity))
        .count();
    info!("Scene spawned with {} tile collider body(ies)", bodies);
}

fn drop_ball(keys: Res<ButtonInput<KeyCode>>, mut commands: Commands, mut started: Local<bool>) {
    if *started && !keys.just_pressed(KeyCode::Space) {
        return;
    }
    *started = true;

    commands.spawn((
        RigidBody::Dynamic,
        Collider::circle(4.0),
        Transform::from_xyz(40.0, 16.0, 10.0),
    ));
}
