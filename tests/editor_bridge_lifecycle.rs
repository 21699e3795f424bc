//! Selection, rebuild, clear and throw flows through the editor bridge,
//! driven headless with `MinimalPlugins`.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;
use rand::{rngs::StdRng, SeedableRng};

use shape_preview::core::components::{AssetPreview, Fixture, Projectile, ProjectileSprite, ShapeBody};
use shape_preview::interaction::bridge::editor_bridge::{EditorBridgePlugin, PreviewRng};
use shape_preview::physics::sync::sync::SimulationSyncPlugin;
use shape_preview::{
    select_asset, AssetModel, AssetStore, ClearWorld, DynamicObjectRegistry, FireBall,
    PreviewCamera, PreviewState, RebuildShapeBody,
};

fn app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .add_plugins((EditorBridgePlugin, SimulationSyncPlugin))
        .insert_resource(PreviewRng(StdRng::seed_from_u64(11)));
    app.update();
    app
}

/// Square, collinear sliver, triangle.
fn crate_asset() -> AssetModel {
    AssetModel::new("crate", Handle::default(), Vec2::new(200.0, 100.0))
        .with_polygon(vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(100.0, 0.0),
            Vec2::new(100.0, 100.0),
            Vec2::new(0.0, 100.0),
        ])
        .with_polygon(vec![Vec2::new(0.0, 0.0), Vec2::new(50.0, 0.0), Vec2::new(100.0, 0.0)])
        .with_polygon(vec![
            Vec2::new(100.0, 0.0),
            Vec2::new(200.0, 0.0),
            Vec2::new(150.0, 80.0),
        ])
}

fn count<F: bevy::ecs::query::QueryFilter>(app: &mut App) -> usize {
    let world = app.world_mut();
    let mut q = world.query_filtered::<Entity, F>();
    q.iter(world).count()
}

fn fixture_indices(app: &mut App, body: Entity) -> Vec<usize> {
    let world = app.world_mut();
    let mut q = world.query::<(&Fixture, &ChildOf)>();
    let mut out: Vec<usize> = q
        .iter(world)
        .filter(|(_, child_of)| child_of.parent() == body)
        .map(|(f, _)| f.polygon_index)
        .collect();
    out.sort_unstable();
    out
}

fn fire(app: &mut App, origin: Vec2) {
    app.world_mut().trigger(FireBall {
        origin,
        force: Vec2::new(10.0, 0.0),
    });
    app.update();
}

#[test]
fn selecting_asset_builds_preview_and_shape_body() {
    let mut app = app();
    select_asset(app.world_mut(), Some(crate_asset()));
    app.update();

    assert_eq!(count::<With<AssetPreview>>(&mut app), 1);
    assert_eq!(count::<With<ShapeBody>>(&mut app), 1);
    let state = *app.world().resource::<PreviewState>();
    let PreviewState::Loaded { shape_body: Some(body) } = state else {
        panic!("expected a loaded shape body, got {state:?}");
    };
    assert_eq!(app.world().get::<RigidBody>(body), Some(&RigidBody::Fixed));
    assert_eq!(fixture_indices(&mut app, body), vec![0, 2]);

    let camera = app.world().resource::<PreviewCamera>();
    assert_eq!(camera.position, Vec2::new(100.0, 50.0));
}

#[test]
fn fixtures_carry_shape_materials() {
    let mut app = app();
    select_asset(app.world_mut(), Some(crate_asset()));
    app.update();

    let world = app.world_mut();
    let mut q = world.query::<(&Fixture, &Friction, &Restitution, &ColliderMassProperties)>();
    let mut seen = 0;
    for (_, friction, restitution, mass) in q.iter(world) {
        assert_eq!(friction.coefficient, 0.8);
        assert_eq!(restitution.coefficient, 0.2);
        assert!(
            matches!(mass, ColliderMassProperties::Density(d) if *d == 1.0),
            "{mass:?}"
        );
        seen += 1;
    }
    assert_eq!(seen, 2);
}

#[test]
fn reselecting_replaces_previous_scene() {
    let mut app = app();
    select_asset(app.world_mut(), Some(crate_asset()));
    app.update();
    fire(&mut app, Vec2::new(50.0, 300.0));
    fire(&mut app, Vec2::new(80.0, 300.0));
    assert_eq!(app.world().resource::<DynamicObjectRegistry>().len(), 2);

    select_asset(app.world_mut(), Some(crate_asset()));
    app.update();

    assert_eq!(count::<With<AssetPreview>>(&mut app), 1);
    assert_eq!(count::<With<ShapeBody>>(&mut app), 1);
    assert_eq!(count::<With<Projectile>>(&mut app), 0);
    assert_eq!(count::<With<ProjectileSprite>>(&mut app), 0);
    assert!(app.world().resource::<DynamicObjectRegistry>().is_empty());
}

#[test]
fn empty_selection_tears_everything_down() {
    let mut app = app();
    select_asset(app.world_mut(), Some(crate_asset()));
    app.update();
    fire(&mut app, Vec2::new(50.0, 300.0));

    select_asset(app.world_mut(), None);
    app.update();

    assert_eq!(count::<With<RigidBody>>(&mut app), 0);
    assert_eq!(count::<With<Collider>>(&mut app), 0);
    assert_eq!(count::<With<AssetPreview>>(&mut app), 0);
    assert_eq!(count::<With<ProjectileSprite>>(&mut app), 0);
    assert!(app.world().resource::<DynamicObjectRegistry>().is_empty());
    assert_eq!(*app.world().resource::<PreviewState>(), PreviewState::Empty);
}

#[test]
fn asset_without_usable_polygons_has_no_body() {
    let mut app = app();
    let asset = AssetModel::new("dust", Handle::default(), Vec2::new(32.0, 32.0))
        .with_polygon(vec![Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0)])
        .with_polygon(vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(0.1, 0.0),
            Vec2::new(0.0, 0.1),
        ]);
    select_asset(app.world_mut(), Some(asset));
    app.update();

    assert_eq!(
        *app.world().resource::<PreviewState>(),
        PreviewState::Loaded { shape_body: None }
    );
    assert_eq!(count::<With<RigidBody>>(&mut app), 0);
    assert_eq!(count::<With<AssetPreview>>(&mut app), 1);
}

#[test]
fn clear_world_keeps_preview_and_rebuild_restores_body() {
    let mut app = app();
    select_asset(app.world_mut(), Some(crate_asset()));
    app.update();
    fire(&mut app, Vec2::new(50.0, 300.0));

    app.world_mut().trigger(ClearWorld);
    app.update();
    assert_eq!(count::<With<RigidBody>>(&mut app), 0);
    assert_eq!(count::<With<AssetPreview>>(&mut app), 1);
    assert_eq!(
        *app.world().resource::<PreviewState>(),
        PreviewState::Loaded { shape_body: None }
    );

    // Polygon edit: drop the triangle, then rebuild.
    if let Some(asset) = app.world_mut().resource_mut::<AssetStore>().selected_mut() {
        asset.polygons.truncate(1);
    }
    app.world_mut().trigger(RebuildShapeBody);
    app.update();

    let PreviewState::Loaded { shape_body: Some(body) } = *app.world().resource::<PreviewState>()
    else {
        panic!("rebuild should produce a shape body");
    };
    assert_eq!(fixture_indices(&mut app, body), vec![0]);
    assert_eq!(count::<With<ShapeBody>>(&mut app), 1);
}

#[test]
fn fire_ball_adds_one_projectile_each() {
    let mut app = app();
    for i in 0..5 {
        fire(&mut app, Vec2::new(i as f32 * 30.0, 200.0));
    }
    let registry = app.world().resource::<DynamicObjectRegistry>();
    assert_eq!(registry.len(), 5);
    let bodies: Vec<Entity> = registry.bodies().collect();
    for body in bodies {
        assert!(app.world().get::<Projectile>(body).is_some());
    }
    assert_eq!(count::<With<ProjectileSprite>>(&mut app), 5);
}
