//! Keeps the simulated scene in step with the editor's asset selection.
//!
//! Notifications arrive as observer events and run synchronously; every
//! command queued by a handler is applied before the next frame, so a frame
//! only ever sees the scene fully torn down or fully rebuilt.
use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use bevy_rapier2d::prelude::*;
use rand::{rngs::StdRng, SeedableRng};

use crate::core::assets::{AssetModel, AssetStore, SelectionChanged};
use crate::core::components::{AssetPreview, DrawTransform};
use crate::physics::fixtures::fixtures::build_shape_body;
use crate::physics::registry::registry::{BallTexture, DynamicObjectRegistry};
use crate::rendering::camera::camera::PreviewCamera;

pub const BALL_TEXTURE_PATH: &str = "textures/ball.png";

#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum PreviewState {
    /// No asset selected: no preview sprite, no shape body.
    #[default]
    Empty,
    /// An asset is shown. `shape_body` is `None` when none of its polygons were usable.
    Loaded { shape_body: Option<Entity> },
}

/// Rebuilds the shape body of the selected asset (after polygon edits).
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct RebuildShapeBody;

/// Removes every projectile and the shape body.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct ClearWorld;

/// Throws a ball from `origin` (editor pixels) with `force` (editor pixels).
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct FireBall {
    pub origin: Vec2,
    pub force: Vec2,
}

#[derive(Resource, Deref, DerefMut)]
pub struct PreviewRng(pub StdRng);

impl Default for PreviewRng {
    fn default() -> Self {
        Self(StdRng::from_entropy())
    }
}

/// Everything a teardown or rebuild touches.
#[derive(SystemParam)]
pub struct PreviewScene<'w, 's> {
    pub commands: Commands<'w, 's>,
    pub registry: ResMut<'w, DynamicObjectRegistry>,
    pub state: ResMut<'w, PreviewState>,
    bodies: Query<'w, 's, Entity, With<RigidBody>>,
    previews: Query<'w, 's, Entity, With<AssetPreview>>,
}

impl PreviewScene<'_, '_> {
    pub fn clear_world(&mut self) {
        self.registry.clear(&mut self.commands, self.bodies.iter());
    }

    fn clear_preview(&mut self) {
        for e in self.previews.iter() {
            self.commands.entity(e).despawn();
        }
    }

    fn build_body(&mut self, asset: &AssetModel) {
        let shape_body = build_shape_body(&mut self.commands, asset);
        *self.state = PreviewState::Loaded { shape_body };
    }
}

/// Teardown + rebuild for a new selection. `None` is the empty selection.
pub fn rebuild_preview(
    scene: &mut PreviewScene,
    camera: &mut PreviewCamera,
    asset: Option<&AssetModel>,
) {
    scene.clear_preview();
    scene.clear_world();

    let Some(asset) = asset else {
        *scene.state = PreviewState::Empty;
        info!("selection cleared");
        return;
    };

    let size = asset.texture_size;
    let draw = DrawTransform::centered(size, Vec2::ZERO);
    scene.commands.spawn((
        AssetPreview,
        Sprite {
            image: asset.texture.clone(),
            custom_size: Some(size),
            ..default()
        },
        draw,
        Transform::from_translation(draw.center().extend(0.0)),
    ));
    camera.position = asset.texture_center();

    scene.build_body(asset);
    info!(asset = %asset.name, polygons = asset.polygons.len(), "asset loaded into preview");
}

pub fn on_selection_changed(
    _trigger: Trigger<SelectionChanged>,
    mut scene: PreviewScene,
    mut camera: ResMut<PreviewCamera>,
    store: Res<AssetStore>,
) {
    rebuild_preview(&mut scene, &mut camera, store.selected());
}

/// Clears the world and rebuilds the shape body; the preview sprite stays.
pub fn on_rebuild_shape_body(
    _trigger: Trigger<RebuildShapeBody>,
    mut scene: PreviewScene,
    store: Res<AssetStore>,
) {
    scene.clear_world();
    match store.selected() {
        Some(asset) => scene.build_body(asset),
        None => *scene.state = PreviewState::Empty,
    }
}

pub fn on_clear_world(_trigger: Trigger<ClearWorld>, mut scene: PreviewScene) {
    scene.clear_world();
    if let PreviewState::Loaded { shape_body } = &mut *scene.state {
        *shape_body = None;
    }
}

pub fn on_fire_ball(
    trigger: Trigger<FireBall>,
    mut commands: Commands,
    mut registry: ResMut<DynamicObjectRegistry>,
    mut rng: ResMut<PreviewRng>,
    texture: Res<BallTexture>,
) {
    let FireBall { origin, force } = *trigger.event();
    registry.spawn_projectile(&mut commands, &mut rng.0, &texture, origin, force);
}

fn load_ball_texture(asset_server: Option<Res<AssetServer>>, mut texture: ResMut<BallTexture>) {
    if let Some(server) = asset_server {
        texture.0 = server.load(BALL_TEXTURE_PATH);
    }
}

pub struct EditorBridgePlugin;

impl Plugin for EditorBridgePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AssetStore>()
            .init_resource::<PreviewState>()
            .init_resource::<DynamicObjectRegistry>()
            .init_resource::<BallTexture>()
            .init_resource::<PreviewRng>()
            .init_resource::<PreviewCamera>()
            .add_observer(on_selection_changed)
            .add_observer(on_rebuild_shape_body)
            .add_observer(on_clear_world)
            .add_observer(on_fire_ball)
            .add_systems(Startup, load_ball_texture);
    }
}
