use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::core::system::system_order::InputSet;
use crate::interaction::bridge::editor_bridge::FireBall;
use crate::rendering::camera::camera::PreviewCamera;

/// Shift + left drag throws a ball: pressing sets the origin, the drag
/// vector pulled back from it sets the force (slingshot style).
pub struct BallThrowPlugin;

impl Plugin for BallThrowPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PendingThrow>()
            .add_systems(Update, throw_ball.in_set(InputSet));
    }
}

#[derive(Resource, Default, Debug)]
pub struct PendingThrow {
    pub origin: Option<Vec2>,
}

fn shift_held(keys: &ButtonInput<KeyCode>) -> bool {
    keys.any_pressed([KeyCode::ShiftLeft, KeyCode::ShiftRight])
}

pub fn throw_ball(
    buttons: Res<ButtonInput<MouseButton>>,
    keys: Res<ButtonInput<KeyCode>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    camera: Res<PreviewCamera>,
    mut pending: ResMut<PendingThrow>,
    mut commands: Commands,
) {
    let cursor_world = windows
        .single()
        .ok()
        .and_then(|w| w.cursor_position())
        .map(|c| camera.screen_to_world(c));

    if buttons.just_released(MouseButton::Left) {
        if let Some(origin) = pending.origin.take() {
            // Releasing outside the window drops the throw.
            if let Some(release) = cursor_world {
                commands.trigger(FireBall {
                    origin,
                    force: origin - release,
                });
            }
        }
    }
    if buttons.just_pressed(MouseButton::Left) && shift_held(&keys) {
        pending.origin = cursor_world;
    }
}
