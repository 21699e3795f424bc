use bevy::input::mouse::MouseWheel;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::core::system::system_order::InputSet;
use crate::rendering::camera::camera::PreviewCamera;

pub struct PanZoomPlugin;

impl Plugin for PanZoomPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ActivePan>()
            .add_systems(Update, (zoom_with_wheel, pan_with_drag).in_set(InputSet));
    }
}

/// Cursor position (screen) recorded on the previous frame of a pan drag.
#[derive(Resource, Default, Debug)]
pub struct ActivePan {
    pub last_cursor: Option<Vec2>,
}

/// Camera offset that keeps the world point under `from` under `to`.
pub fn pan_delta(camera: &PreviewCamera, from: Vec2, to: Vec2) -> Vec2 {
    camera.screen_to_world(from) - camera.screen_to_world(to)
}

pub fn zoom_with_wheel(mut wheel: EventReader<MouseWheel>, mut camera: ResMut<PreviewCamera>) {
    for ev in wheel.read() {
        let before = camera.zoom_level();
        if ev.y > 0.0 {
            camera.zoom_in();
        } else if ev.y < 0.0 {
            camera.zoom_out();
        }
        if camera.zoom_level() != before {
            debug!(zoom = camera.zoom_level(), "zoom level changed");
        }
    }
}

pub fn pan_with_drag(
    buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut camera: ResMut<PreviewCamera>,
    mut pan: ResMut<ActivePan>,
) {
    if !(buttons.pressed(MouseButton::Right) || buttons.pressed(MouseButton::Middle)) {
        pan.last_cursor = None;
        return;
    }
    let Ok(window) = windows.single() else {
        return;
    };
    let Some(cursor) = window.cursor_position() else {
        return;
    };
    if let Some(last) = pan.last_cursor {
        let delta = pan_delta(&camera, last, cursor);
        if delta != Vec2::ZERO {
            camera.position += delta;
        }
    }
    pan.last_cursor = Some(cursor);
}
