use bevy::diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::prelude::*;

use crate::core::config::PreviewConfig;
use crate::rendering::background::background::BACKGROUND_LIGHT;
use crate::rendering::camera::camera::PreviewCamera;

/// Marker for the zoom / fps readout.
#[derive(Component)]
pub struct PreviewHud;

pub struct HudPlugin;

impl Plugin for HudPlugin {
    fn build(&self, app: &mut App) {
        if !app.is_plugin_added::<FrameTimeDiagnosticsPlugin>() {
            app.add_plugins(FrameTimeDiagnosticsPlugin::default());
        }
        app.add_systems(Startup, spawn_hud)
            .add_systems(Update, update_hud);
    }
}

pub fn hud_text(zoom_level: u32, fps: f64) -> String {
    format!("Zoom: {zoom_level}%\nFps: {fps:.0}")
}

fn spawn_hud(mut commands: Commands) {
    commands.spawn((
        Name::new("PreviewHUD"),
        Text::new(hud_text(100, 0.0)),
        TextFont {
            font_size: 14.0,
            ..Default::default()
        },
        TextColor(Color::BLACK),
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(5.0),
            bottom: Val::Px(5.0),
            ..default()
        },
        PreviewHud,
    ));
}

fn update_hud(
    diagnostics: Res<DiagnosticsStore>,
    camera: Res<PreviewCamera>,
    cfg: Res<PreviewConfig>,
    mut q: Query<(&mut Text, &mut TextColor), With<PreviewHud>>,
) {
    let Some((mut text, mut color)) = q.iter_mut().next() else {
        return;
    };
    let fps = diagnostics
        .get(&FrameTimeDiagnosticsPlugin::FPS)
        .and_then(|d| d.smoothed())
        .unwrap_or(0.0);
    text.0 = hud_text(camera.zoom_level(), fps);
    // Keep the readout legible on either background.
    let wanted = if cfg.options.background_light {
        Color::BLACK
    } else {
        BACKGROUND_LIGHT
    };
    if color.0 != wanted {
        color.0 = wanted;
    }
}
