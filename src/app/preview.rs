use bevy::prelude::*;

use crate::core::config::PreviewConfig;
use crate::core::system::system_order::InputSet;
use crate::interaction::bridge::editor_bridge::EditorBridgePlugin;
use crate::interaction::input::ball_throw::BallThrowPlugin;
use crate::interaction::input::pan_zoom::PanZoomPlugin;
use crate::interaction::session::config_hot_reload::ConfigHotReloadPlugin;
use crate::physics::rapier::rapier_physics::PhysicsSetupPlugin;
use crate::physics::sync::sync::SimulationSyncPlugin;
use crate::rendering::background::background::BackgroundPlugin;
use crate::rendering::camera::camera::CameraPlugin;
use crate::rendering::grid::grid::GridPlugin;
use crate::rendering::hud::hud::HudPlugin;

/// Everything the live preview needs on top of `DefaultPlugins`.
/// Expects a [`PreviewConfig`] resource; falls back to defaults otherwise.
pub struct PreviewPlugin;

impl Plugin for PreviewPlugin {
    fn build(&self, app: &mut App) {
        if !app.world().contains_resource::<PreviewConfig>() {
            app.insert_resource(PreviewConfig::default());
        }
        app.configure_sets(Update, InputSet).add_plugins((
            CameraPlugin,
            PhysicsSetupPlugin,
            SimulationSyncPlugin,
            EditorBridgePlugin,
            PanZoomPlugin,
            BallThrowPlugin,
            BackgroundPlugin,
            GridPlugin,
            HudPlugin,
            ConfigHotReloadPlugin,
        ));
    }
}
