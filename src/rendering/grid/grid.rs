use bevy::prelude::*;

use crate::core::config::PreviewConfig;
use crate::rendering::camera::camera::PreviewCamera;

const GRID_COLOR: Color = Color::srgba(0.5, 0.5, 0.5, 0.35);
/// Skip drawing when lines would be closer than this on screen.
const MIN_SCREEN_SPACING: f32 = 4.0;

pub struct GridPlugin;

impl Plugin for GridPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, draw_grid);
    }
}

/// Multiples of `gap` covering `[min, max]`.
pub fn grid_lines(min: f32, max: f32, gap: f32) -> impl Iterator<Item = f32> {
    let first = (min / gap).floor() as i64;
    let last = (max / gap).ceil() as i64;
    (first..=last).map(move |k| k as f32 * gap)
}

/// Grid in editor-world units, so it lines up with snapped points.
fn draw_grid(cfg: Res<PreviewConfig>, camera: Res<PreviewCamera>, mut gizmos: Gizmos) {
    let options = &cfg.options;
    if !options.grid_shown || !options.grid_gap.is_finite() || options.grid_gap <= 0.0 {
        return;
    }
    let gap = options.grid_gap;
    if gap / camera.zoom() < MIN_SCREEN_SPACING {
        return;
    }
    let vp = camera.viewport();
    let top_left = camera.screen_to_world(Vec2::ZERO);
    let bottom_right = camera.screen_to_world(vp);
    let (min, max) = (top_left.min(bottom_right), top_left.max(bottom_right));
    for x in grid_lines(min.x, max.x, gap) {
        gizmos.line_2d(Vec2::new(x, min.y), Vec2::new(x, max.y), GRID_COLOR);
    }
    for y in grid_lines(min.y, max.y, gap) {
        gizmos.line_2d(Vec2::new(min.x, y), Vec2::new(max.x, y), GRID_COLOR);
    }
}
