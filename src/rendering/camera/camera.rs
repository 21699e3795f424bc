use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::core::config::{PreviewConfig, PreviewOptions};

/// Zoom percentages offered to the user, smallest to largest.
pub const ZOOM_LEVELS: [u32; 19] = [
    16, 25, 33, 50, 66, 100, 150, 200, 300, 400, 600, 800, 1000, 1500, 2000, 2500, 3000, 4000,
    5000,
];

/// Camera state the preview maps through. Lives as a resource so input and
/// bridge systems share one camera; the Bevy `Camera2d` is a follower.
///
/// Screen coordinates are window pixels with the origin top-left and y down,
/// as reported by `Window::cursor_position`. World coordinates are editor
/// pixels with y up.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct PreviewCamera {
    /// World position shown at the viewport center.
    pub position: Vec2,
    viewport: Vec2,
    /// World units per screen pixel.
    zoom: f32,
    /// Percentage shown to the user; one of [`ZOOM_LEVELS`].
    zoom_level: u32,
}

impl Default for PreviewCamera {
    fn default() -> Self {
        Self::new(Vec2::new(1280.0, 720.0))
    }
}

impl PreviewCamera {
    pub fn new(viewport: Vec2) -> Self {
        let mut cam = Self {
            position: Vec2::ZERO,
            viewport: Vec2::ONE,
            zoom: 1.0,
            zoom_level: 100,
        };
        cam.set_viewport(viewport);
        cam
    }

    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    /// Ignores non-positive sizes (minimized windows report 0x0).
    pub fn set_viewport(&mut self, viewport: Vec2) -> bool {
        if viewport.x > 0.0 && viewport.y > 0.0 && viewport != self.viewport {
            self.viewport = viewport;
            return true;
        }
        false
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn zoom_level(&self) -> u32 {
        self.zoom_level
    }

    /// Sets the displayed percentage and derives the camera zoom from it.
    pub fn set_zoom_level(&mut self, level: u32) {
        if level == 0 {
            return;
        }
        self.zoom_level = level;
        self.zoom = 100.0 / level as f32;
    }

    /// Next ladder step above the current level; stays put at the top.
    pub fn zoom_in(&mut self) {
        if let Some(&next) = ZOOM_LEVELS.iter().find(|&&l| l > self.zoom_level) {
            self.set_zoom_level(next);
        }
    }

    /// Next ladder step below the current level; stays put at the bottom.
    pub fn zoom_out(&mut self) {
        if let Some(&prev) = ZOOM_LEVELS.iter().rev().find(|&&l| l < self.zoom_level) {
            self.set_zoom_level(prev);
        }
    }

    pub fn screen_to_world(&self, screen: Vec2) -> Vec2 {
        let half = self.viewport * 0.5;
        Vec2::new(
            self.position.x + (screen.x - half.x) * self.zoom,
            self.position.y + (half.y - screen.y) * self.zoom,
        )
    }

    pub fn world_to_screen(&self, world: Vec2) -> Vec2 {
        let half = self.viewport * 0.5;
        Vec2::new(
            (world.x - self.position.x) / self.zoom + half.x,
            half.y - (world.y - self.position.y) / self.zoom,
        )
    }

    /// [`screen_to_world`](Self::screen_to_world) followed by grid snapping
    /// when the options enable it with a usable gap.
    pub fn aligned_screen_to_world(&self, screen: Vec2, options: &PreviewOptions) -> Vec2 {
        let p = self.screen_to_world(screen);
        match options.active_snap_gap() {
            Some(gap) => snap_to_grid(p, gap),
            None => p,
        }
    }
}

/// Rounds each axis to the nearest multiple of `gap`. Callers guarantee `gap > 0`.
pub fn snap_to_grid(p: Vec2, gap: f32) -> Vec2 {
    Vec2::new((p.x / gap).round() * gap, (p.y / gap).round() * gap)
}

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        let viewport = app
            .world()
            .get_resource::<PreviewConfig>()
            .map(|cfg| Vec2::new(cfg.window.width, cfg.window.height))
            .unwrap_or(Vec2::new(1280.0, 720.0));
        app.insert_resource(PreviewCamera::new(viewport))
            .add_systems(Startup, setup_camera)
            .add_systems(PreUpdate, sync_viewport)
            .add_systems(PostUpdate, apply_preview_camera);
    }
}

fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}

/// Follows window resizes.
pub fn sync_viewport(
    windows: Query<&Window, With<PrimaryWindow>>,
    mut camera: ResMut<PreviewCamera>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    let size = Vec2::new(window.width(), window.height());
    if camera.viewport() != size && camera.set_viewport(size) {
        debug!(width = size.x, height = size.y, "viewport resized");
    }
}

/// Mirrors the preview camera onto the render camera.
pub fn apply_preview_camera(
    camera: Res<PreviewCamera>,
    mut cams: Query<(&mut Transform, &mut Projection), With<Camera2d>>,
) {
    if !camera.is_changed() {
        return;
    }
    for (mut tf, mut projection) in &mut cams {
        tf.translation.x = camera.position.x;
        tf.translation.y = camera.position.y;
        if let Projection::Orthographic(ref mut ortho) = *projection {
            ortho.scale = camera.zoom();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cams() -> Vec<PreviewCamera> {
        let mut out = Vec::new();
        for &(pos, vp, level) in &[
            (Vec2::ZERO, Vec2::new(800.0, 600.0), 100),
            (Vec2::new(123.5, -40.25), Vec2::new(1280.0, 720.0), 33),
            (Vec2::new(-900.0, 4000.0), Vec2::new(331.0, 97.0), 5000),
            (Vec2::new(10.0, 10.0), Vec2::new(1.0, 1.0), 16),
        ] {
            let mut c = PreviewCamera::new(vp);
            c.position = pos;
            c.set_zoom_level(level);
            out.push(c);
        }
        out
    }

    #[test]
    fn screen_world_round_trip() {
        let points = [
            Vec2::ZERO,
            Vec2::new(12.0, -7.5),
            Vec2::new(-3000.0, 2500.0),
            Vec2::new(0.125, 999.0),
        ];
        for cam in cams() {
            for p in points {
                let back = cam.screen_to_world(cam.world_to_screen(p));
                let tol = 1e-3 * (1.0 + p.abs().max_element());
                assert!(back.abs_diff_eq(p, tol), "{p:?} -> {back:?} via {cam:?}");
            }
        }
    }

    #[test]
    fn viewport_center_maps_to_camera_position() {
        let mut cam = PreviewCamera::new(Vec2::new(800.0, 600.0));
        cam.position = Vec2::new(64.0, 32.0);
        assert_eq!(cam.screen_to_world(Vec2::new(400.0, 300.0)), cam.position);
        // Top-left of the screen is up-left in the world.
        let tl = cam.screen_to_world(Vec2::ZERO);
        assert_eq!(tl, Vec2::new(64.0 - 400.0, 32.0 + 300.0));
    }

    #[test]
    fn zoom_scales_distance_from_center() {
        let mut cam = PreviewCamera::new(Vec2::new(800.0, 600.0));
        cam.set_zoom_level(200);
        assert_eq!(cam.zoom(), 0.5);
        assert_eq!(cam.screen_to_world(Vec2::new(500.0, 300.0)), Vec2::new(50.0, 0.0));
    }

    #[test]
    fn snapped_output_is_multiple_of_gap() {
        let cam = cams().remove(1);
        for gap in [0.5_f32, 1.0, 7.0, 10.0, 33.3] {
            let opts = PreviewOptions {
                snap_to_grid: true,
                grid_gap: gap,
                ..Default::default()
            };
            for s in [Vec2::new(3.0, 4.0), Vec2::new(611.0, 17.0), Vec2::new(1279.0, 719.0)] {
                let p = cam.aligned_screen_to_world(s, &opts);
                for v in [p.x, p.y] {
                    let k = v / gap;
                    assert!((k - k.round()).abs() < 1e-3, "{v} not a multiple of {gap}");
                }
            }
        }
    }

    #[test]
    fn invalid_gap_leaves_point_unsnapped() {
        let cam = PreviewCamera::new(Vec2::new(800.0, 600.0));
        let s = Vec2::new(413.0, 287.0);
        for gap in [0.0, -5.0] {
            let opts = PreviewOptions {
                snap_to_grid: true,
                grid_gap: gap,
                ..Default::default()
            };
            assert_eq!(cam.aligned_screen_to_world(s, &opts), cam.screen_to_world(s));
        }
    }

    #[test]
    fn ladder_steps_and_clamps() {
        let mut cam = PreviewCamera::default();
        cam.zoom_in();
        assert_eq!(cam.zoom_level(), 150);
        cam.set_zoom_level(5000);
        cam.zoom_in();
        assert_eq!(cam.zoom_level(), 5000);
        cam.set_zoom_level(16);
        cam.zoom_out();
        assert_eq!(cam.zoom_level(), 16);
        assert!((cam.zoom() - 6.25).abs() < 1e-6);
    }

    #[test]
    fn degenerate_viewport_ignored() {
        let mut cam = PreviewCamera::new(Vec2::new(800.0, 600.0));
        assert!(!cam.set_viewport(Vec2::ZERO));
        assert_eq!(cam.viewport(), Vec2::new(800.0, 600.0));
    }
}
