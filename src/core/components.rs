use bevy::prelude::*;

/// Fixed scale between editor pixels and physics meters.
pub const PX_PER_METER: f32 = 50.0;

/// Marker for the fixed body carrying the selected asset's collision fixtures.
#[derive(Component, Debug)]
pub struct ShapeBody;

/// One collision fixture of the shape body. `polygon_index` points back into
/// the asset's polygon list so edits can be traced to colliders.
#[derive(Component, Debug, Copy, Clone, PartialEq, Eq)]
pub struct Fixture {
    pub polygon_index: usize,
}

/// Marker for a dynamic ball body thrown by the user.
#[derive(Component, Debug)]
pub struct Projectile;

/// Marker for the sprite paired with a [`Projectile`] body.
#[derive(Component, Debug)]
pub struct ProjectileSprite;

/// Marker for the sprite showing the selected asset's texture.
#[derive(Component, Debug)]
pub struct AssetPreview;

/// Sprite placement in editor-world pixels, expressed the way a sprite batch
/// draws it: `position` is the bottom-left corner, the sprite rotates by
/// `rotation_deg` around `origin` (local, measured from the bottom-left).
///
/// This is derived state; [`apply_draw_transforms`](crate::physics::sync::sync::apply_draw_transforms)
/// turns it into the `Transform` the renderer consumes.
#[derive(Component, Debug, Copy, Clone, PartialEq)]
pub struct DrawTransform {
    pub position: Vec2,
    pub rotation_deg: f32,
    pub size: Vec2,
    pub origin: Vec2,
}

impl DrawTransform {
    /// Sprite of `size` pivoting around its center, placed at `position`.
    pub fn centered(size: Vec2, position: Vec2) -> Self {
        Self {
            position,
            rotation_deg: 0.0,
            size,
            origin: size * 0.5,
        }
    }

    /// World-space center of the rotated sprite quad.
    pub fn center(&self) -> Vec2 {
        let rot = Vec2::from_angle(self.rotation_deg.to_radians());
        self.position + self.origin + rot.rotate(self.size * 0.5 - self.origin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_sprite_center_ignores_rotation() {
        let mut d = DrawTransform::centered(Vec2::splat(20.0), Vec2::new(90.0, 40.0));
        assert_eq!(d.center(), Vec2::new(100.0, 50.0));
        d.rotation_deg = 73.0;
        assert!(d.center().abs_diff_eq(Vec2::new(100.0, 50.0), 1e-4));
    }

    #[test]
    fn corner_origin_swings_center() {
        let d = DrawTransform {
            position: Vec2::ZERO,
            rotation_deg: 90.0,
            size: Vec2::new(10.0, 10.0),
            origin: Vec2::ZERO,
        };
        // (5,5) rotated by 90 degrees around the bottom-left corner.
        assert!(d.center().abs_diff_eq(Vec2::new(-5.0, 5.0), 1e-4));
    }
}
