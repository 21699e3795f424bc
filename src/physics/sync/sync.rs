//! Per-frame projection of physics state onto sprites.
//!
//! Rapier steps and writes body transforms back in `PostUpdate`; this module
//! then derives every projectile sprite's placement from its body and turns
//! draw transforms into the `Transform`s the renderer reads. Nothing flows
//! from sprites back to bodies.
use bevy::prelude::*;
use bevy::transform::TransformSystem;

use crate::core::components::{DrawTransform, Projectile, PX_PER_METER};
use crate::core::system::system_order::{ApplyDrawSet, ProjectSet};
use crate::physics::registry::registry::DynamicObjectRegistry;

/// Sprite placement for a body at `center` (meters) rotated by `angle` (radians):
/// bottom-left corner in pixels and rotation in degrees.
pub fn project_body(center: Vec2, angle: f32, sprite_size: Vec2) -> (Vec2, f32) {
    (
        center * PX_PER_METER - sprite_size * 0.5,
        angle.to_degrees(),
    )
}

/// Z rotation of a 2D transform, in radians.
pub fn planar_angle(rotation: Quat) -> f32 {
    rotation.to_euler(EulerRot::ZYX).0
}

pub fn project_dynamic_objects(
    registry: Res<DynamicObjectRegistry>,
    bodies: Query<&Transform, With<Projectile>>,
    mut sprites: Query<&mut DrawTransform>,
) {
    for object in registry.objects() {
        let (Ok(body), Ok(mut draw)) = (bodies.get(object.body), sprites.get_mut(object.sprite))
        else {
            continue;
        };
        let (position, rotation_deg) = project_body(
            body.translation.truncate(),
            planar_angle(body.rotation),
            draw.size,
        );
        draw.position = position;
        draw.rotation_deg = rotation_deg;
    }
}

pub fn apply_draw_transforms(mut q: Query<(&DrawTransform, &mut Transform), Changed<DrawTransform>>) {
    for (draw, mut tf) in &mut q {
        let center = draw.center();
        tf.translation.x = center.x;
        tf.translation.y = center.y;
        tf.rotation = Quat::from_rotation_z(draw.rotation_deg.to_radians());
    }
}

pub struct SimulationSyncPlugin;

impl Plugin for SimulationSyncPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DynamicObjectRegistry>()
            .configure_sets(
                PostUpdate,
                (
                    ApplyDrawSet.after(ProjectSet),
                    ApplyDrawSet.before(TransformSystem::TransformPropagate),
                ),
            )
            .add_systems(
                PostUpdate,
                (
                    project_dynamic_objects.in_set(ProjectSet),
                    apply_draw_transforms.in_set(ApplyDrawSet),
                ),
            );
    }
}
