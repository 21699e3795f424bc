use std::f32::consts::PI;

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;
use rand::Rng;

use crate::core::components::{DrawTransform, Projectile, ProjectileSprite, PX_PER_METER};

/// Projectile radius range in pixels (min inclusive, max exclusive).
pub const PROJECTILE_RADIUS_MIN: f32 = 5.0;
pub const PROJECTILE_RADIUS_MAX: f32 = 15.0;
pub const PROJECTILE_DENSITY: f32 = 1.0;
pub const PROJECTILE_DAMPING: f32 = 0.5;
/// Throw vectors are in editor pixels; this turns them into a physics impulse.
pub const IMPULSE_SCALE: f32 = 2.0 / PX_PER_METER;

/// A projectile body and the sprite that shows it.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct DynamicObject {
    pub body: Entity,
    pub sprite: Entity,
}

/// Texture used for projectile sprites.
#[derive(Resource, Debug, Clone, Default)]
pub struct BallTexture(pub Handle<Image>);

/// Owns every live projectile. Bodies and sprites are only ever added and
/// removed together, so they cannot drift apart.
#[derive(Resource, Debug, Default)]
pub struct DynamicObjectRegistry {
    objects: Vec<DynamicObject>,
}

impl DynamicObjectRegistry {
    pub fn objects(&self) -> &[DynamicObject] {
        &self.objects
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn bodies(&self) -> impl Iterator<Item = Entity> + '_ {
        self.objects.iter().map(|o| o.body)
    }

    /// Despawns every body in the physics world (`bodies`, typically a
    /// `Query<Entity, With<RigidBody>>`) together with every projectile
    /// sprite, then forgets all projectiles. Safe to repeat.
    pub fn clear(&mut self, commands: &mut Commands, bodies: impl IntoIterator<Item = Entity>) {
        let mut doomed: Vec<Entity> = bodies.into_iter().collect();
        doomed.extend(self.objects.drain(..).flat_map(|o| [o.body, o.sprite]));
        doomed.sort_unstable();
        doomed.dedup();
        if !doomed.is_empty() {
            debug!(entities = doomed.len(), "clearing simulated world");
        }
        for entity in doomed {
            commands.entity(entity).despawn();
        }
    }

    /// Spawns a ball at `origin_px` (editor pixels) pushed by `impulse`
    /// (editor pixels, scaled by [`IMPULSE_SCALE`]) and records it.
    pub fn spawn_projectile<R: Rng>(
        &mut self,
        commands: &mut Commands,
        rng: &mut R,
        texture: &BallTexture,
        origin_px: Vec2,
        impulse: Vec2,
    ) -> DynamicObject {
        let radius = rng.gen_range(PROJECTILE_RADIUS_MIN..PROJECTILE_RADIUS_MAX);
        // The ball is round; the random angle only shows through the sprite.
        let angle = rng.gen::<f32>() * PI;

        let body = commands
            .spawn((
                Projectile,
                RigidBody::Dynamic,
                Transform::from_translation((origin_px / PX_PER_METER).extend(0.0))
                    .with_rotation(Quat::from_rotation_z(angle)),
                Collider::ball(radius / PX_PER_METER),
                ColliderMassProperties::Density(PROJECTILE_DENSITY),
                Damping {
                    linear_damping: PROJECTILE_DAMPING,
                    angular_damping: PROJECTILE_DAMPING,
                },
                ExternalImpulse {
                    impulse: impulse * IMPULSE_SCALE,
                    torque_impulse: 0.0,
                },
            ))
            .id();

        let size = Vec2::splat(radius * 2.0);
        let mut draw = DrawTransform::centered(size, origin_px - size * 0.5);
        draw.rotation_deg = angle.to_degrees();
        let sprite = commands
            .spawn((
                ProjectileSprite,
                Sprite {
                    image: texture.0.clone(),
                    custom_size: Some(size),
                    ..default()
                },
                draw,
                Transform::from_translation(draw.center().extend(1.0)),
            ))
            .id();

        let object = DynamicObject { body, sprite };
        self.objects.push(object);
        debug!(radius, count = self.objects.len(), "projectile spawned");
        object
    }
}
