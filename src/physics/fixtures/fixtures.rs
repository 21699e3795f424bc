//! Converts an asset's editable polygons into collision fixtures on one fixed body.
use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use crate::core::assets::{AssetModel, PolygonModel};
use crate::core::components::{Fixture, ShapeBody, PX_PER_METER};

/// Polygons smaller than this (in m²) are slivers left by free-hand editing.
pub const MIN_FIXTURE_AREA: f32 = 0.01;

pub const SHAPE_DENSITY: f32 = 1.0;
pub const SHAPE_FRICTION: f32 = 0.8;
pub const SHAPE_RESTITUTION: f32 = 0.2;

/// A collider ready to be attached, tagged with the polygon it came from.
#[derive(Debug, Clone)]
pub struct ShapeFixture {
    pub polygon_index: usize,
    pub collider: Collider,
}

/// Absolute shoelace area. Fewer than three points has no area.
pub fn polygon_area(points: &[Vec2]) -> f32 {
    if points.len() < 3 {
        return 0.0;
    }
    let twice: f32 = points
        .iter()
        .zip(points.iter().cycle().skip(1))
        .map(|(a, b)| a.perp_dot(*b))
        .sum();
    (twice * 0.5).abs()
}

pub fn to_world_units(polygon: &PolygonModel) -> Vec<Vec2> {
    polygon
        .vertices
        .iter()
        .map(|v| *v / PX_PER_METER)
        .collect()
}

/// Builds colliders for every usable polygon, preserving polygon order.
/// Degenerate polygons and polygons the engine cannot hull are skipped;
/// neither stops the remaining polygons from being built.
pub fn shape_fixtures(polygons: &[PolygonModel]) -> Vec<ShapeFixture> {
    let mut out = Vec::with_capacity(polygons.len());
    for (polygon_index, polygon) in polygons.iter().enumerate() {
        let scaled = to_world_units(polygon);
        let area = polygon_area(&scaled);
        if area < MIN_FIXTURE_AREA {
            info!(
                polygon = polygon_index,
                area, "skipping polygon below minimum fixture area"
            );
            continue;
        }
        match Collider::convex_hull(&scaled) {
            Some(collider) => out.push(ShapeFixture {
                polygon_index,
                collider,
            }),
            None => warn!(
                polygon = polygon_index,
                vertices = scaled.len(),
                "physics engine rejected polygon; fixture skipped"
            ),
        }
    }
    out
}

/// Spawns one fixed body carrying a child collider per usable polygon.
/// Returns `None` when the asset yields no fixtures at all.
pub fn build_shape_body(commands: &mut Commands, asset: &AssetModel) -> Option<Entity> {
    if asset.polygons.is_empty() {
        return None;
    }
    let fixtures = shape_fixtures(&asset.polygons);
    if fixtures.is_empty() {
        info!(asset = %asset.name, "no usable polygons; shape body left empty");
        return None;
    }
    let count = fixtures.len();
    let body = commands
        .spawn((
            ShapeBody,
            RigidBody::Fixed,
            Transform::IDENTITY,
            Name::new(format!("shape:{}", asset.name)),
        ))
        .with_children(|parent| {
            for fixture in fixtures {
                parent.spawn((
                    Fixture {
                        polygon_index: fixture.polygon_index,
                    },
                    fixture.collider,
                    ColliderMassProperties::Density(SHAPE_DENSITY),
                    Friction::coefficient(SHAPE_FRICTION),
                    Restitution::coefficient(SHAPE_RESTITUTION),
                    Transform::IDENTITY,
                ));
            }
        })
        .id();
    info!(asset = %asset.name, fixtures = count, "shape body built");
    Some(body)
}
