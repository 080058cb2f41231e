//! Sphere sweeps against static walls.

use glam::Vec3;

use crate::geometry::Aabb;

/// First wall met by a swept sphere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallHit {
    pub distance: f32,
    /// Sphere center at the moment of contact.
    pub point: Vec3,
    pub normal: Vec3,
}

/// Sweep a sphere of `radius` from `origin` along `direction`.
///
/// Each box is inflated by the radius and tested with a ray. Boxes the
/// sphere already overlaps at `origin` are skipped.
pub fn sphere_cast_walls(
    walls: &[Aabb],
    origin: Vec3,
    radius: f32,
    direction: Vec3,
    max_distance: f32,
) -> Option<WallHit> {
    let direction = direction.try_normalize()?;
    walls
        .iter()
        .filter_map(|wall| {
            let inflated = wall.expanded(radius);
            if inflated.contains(origin) {
                return None;
            }
            inflated.ray_hit(origin, direction, max_distance)
        })
        .min_by(|a, b| a.distance.total_cmp(&b.distance))
        .map(|hit| WallHit {
            distance: hit.distance,
            point: origin + direction * hit.distance,
            normal: hit.normal,
        })
}
