//! Axis-aligned boxes and ray/slab intersection.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

/// Where a ray enters a box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Distance along the (unit) ray.
    pub distance: f32,
    /// Outward normal of the face that was entered.
    pub normal: Vec3,
}

impl Aabb {
    pub fn from_center_size(center: Vec3, size: Vec3) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Grow the box by `margin` on every side.
    pub fn expanded(&self, margin: f32) -> Self {
        Self {
            min: self.min - Vec3::splat(margin),
            max: self.max + Vec3::splat(margin),
        }
    }

    pub fn contains(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    /// Slab test for a ray starting outside the box.
    ///
    /// `direction` must be normalized. Returns `None` on a miss, when the
    /// entry point lies beyond `max_distance`, or when the origin is inside.
    pub fn ray_hit(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<RayHit> {
        let mut t_enter = f32::NEG_INFINITY;
        let mut t_exit = f32::INFINITY;
        let mut normal = Vec3::ZERO;

        for axis in 0..3 {
            let o = origin[axis];
            let d = direction[axis];
            let (lo, hi) = (self.min[axis], self.max[axis]);

            if d.abs() < f32::EPSILON {
                // Parallel to this slab: must already be between its planes.
                if o < lo || o > hi {
                    return None;
                }
                continue;
            }

            let inv = 1.0 / d;
            let (mut t0, mut t1) = ((lo - o) * inv, (hi - o) * inv);
            let mut face = Vec3::ZERO;
            face[axis] = -d.signum();
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }
            if t0 > t_enter {
                t_enter = t0;
                normal = face;
            }
            t_exit = t_exit.min(t1);
            if t_enter > t_exit {
                return None;
            }
        }

        if t_enter < 0.0 || t_enter > max_distance {
            return None;
        }
        Some(RayHit {
            distance: t_enter,
            normal,
        })
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    fn unit_box_at(x: f32) -> Aabb {
        Aabb::from_center_size(Vec3::new(x, 0.0, 0.0), Vec3::splat(2.0))
    }

    #[test]
    fn test_ray_hits_front_face() {
        let hit = unit_box_at(10.0).ray_hit(Vec3::ZERO, Vec3::X, 100.0).unwrap();
        assert_abs_diff_eq!(hit.distance, 9.0, epsilon = 1e-5);
        assert_eq!(hit.normal, Vec3::new(-1.0, 0.0, 0.0));
    }

    #[test]
    fn test_ray_respects_max_distance() {
        assert!(unit_box_at(10.0).ray_hit(Vec3::ZERO, Vec3::X, 5.0).is_none());
    }

    #[test]
    fn test_ray_misses_sideways() {
        assert!(unit_box_at(10.0).ray_hit(Vec3::ZERO, Vec3::Z, 100.0).is_none());
        assert!(unit_box_at(10.0).ray_hit(Vec3::new(0.0, 0.0, 5.0), Vec3::X, 100.0).is_none());
    }

    #[test]
    fn test_ray_from_inside_is_ignored() {
        assert!(unit_box_at(0.0).ray_hit(Vec3::ZERO, Vec3::X, 100.0).is_none());
    }

    #[test]
    fn test_expanded_contains() {
        let b = unit_box_at(0.0).expanded(0.5);
        assert!(b.contains(Vec3::new(1.4, 1.4, -1.4)));
        assert!(!b.contains(Vec3::new(1.6, 0.0, 0.0)));
    }
}
