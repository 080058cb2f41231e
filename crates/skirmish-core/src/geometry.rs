//! Planar vector helpers.
//!
//! Angles are measured on the XZ plane. A positive signed angle is a
//! counter-clockwise rotation about +Y seen from above.

use glam::{Quat, Vec3};

/// Below this squared length a planar vector has no usable direction.
const DEGENERATE_LENGTH_SQ: f32 = 1e-8;

/// Drop the vertical component.
pub fn flatten(v: Vec3) -> Vec3 {
    Vec3::new(v.x, 0.0, v.z)
}

/// Distance ignoring height.
pub fn planar_distance(a: Vec3, b: Vec3) -> f32 {
    flatten(b - a).length()
}

/// Signed angle in degrees that rotates `from` onto `to` about +Y.
///
/// Returns 0 when either vector has no horizontal extent.
pub fn signed_planar_angle_deg(from: Vec3, to: Vec3) -> f32 {
    let a = flatten(from);
    let b = flatten(to);
    if a.length_squared() < DEGENERATE_LENGTH_SQ || b.length_squared() < DEGENERATE_LENGTH_SQ {
        return 0.0;
    }
    let angle = a.angle_between(b).to_degrees();
    if a.cross(b).y < 0.0 {
        -angle
    } else {
        angle
    }
}

/// Unsigned planar angle in degrees, in [0, 180].
pub fn planar_angle_deg(from: Vec3, to: Vec3) -> f32 {
    signed_planar_angle_deg(from, to).abs()
}

/// Rotate a vector about +Y.
pub fn rotate_yaw(v: Vec3, degrees: f32) -> Vec3 {
    Quat::from_rotation_y(degrees.to_radians()) * v
}

/// Horizontal unit vector to the right of `forward`.
pub fn right_of(forward: Vec3) -> Vec3 {
    flatten(forward).cross(Vec3::Y).try_normalize().unwrap_or(Vec3::Z)
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn test_signed_angle_left_is_positive() {
        let left = rotate_yaw(Vec3::X, 30.0);
        assert_abs_diff_eq!(signed_planar_angle_deg(Vec3::X, left), 30.0, epsilon = 1e-3);
        let right = rotate_yaw(Vec3::X, -45.0);
        assert_abs_diff_eq!(signed_planar_angle_deg(Vec3::X, right), -45.0, epsilon = 1e-3);
    }

    #[test]
    fn test_signed_angle_ignores_height() {
        let to = Vec3::new(0.0, 50.0, -1.0);
        assert_abs_diff_eq!(signed_planar_angle_deg(Vec3::X, to), 90.0, epsilon = 1e-3);
    }

    #[test]
    fn test_degenerate_angle_is_zero() {
        assert_eq!(signed_planar_angle_deg(Vec3::X, Vec3::Y), 0.0);
        assert_eq!(signed_planar_angle_deg(Vec3::ZERO, Vec3::X), 0.0);
    }

    #[test]
    fn test_right_is_clockwise_of_forward() {
        let right = right_of(Vec3::X);
        assert_abs_diff_eq!(signed_planar_angle_deg(Vec3::X, right), -90.0, epsilon = 1e-3);
        assert_abs_diff_eq!(right.length(), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_planar_distance() {
        let d = planar_distance(Vec3::new(0.0, 5.0, 0.0), Vec3::new(3.0, -2.0, 4.0));
        assert_abs_diff_eq!(d, 5.0, epsilon = 1e-6);
    }
}
