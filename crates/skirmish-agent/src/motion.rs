//! Motion synthesis: aim-point plus facing to turn and throttle.

use glam::Vec3;

use skirmish_core::geometry::{flatten, signed_planar_angle_deg};
use skirmish_core::types::{ControlInput, Pose};

use crate::config::ControllerConfig;

/// Below this planar distance the aim-point gives no usable direction.
const MIN_STEER_DISTANCE: f32 = 1e-3;

/// Turn toward `target` and drive at `ahead_throttle` while it is in front.
///
/// Returns `None` when the target sits on top of the agent.
pub fn steer(
    pose: &Pose,
    target: Vec3,
    dead_zone_deg: f32,
    ahead_throttle: f32,
    config: &ControllerConfig,
    dt: f32,
) -> Option<ControlInput> {
    let to_target = flatten(target - pose.position);
    if to_target.length() < MIN_STEER_DISTANCE {
        return None;
    }

    let angle = signed_planar_angle_deg(pose.forward, to_target);
    let turn = if angle.abs() > dead_zone_deg {
        (angle / config.turn_full_scale_deg).clamp(-1.0, 1.0)
    } else {
        0.0
    };
    let throttle = if angle.abs() < config.forward_cone_deg {
        ahead_throttle
    } else {
        0.0
    };

    Some(ControlInput::new(
        turn,
        turn * config.rotation_speed_deg * dt,
        throttle,
    ))
}

/// Follow the aim-point at full throttle.
pub fn pursue(pose: &Pose, aim_point: Vec3, config: &ControllerConfig, dt: f32) -> ControlInput {
    steer(pose, aim_point, config.pursuit_dead_zone_deg, 1.0, config, dt)
        .unwrap_or_else(ControlInput::idle)
}

/// Rotate in place to track `target`; throttle is always zero.
pub fn hold(pose: &Pose, target: Vec3, config: &ControllerConfig, dt: f32) -> ControlInput {
    steer(pose, target, config.hold_dead_zone_deg, 0.0, config, dt)
        .unwrap_or_else(ControlInput::idle)
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use skirmish_core::geometry::rotate_yaw;

    use super::*;

    fn pose() -> Pose {
        Pose::new(Vec3::ZERO, Vec3::X)
    }

    #[test]
    fn test_dead_zone_suppresses_turn() {
        let cfg = ControllerConfig::default();
        let target = rotate_yaw(Vec3::X, 4.0) * 20.0;
        let input = pursue(&pose(), target, &cfg, 0.1);
        assert_eq!(input.turn, 0.0);
        assert_eq!(input.throttle, 1.0);
    }

    #[test]
    fn test_turn_scales_and_clamps() {
        let cfg = ControllerConfig::default();
        let dt = 0.1;
        let input = pursue(&pose(), rotate_yaw(Vec3::X, 22.5) * 20.0, &cfg, dt);
        assert_abs_diff_eq!(input.turn, 0.5, epsilon = 1e-4);
        assert_abs_diff_eq!(input.yaw_degrees, 0.5 * 100.0 * dt, epsilon = 1e-3);
        assert!(input.flags.left);

        let input = pursue(&pose(), rotate_yaw(Vec3::X, -80.0) * 20.0, &cfg, dt);
        assert_eq!(input.turn, -1.0);
        assert!(input.flags.right && input.flags.forward);
    }

    #[test]
    fn test_no_throttle_when_target_behind() {
        let cfg = ControllerConfig::default();
        let input = pursue(&pose(), Vec3::new(-10.0, 0.0, 1.0), &cfg, 0.1);
        assert_eq!(input.throttle, 0.0);
        assert_ne!(input.turn, 0.0);
    }

    #[test]
    fn test_hold_never_moves() {
        let cfg = ControllerConfig::default();
        let input = hold(&pose(), rotate_yaw(Vec3::X, 30.0) * 50.0, &cfg, 0.1);
        assert_eq!(input.throttle, 0.0);
        assert!(input.turn > 0.0);

        let aligned = hold(&pose(), rotate_yaw(Vec3::X, 1.5) * 50.0, &cfg, 0.1);
        assert_eq!(aligned.turn, 0.0, "inside the 2 degree hold dead zone");
    }

    #[test]
    fn test_degenerate_target_is_idle() {
        let cfg = ControllerConfig::default();
        let input = pursue(&pose(), Vec3::new(0.0, 3.0, 0.0), &cfg, 0.1);
        assert_eq!(input, ControlInput::idle());
    }
}
