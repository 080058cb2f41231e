//! Dodge subsystem: sidestep an incoming projectile.

use glam::Vec3;
use rand::Rng;

use skirmish_core::geometry::flatten;
use skirmish_core::types::{ControlInput, Pose};

use crate::config::ControllerConfig;
use crate::motion::steer;
use crate::perception::ThreatCandidate;
use crate::ports::PathPlanner;
use crate::state::DodgeState;

/// Perpendicular to the threat's planar heading that needs the least turning.
///
/// Returns `None` when the threat has no horizontal velocity.
pub fn perpendicular_escape(threat_velocity: Vec3, forward: Vec3) -> Option<Vec3> {
    let heading = flatten(threat_velocity).try_normalize()?;
    let right = heading.cross(Vec3::Y).normalize();
    let left = -right;
    if forward.dot(right) > forward.dot(left) {
        Some(right)
    } else {
        Some(left)
    }
}

/// Build the dodge state for a freshly detected threat.
///
/// The target is the navigable point nearest the raw lateral offset; without
/// a planner, or when sampling finds nothing, the raw offset is used.
pub fn begin(
    threat: &ThreatCandidate,
    pose: &Pose,
    planner: &dyn PathPlanner,
    config: &ControllerConfig,
    rng: &mut impl Rng,
) -> DodgeState {
    let direction = perpendicular_escape(threat.velocity, pose.forward).unwrap_or_else(|| {
        if rng.gen_bool(0.5) {
            pose.right()
        } else {
            -pose.right()
        }
    });

    let raw_target = pose.position + direction * config.dodge_distance;
    let target = if planner.is_available() {
        planner
            .sample_position(raw_target, config.dodge_sample_radius)
            .unwrap_or(raw_target)
    } else {
        raw_target
    };

    DodgeState::Dodging {
        remaining: config.dodge_duration,
        direction,
        target,
    }
}

/// Result of advancing an active dodge by one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DodgeStep {
    /// Keep dodging with this input.
    Continue(ControlInput),
    /// Dodge is over; `reached` tells whether the target was hit before the timer.
    Finished { reached: bool },
}

/// Count down the dodge timer and steer toward the dodge target.
pub fn advance(
    dodge: &mut DodgeState,
    pose: &Pose,
    config: &ControllerConfig,
    dt: f32,
) -> Option<DodgeStep> {
    let DodgeState::Dodging {
        remaining, target, ..
    } = dodge
    else {
        return None;
    };

    *remaining -= dt;
    if *remaining <= 0.0 {
        *dodge = DodgeState::Idle;
        return Some(DodgeStep::Finished { reached: false });
    }

    let target = *target;
    if flatten(target - pose.position).length() < config.dodge_arrival_epsilon {
        *dodge = DodgeState::Idle;
        return Some(DodgeStep::Finished { reached: true });
    }

    let input = steer(
        pose,
        target,
        config.pursuit_dead_zone_deg,
        config.dodge_throttle,
        config,
        dt,
    )
    .unwrap_or_else(ControlInput::idle);
    Some(DodgeStep::Continue(input))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_prefers_side_closest_to_facing() {
        // Threat flying along -X; perpendiculars are +Z and -Z.
        let velocity = Vec3::new(-20.0, 0.0, 0.0);
        let facing_pos_z = Vec3::new(0.2, 0.0, 1.0).normalize();
        let escape = perpendicular_escape(velocity, facing_pos_z).unwrap();
        assert!(escape.z > 0.99, "got {escape}");

        let facing_neg_z = Vec3::new(0.2, 0.0, -1.0).normalize();
        let escape = perpendicular_escape(velocity, facing_neg_z).unwrap();
        assert!(escape.z < -0.99, "got {escape}");
    }

    #[test]
    fn test_escape_ignores_vertical_velocity() {
        assert!(perpendicular_escape(Vec3::new(0.0, -30.0, 0.0), Vec3::X).is_none());
        let escape = perpendicular_escape(Vec3::new(0.0, 5.0, 10.0), Vec3::X).unwrap();
        assert_eq!(escape.y, 0.0);
    }

    #[test]
    fn test_advance_times_out() {
        let cfg = ControllerConfig::default();
        let pose = Pose::new(Vec3::ZERO, Vec3::X);
        let mut dodge = DodgeState::Dodging {
            remaining: 0.05,
            direction: Vec3::Z,
            target: Vec3::new(0.0, 0.0, 10.0),
        };
        let step = advance(&mut dodge, &pose, &cfg, 0.1);
        assert_eq!(step, Some(DodgeStep::Finished { reached: false }));
        assert_eq!(dodge, DodgeState::Idle);
    }

    #[test]
    fn test_advance_ends_early_on_arrival() {
        let cfg = ControllerConfig::default();
        let pose = Pose::new(Vec3::new(0.0, 0.0, 9.95), Vec3::Z);
        let mut dodge = DodgeState::Dodging {
            remaining: 0.8,
            direction: Vec3::Z,
            target: Vec3::new(0.0, 2.0, 10.0),
        };
        let step = advance(&mut dodge, &pose, &cfg, 0.02);
        assert_eq!(step, Some(DodgeStep::Finished { reached: true }));
        assert_eq!(dodge, DodgeState::Idle);
    }

    #[test]
    fn test_advance_uses_boosted_throttle() {
        let cfg = ControllerConfig::default();
        let pose = Pose::new(Vec3::ZERO, Vec3::X);
        let mut dodge = DodgeState::Dodging {
            remaining: 1.0,
            direction: Vec3::X,
            target: Vec3::new(10.0, 0.0, 0.0),
        };
        match advance(&mut dodge, &pose, &cfg, 0.1) {
            Some(DodgeStep::Continue(input)) => assert_eq!(input.throttle, 1.2),
            other => panic!("expected dodge to continue, got {other:?}"),
        }
    }
}
