//! Liveness: detect lack of progress and back out of it.

use glam::Vec3;
use rand::Rng;

use skirmish_core::geometry::planar_distance;
use skirmish_core::types::ControlInput;

use crate::config::ControllerConfig;
use crate::state::{RecoveryManeuver, StuckMonitor};

/// Tolerance for timer comparisons against accumulated tick time.
const TIMER_EPSILON: f32 = 1e-4;

/// Outcome of one liveness sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Liveness {
    /// Moved enough, or the opponent is in sight. Counter cleared.
    Progressing,
    /// No progress; this many consecutive samples so far.
    Stalled(u32),
    /// Threshold reached. Counter cleared; a recovery should start.
    Stuck,
}

impl StuckMonitor {
    /// Accumulate `dt` and, once per interval, sample progress.
    pub fn sample(
        &mut self,
        position: Vec3,
        visible: bool,
        config: &ControllerConfig,
        dt: f32,
    ) -> Option<Liveness> {
        self.timer += dt;
        if self.timer + TIMER_EPSILON < config.stuck_check_interval {
            return None;
        }
        self.timer = 0.0;

        let moved = planar_distance(self.last_sample, position);
        self.last_sample = position;

        if moved >= config.stuck_min_movement || visible {
            self.count = 0;
            return Some(Liveness::Progressing);
        }

        self.count += 1;
        if self.count >= config.stuck_threshold {
            self.count = 0;
            Some(Liveness::Stuck)
        } else {
            Some(Liveness::Stalled(self.count))
        }
    }
}

impl RecoveryManeuver {
    /// Random in-place rotation plus reverse throttle for the configured duration.
    pub fn start(config: &ControllerConfig, rng: &mut impl Rng) -> Self {
        let yaw = if config.recovery_yaw_max_deg > config.recovery_yaw_min_deg {
            rng.gen_range(config.recovery_yaw_min_deg..=config.recovery_yaw_max_deg)
        } else {
            config.recovery_yaw_min_deg
        };
        Self {
            remaining: config.recovery_duration,
            pending_yaw_deg: yaw,
        }
    }

    /// Input for this tick, and whether the maneuver continues afterwards.
    pub fn step(&mut self, config: &ControllerConfig, dt: f32) -> (ControlInput, bool) {
        let yaw = std::mem::take(&mut self.pending_yaw_deg);
        let turn = if yaw == 0.0 { 0.0 } else { yaw.signum() };
        self.remaining -= dt;
        (
            ControlInput::new(turn, yaw, config.recovery_throttle),
            self.remaining > 0.0,
        )
    }
}
