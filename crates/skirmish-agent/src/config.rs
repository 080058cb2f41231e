//! Controller tuning.

use serde::{Deserialize, Serialize};

use skirmish_core::constants::*;

use crate::error::AgentError;

/// Every tunable of the controller. Missing JSON fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// RNG seed, mixed with the agent id.
    pub seed: u64,

    // --- Cadence ---
    pub refresh_interval: f32,
    pub stuck_check_interval: f32,
    pub stuck_min_movement: f32,
    pub stuck_threshold: u32,
    pub recovery_duration: f32,
    pub recovery_throttle: f32,
    pub recovery_yaw_min_deg: f32,
    pub recovery_yaw_max_deg: f32,

    // --- Perception ---
    pub sight_range: f32,
    pub sight_half_angle_deg: f32,
    pub eye_height: f32,
    pub threat_detection_radius: f32,
    pub threat_min_speed: f32,
    pub threat_alignment_threshold: f32,
    pub danger_half_angle_deg: f32,
    pub powerup_detection_radius: f32,
    pub safety_distance: f32,
    pub default_projectile_radius: f32,

    // --- Motion ---
    pub rotation_speed_deg: f32,
    pub turn_full_scale_deg: f32,
    pub pursuit_dead_zone_deg: f32,
    pub hold_dead_zone_deg: f32,
    pub forward_cone_deg: f32,

    // --- Combat ---
    pub aim_tolerance_deg: f32,
    pub shot_cooldown: f32,
    pub burst_recovery_factor: f32,

    // --- Dodge ---
    pub dodge_duration: f32,
    pub dodge_distance: f32,
    pub dodge_sample_radius: f32,
    pub dodge_throttle: f32,
    pub dodge_arrival_epsilon: f32,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            refresh_interval: TARGET_REFRESH_INTERVAL,
            stuck_check_interval: STUCK_CHECK_INTERVAL,
            stuck_min_movement: STUCK_MIN_MOVEMENT,
            stuck_threshold: STUCK_THRESHOLD,
            recovery_duration: RECOVERY_DURATION,
            recovery_throttle: RECOVERY_THROTTLE,
            recovery_yaw_min_deg: RECOVERY_YAW_MIN_DEG,
            recovery_yaw_max_deg: RECOVERY_YAW_MAX_DEG,
            sight_range: SIGHT_RANGE,
            sight_half_angle_deg: SIGHT_HALF_ANGLE_DEG,
            eye_height: EYE_HEIGHT,
            threat_detection_radius: THREAT_DETECTION_RADIUS,
            threat_min_speed: THREAT_MIN_SPEED,
            threat_alignment_threshold: THREAT_ALIGNMENT_THRESHOLD,
            danger_half_angle_deg: THREAT_DANGER_HALF_ANGLE_DEG,
            powerup_detection_radius: POWERUP_DETECTION_RADIUS,
            safety_distance: SAFETY_DISTANCE,
            default_projectile_radius: DEFAULT_PROJECTILE_RADIUS,
            rotation_speed_deg: ROTATION_SPEED_DEG,
            turn_full_scale_deg: TURN_FULL_SCALE_DEG,
            pursuit_dead_zone_deg: PURSUIT_DEAD_ZONE_DEG,
            hold_dead_zone_deg: HOLD_DEAD_ZONE_DEG,
            forward_cone_deg: FORWARD_CONE_DEG,
            aim_tolerance_deg: AIM_TOLERANCE_DEG,
            shot_cooldown: SHOT_COOLDOWN,
            burst_recovery_factor: BURST_RECOVERY_FACTOR,
            dodge_duration: DODGE_DURATION,
            dodge_distance: DODGE_DISTANCE,
            dodge_sample_radius: DODGE_SAMPLE_RADIUS,
            dodge_throttle: DODGE_THROTTLE,
            dodge_arrival_epsilon: DODGE_ARRIVAL_EPSILON,
        }
    }
}

impl ControllerConfig {
    /// Parse a (possibly partial) JSON document and validate it.
    pub fn from_json(json: &str) -> Result<Self, AgentError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the controller cannot run with.
    pub fn validate(&self) -> Result<(), AgentError> {
        let positive = [
            ("refresh_interval", self.refresh_interval),
            ("stuck_check_interval", self.stuck_check_interval),
            ("recovery_duration", self.recovery_duration),
            ("sight_range", self.sight_range),
            ("sight_half_angle_deg", self.sight_half_angle_deg),
            ("threat_detection_radius", self.threat_detection_radius),
            ("powerup_detection_radius", self.powerup_detection_radius),
            ("default_projectile_radius", self.default_projectile_radius),
            ("rotation_speed_deg", self.rotation_speed_deg),
            ("turn_full_scale_deg", self.turn_full_scale_deg),
            ("shot_cooldown", self.shot_cooldown),
            ("burst_recovery_factor", self.burst_recovery_factor),
            ("dodge_duration", self.dodge_duration),
            ("dodge_distance", self.dodge_distance),
            ("dodge_sample_radius", self.dodge_sample_radius),
        ];
        for (name, value) in positive {
            if value.is_nan() || value <= 0.0 {
                return Err(AgentError::InvalidConfig(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }
        if self.stuck_threshold == 0 {
            return Err(AgentError::InvalidConfig(
                "stuck_threshold must be at least 1".into(),
            ));
        }
        if self.recovery_yaw_min_deg > self.recovery_yaw_max_deg {
            return Err(AgentError::InvalidConfig(format!(
                "recovery yaw bounds inverted: {} > {}",
                self.recovery_yaw_min_deg, self.recovery_yaw_max_deg
            )));
        }
        Ok(())
    }
}
