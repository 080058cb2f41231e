//! Fundamental simulation types.
//!
//! Positions and directions are `glam::Vec3` with Y up; the arena lies on
//! the XZ plane.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::geometry::right_of;

/// Opaque handle for any world entity (agent, projectile, power-up).
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct EntityId(pub u64);

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Where an agent is and which way it faces.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: Vec3,
    /// Unit forward vector. Kept on the horizontal plane by the actuator.
    pub forward: Vec3,
}

impl Pose {
    pub fn new(position: Vec3, forward: Vec3) -> Self {
        Self {
            position,
            forward: forward.try_normalize().unwrap_or(Vec3::X),
        }
    }

    /// Unit vector pointing to the agent's right.
    pub fn right(&self) -> Vec3 {
        right_of(self.forward)
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            forward: Vec3::X,
        }
    }
}

/// Direction booleans derived from a control input.
///
/// Display/animation only; nothing reads these back as state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MotionFlags {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
}

impl MotionFlags {
    /// Threshold on the throttle/turn axes below which a direction is "not pressed".
    const AXIS_THRESHOLD: f32 = 0.1;

    /// Derive flags from throttle and turn axes. Positive turn is a left turn.
    pub fn from_axes(throttle: f32, turn: f32) -> Self {
        Self {
            forward: throttle > Self::AXIS_THRESHOLD,
            backward: throttle < -Self::AXIS_THRESHOLD,
            left: turn > Self::AXIS_THRESHOLD,
            right: turn < -Self::AXIS_THRESHOLD,
        }
    }
}

/// The same signals a human produces with a keyboard: turn, throttle.
///
/// `yaw_degrees` is the rotation to apply this tick (counter-clockwise seen
/// from above). `throttle` scales the actuator's move speed along the facing
/// after the rotation; vertical velocity is always left untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ControlInput {
    /// Normalized turn axis in [-1, 1]. Positive turns left.
    pub turn: f32,
    pub yaw_degrees: f32,
    pub throttle: f32,
    pub flags: MotionFlags,
}

impl ControlInput {
    pub fn new(turn: f32, yaw_degrees: f32, throttle: f32) -> Self {
        Self {
            turn,
            yaw_degrees,
            throttle,
            flags: MotionFlags::from_axes(throttle, turn),
        }
    }

    /// No rotation, zero planar velocity.
    pub fn idle() -> Self {
        Self::default()
    }
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Seconds per tick at the default tick rate.
    pub fn dt(&self) -> f32 {
        crate::constants::DT
    }

    /// Advance by one tick.
    pub fn advance(&mut self) {
        self.tick += 1;
        self.elapsed_secs += f64::from(self.dt());
    }
}
