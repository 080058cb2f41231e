//! Respawn sequencing after a kill.
//!
//! A death starts the sequence: wait, rebuild the maze, wait again while
//! navigation settles, then clear the arena and put both tanks back. Deaths
//! while a sequence is pending join it.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub enum RespawnSequence {
    #[default]
    Idle,
    /// Counting down to the maze rebuild.
    Regenerating { remaining: f32 },
    /// Maze rebuilt; counting down to placing the tanks.
    Placing { remaining: f32 },
}

/// What the engine must do this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RespawnStep {
    Wait,
    Regenerate,
    Place,
}

impl RespawnSequence {
    pub fn is_pending(&self) -> bool {
        !matches!(self, RespawnSequence::Idle)
    }

    /// Start the sequence unless one is already running.
    pub fn trigger(&mut self, regenerate_delay: f32) {
        if !self.is_pending() {
            *self = RespawnSequence::Regenerating {
                remaining: regenerate_delay,
            };
        }
    }

    /// Advance by `dt`.
    pub fn advance(&mut self, dt: f32, place_delay: f32) -> RespawnStep {
        match self {
            RespawnSequence::Idle => RespawnStep::Wait,
            RespawnSequence::Regenerating { remaining } => {
                *remaining -= dt;
                if *remaining <= 1e-6 {
                    *self = RespawnSequence::Placing {
                        remaining: place_delay,
                    };
                    RespawnStep::Regenerate
                } else {
                    RespawnStep::Wait
                }
            }
            RespawnSequence::Placing { remaining } => {
                *remaining -= dt;
                if *remaining <= 1e-6 {
                    *self = RespawnSequence::Idle;
                    RespawnStep::Place
                } else {
                    RespawnStep::Wait
                }
            }
        }
    }
}
