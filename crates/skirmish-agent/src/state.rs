//! Persistent per-agent controller state.
//!
//! Owned by exactly one controller and mutated only by its own cycle.
//! Reset, never rebuilt, on respawn.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use skirmish_core::enums::{Intent, WeaponKind};
use skirmish_core::types::EntityId;

/// Shot bookkeeping for the current burst.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BurstCounter {
    /// Shots fired in the current burst.
    pub shots: u32,
    /// Time accumulated toward the next shot.
    pub cooldown: f32,
    /// Time accumulated toward the end of the post-burst pause.
    pub recovery: f32,
}

impl BurstCounter {
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Two-state dodge machine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub enum DodgeState {
    #[default]
    Idle,
    Dodging {
        remaining: f32,
        direction: Vec3,
        target: Vec3,
    },
}

impl DodgeState {
    pub fn is_active(&self) -> bool {
        matches!(self, DodgeState::Dodging { .. })
    }
}

/// Lack-of-progress detector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StuckMonitor {
    pub timer: f32,
    /// Consecutive samples without progress.
    pub count: u32,
    pub last_sample: Vec3,
}

/// Corrective maneuver in progress after repeated stuck samples.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RecoveryManeuver {
    pub remaining: f32,
    /// In-place rotation still to apply (consumed on the first tick).
    pub pending_yaw_deg: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentState {
    /// Immediate point the agent steers toward.
    pub aim_point: Vec3,
    /// Time since the last target refresh.
    pub refresh_timer: f32,
    pub has_line_of_sight: bool,
    pub burst: BurstCounter,
    /// Weapon the burst counter was counting against.
    pub burst_weapon: Option<WeaponKind>,
    pub dodge: DodgeState,
    pub stuck: StuckMonitor,
    pub recovery: Option<RecoveryManeuver>,
    pub controlled: bool,
    pub intent: Intent,
    pub opponent: Option<EntityId>,
}

impl AgentState {
    pub fn new(position: Vec3) -> Self {
        Self {
            aim_point: position,
            refresh_timer: 0.0,
            has_line_of_sight: false,
            burst: BurstCounter::default(),
            burst_weapon: None,
            dodge: DodgeState::Idle,
            stuck: StuckMonitor {
                last_sample: position,
                ..Default::default()
            },
            recovery: None,
            controlled: false,
            intent: Intent::Idle,
            opponent: None,
        }
    }

    /// Clear every timer, counter and maneuver. Control and opponent survive.
    pub fn reset(&mut self, position: Vec3) {
        let controlled = self.controlled;
        let opponent = self.opponent;
        *self = Self::new(position);
        self.controlled = controlled;
        self.opponent = opponent;
    }
}
