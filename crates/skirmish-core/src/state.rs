//! Arena state snapshot: the complete visible state produced each tick.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::AgentEvent;
use crate::types::{EntityId, MotionFlags, Pose, SimTime};

/// Complete arena state after a tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArenaSnapshot {
    pub time: SimTime,
    pub phase: MatchPhase,
    pub agents: Vec<AgentView>,
    pub projectiles: Vec<ProjectileView>,
    pub powerups: Vec<PowerupView>,
    /// Events raised since the previous snapshot.
    pub events: Vec<AgentEvent>,
    pub score: ScoreView,
}

/// One tank as seen by an observer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AgentView {
    pub slot: usize,
    pub id: EntityId,
    pub pose: Pose,
    pub velocity: Vec3,
    pub weapon: WeaponKind,
    pub alive: bool,
    pub controlled: bool,
    pub intent: Intent,
    pub flags: MotionFlags,
    pub line_of_sight: bool,
    pub dodging: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileView {
    pub id: EntityId,
    pub owner_slot: usize,
    pub position: Vec3,
    pub velocity: Vec3,
    pub weapon: WeaponKind,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerupView {
    pub id: EntityId,
    pub position: Vec3,
}

/// Kills per slot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoreView {
    pub kills: [u32; 2],
}
