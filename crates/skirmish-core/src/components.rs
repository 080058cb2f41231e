//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods.
//! Game logic lives in systems, not components.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::{ControlInput, MotionFlags};

/// Position and facing of an entity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    /// Unit forward vector on the horizontal plane.
    pub forward: Vec3,
}

/// Linear velocity (units per second).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Velocity(pub Vec3);

/// A combatant tank occupying one match slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tank {
    pub slot: usize,
    pub weapon: WeaponKind,
    pub alive: bool,
    /// Seconds left in an active minigun stream (0 when not streaming).
    pub stream_remaining: f32,
    /// Seconds until the next minigun round leaves the barrel.
    pub stream_cooldown: f32,
}

/// Control frame buffered for a tank this tick.
///
/// Written by the AI system (or left idle for manual slots) and consumed by
/// the actuation system.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct DriveFrame {
    pub input: ControlInput,
    pub fire: bool,
    /// Set when an explicit respawn was requested by the controller.
    pub respawn_to: Option<Vec3>,
}

/// Controller telemetry mirrored onto the tank for snapshots.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct AgentTelemetry {
    pub controlled: bool,
    pub intent: Intent,
    pub line_of_sight: bool,
    pub dodging: bool,
    /// Motion flags of the last applied drive input.
    pub flags: MotionFlags,
}

/// A live projectile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    /// Slot of the tank that fired it.
    pub owner_slot: usize,
    pub weapon: WeaponKind,
    pub radius: f32,
    pub remaining_secs: f32,
}

/// A collectible power-up crate.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Powerup {
    /// Tick at which it was spawned.
    pub spawned_tick: u64,
}
