//! Orchestrator commands sent to the arena.
//!
//! Commands are queued and applied at the next tick boundary.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// All orchestrator actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ArenaCommand {
    /// Leave the lobby and start the match.
    StartMatch,
    /// Pause the simulation.
    Pause,
    /// Resume the simulation.
    Resume,
    /// Hand a slot to (or take it from) the autonomous controller.
    SetControlled { slot: usize, enabled: bool },
    /// Flip AI control of a slot.
    ToggleControl { slot: usize },
    /// Teleport a slot's tank to a position and reset its controller.
    Respawn { slot: usize, position: Vec3 },
}
