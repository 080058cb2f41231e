//! Controller error type.
//!
//! Collaborator failures are reported as values and turned into fallback
//! behavior by the controller; only configuration loading hands these to
//! the caller.

use glam::Vec3;
use thiserror::Error;

use skirmish_core::enums::WeaponKind;
use skirmish_core::types::EntityId;

#[derive(Debug, Error)]
pub enum AgentError {
    /// No live opposing agent could be found for the given agent.
    #[error("agent {0} has no opponent")]
    OpponentNotFound(EntityId),
    #[error("path planner unavailable")]
    PlannerUnavailable,
    #[error("no route to {goal}")]
    NoRoute { goal: Vec3 },
    #[error("weapon stats unavailable for {0:?}")]
    WeaponStatsUnavailable(WeaponKind),
    #[error("invalid controller config: {0}")]
    InvalidConfig(String),
    #[error("failed to parse controller config: {0}")]
    ConfigParse(#[from] serde_json::Error),
}
