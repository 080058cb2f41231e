//! Events emitted by controllers and the simulation.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::EntityId;

/// Decision and match events, drained into each snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AgentEvent {
    /// The controller switched behavior.
    IntentChanged {
        agent: EntityId,
        from: Intent,
        to: Intent,
    },
    /// A dodge maneuver began away from an incoming projectile.
    DodgeStarted {
        agent: EntityId,
        threat: EntityId,
        target: Vec3,
    },
    /// A dodge ended, either by reaching its target or timing out.
    DodgeEnded { agent: EntityId, reached: bool },
    /// The controller pulled the trigger.
    ShotFired {
        agent: EntityId,
        weapon: WeaponKind,
        shot_in_burst: u32,
    },
    /// A full burst was fired; the long recovery starts.
    BurstComplete { agent: EntityId, shots: u32 },
    /// A recovery maneuver fired after repeated lack of progress.
    Unstuck { agent: EntityId, yaw_degrees: f32 },
    /// A projectile destroyed a tank.
    AgentKilled { victim_slot: usize, killer_slot: usize },
    /// A tank drove over a power-up. `granted` is `None` when the pickup was wasted.
    PowerupCollected {
        slot: usize,
        granted: Option<WeaponKind>,
    },
    /// The maze was rebuilt after a kill.
    MapRegenerated { tick: u64 },
}
