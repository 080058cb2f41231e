//! Snapshot system: queries the world and builds a complete ArenaSnapshot.
//!
//! Read-only; never modifies the world.

use hecs::World;

use skirmish_core::components::*;
use skirmish_core::enums::MatchPhase;
use skirmish_core::events::AgentEvent;
use skirmish_core::state::*;
use skirmish_core::types::{Pose, SimTime};

use crate::world_setup::entity_id;

/// Build an ArenaSnapshot from the current world state.
pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    phase: MatchPhase,
    events: Vec<AgentEvent>,
    score: &ScoreView,
) -> ArenaSnapshot {
    ArenaSnapshot {
        time: *time,
        phase,
        agents: build_agents(world),
        projectiles: build_projectiles(world),
        powerups: build_powerups(world),
        events,
        score: score.clone(),
    }
}

fn build_agents(world: &World) -> Vec<AgentView> {
    let mut agents: Vec<AgentView> = world
        .query::<(&Transform, &Velocity, &Tank, &AgentTelemetry)>()
        .iter()
        .map(|(entity, (transform, velocity, tank, telemetry))| AgentView {
            slot: tank.slot,
            id: entity_id(entity),
            pose: Pose::new(transform.position, transform.forward),
            velocity: velocity.0,
            weapon: tank.weapon,
            alive: tank.alive,
            controlled: telemetry.controlled,
            intent: telemetry.intent,
            flags: telemetry.flags,
            line_of_sight: telemetry.line_of_sight,
            dodging: telemetry.dodging,
        })
        .collect();
    agents.sort_by_key(|a| a.slot);
    agents
}

fn build_projectiles(world: &World) -> Vec<ProjectileView> {
    let mut projectiles: Vec<ProjectileView> = world
        .query::<(&Transform, &Velocity, &Projectile)>()
        .iter()
        .map(|(entity, (transform, velocity, projectile))| ProjectileView {
            id: entity_id(entity),
            owner_slot: projectile.owner_slot,
            position: transform.position,
            velocity: velocity.0,
            weapon: projectile.weapon,
        })
        .collect();
    projectiles.sort_by_key(|p| p.id);
    projectiles
}

fn build_powerups(world: &World) -> Vec<PowerupView> {
    let mut powerups: Vec<PowerupView> = world
        .query::<(&Transform, &Powerup)>()
        .iter()
        .map(|(entity, (transform, _))| PowerupView {
            id: entity_id(entity),
            position: transform.position,
        })
        .collect();
    powerups.sort_by_key(|p| p.id);
    powerups
}
