//! Power-up system: periodic crate spawns and pickups.

use glam::Vec3;
use hecs::{Entity, World};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, info};

use skirmish_arena::Maze;
use skirmish_core::components::*;
use skirmish_core::enums::WeaponKind;
use skirmish_core::events::AgentEvent;
use skirmish_core::geometry::planar_distance;

use crate::world_setup;

/// Countdown to the next crate.
#[derive(Debug, Clone)]
pub struct PowerupSpawner {
    pub interval: f32,
    pub timer: f32,
}

impl PowerupSpawner {
    pub fn new(interval: f32) -> Self {
        Self {
            interval,
            timer: interval,
        }
    }

    /// Advance by `dt`; true when a crate is due.
    pub fn advance(&mut self, dt: f32) -> bool {
        self.timer -= dt;
        if self.timer <= 1e-6 {
            self.timer = self.interval;
            true
        } else {
            false
        }
    }
}

/// Spawn a crate on a random tile when the timer fires.
pub fn spawn(
    world: &mut World,
    maze: &Maze,
    rng: &mut impl Rng,
    spawner: &mut PowerupSpawner,
    tick: u64,
    dt: f32,
) {
    if spawner.advance(dt) {
        let tile = maze.random_tile_center(rng);
        world_setup::spawn_powerup(world, tile, tick);
        debug!(x = tile.x, z = tile.z, "power-up spawned");
    }
}

/// Hand crates to the living tanks driving over them.
///
/// A tank with no power-up gets a random power-up weapon; a tank already
/// holding one wastes the crate. Either way the crate is consumed.
pub fn collect(
    world: &mut World,
    rng: &mut impl Rng,
    reach: f32,
    events: &mut Vec<AgentEvent>,
    despawn_buffer: &mut Vec<Entity>,
) {
    let crates: Vec<(Entity, Vec3)> = world
        .query_mut::<(&Transform, &Powerup)>()
        .into_iter()
        .map(|(entity, (transform, _))| (entity, transform.position))
        .collect();

    for (crate_entity, crate_position) in crates {
        for (_entity, (transform, tank)) in world.query_mut::<(&Transform, &mut Tank)>() {
            if !tank.alive || planar_distance(transform.position, crate_position) > reach {
                continue;
            }
            let granted = if tank.weapon.is_powerup() {
                None
            } else {
                let weapon = WeaponKind::POWERUPS
                    .choose(rng)
                    .copied()
                    .unwrap_or(WeaponKind::Minigun);
                tank.weapon = weapon;
                tank.stream_remaining = 0.0;
                tank.stream_cooldown = 0.0;
                Some(weapon)
            };
            info!(slot = tank.slot, ?granted, "power-up collected");
            events.push(AgentEvent::PowerupCollected {
                slot: tank.slot,
                granted,
            });
            despawn_buffer.push(crate_entity);
            break;
        }
    }
}
