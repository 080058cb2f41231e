//! Actuation system: applies buffered drive frames to tanks and fires
//! their weapons.
//!
//! Firing rules per weapon:
//! - Default: one round per trigger pull, refused while the tank already
//!   has `projectile_cap` default rounds in flight.
//! - Minigun: a pull starts a stream of rounds at the weapon's fire rate;
//!   pulls during a stream are ignored; the weapon expires when it ends.
//! - Shotgun / Sniper: one pull fires every pellet, then the weapon expires.

use glam::Vec3;
use hecs::World;
use rand::Rng;
use tracing::debug;

use skirmish_arena::Maze;
use skirmish_core::components::*;
use skirmish_core::constants::MINIGUN_STREAM_DURATION;
use skirmish_core::enums::WeaponKind;
use skirmish_core::geometry::rotate_yaw;
use skirmish_core::weapons::weapon_profile;

use crate::world_setup;

/// Result of pulling a tank's trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerPull {
    /// Fire this many rounds now.
    Fire(u32),
    /// A minigun stream started; rounds follow from the stream.
    StreamStarted,
    /// Nothing fired.
    Refused,
}

/// Apply the trigger rules to a tank. `live_default` counts the tank's
/// default rounds still in flight.
pub fn pull_trigger(tank: &mut Tank, live_default: usize, projectile_cap: usize) -> TriggerPull {
    match tank.weapon {
        WeaponKind::Default => {
            if live_default >= projectile_cap {
                TriggerPull::Refused
            } else {
                TriggerPull::Fire(1)
            }
        }
        WeaponKind::Minigun => {
            if tank.stream_remaining > 0.0 {
                TriggerPull::Refused
            } else {
                tank.stream_remaining = MINIGUN_STREAM_DURATION;
                tank.stream_cooldown = 0.0;
                TriggerPull::StreamStarted
            }
        }
        kind @ (WeaponKind::Shotgun | WeaponKind::Sniper) => {
            tank.weapon = WeaponKind::Default;
            TriggerPull::Fire(weapon_profile(kind).pellets_per_shot)
        }
    }
}

/// Advance a minigun stream by `dt`. Returns the rounds due this tick and
/// reverts the tank to the default weapon once the stream is over.
pub fn advance_stream(tank: &mut Tank, dt: f32) -> u32 {
    if tank.stream_remaining <= 0.0 {
        return 0;
    }
    let interval = 1.0 / weapon_profile(WeaponKind::Minigun).fire_rate;
    let mut rounds = 0;
    tank.stream_cooldown -= dt;
    while tank.stream_cooldown <= 1e-6 {
        rounds += 1;
        tank.stream_cooldown += interval;
    }
    tank.stream_remaining -= dt;
    if tank.stream_remaining <= 1e-6 {
        tank.stream_remaining = 0.0;
        tank.stream_cooldown = 0.0;
        tank.weapon = WeaponKind::Default;
        debug!(slot = tank.slot, "minigun stream over, back to default weapon");
    }
    rounds
}

struct Volley {
    slot: usize,
    weapon: WeaponKind,
    position: Vec3,
    heading: Vec3,
    rounds: u32,
}

/// Apply every tank's drive frame, pull triggers, run minigun streams and
/// spawn the resulting projectiles. Frames are consumed.
#[allow(clippy::too_many_arguments)]
pub fn run(
    world: &mut World,
    maze: &Maze,
    rng: &mut impl Rng,
    move_speed: f32,
    agent_radius: f32,
    projectile_cap: usize,
    dt: f32,
) {
    let mut live_default = [0usize; 2];
    for (_entity, projectile) in world.query_mut::<&Projectile>() {
        if projectile.weapon == WeaponKind::Default && projectile.remaining_secs > 0.0 {
            if let Some(count) = live_default.get_mut(projectile.owner_slot) {
                *count += 1;
            }
        }
    }

    let mut volleys = Vec::new();
    for (_entity, (transform, velocity, tank, frame, telemetry)) in world.query_mut::<(
        &mut Transform,
        &mut Velocity,
        &mut Tank,
        &mut DriveFrame,
        &mut AgentTelemetry,
    )>() {
        let frame = std::mem::take(frame);
        if !tank.alive {
            velocity.0 = Vec3::ZERO;
            continue;
        }

        let input = frame.input;
        transform.forward = rotate_yaw(transform.forward, input.yaw_degrees);
        velocity.0 = transform.forward * input.throttle * move_speed + Vec3::Y * velocity.0.y;
        telemetry.flags = input.flags;

        let mut rounds = 0;
        let fired_with = tank.weapon;
        if frame.fire {
            let live = live_default.get(tank.slot).copied().unwrap_or(0);
            match pull_trigger(tank, live, projectile_cap) {
                TriggerPull::Fire(n) => {
                    rounds += n;
                    debug!(slot = tank.slot, weapon = ?fired_with, rounds = n, "fired");
                }
                TriggerPull::StreamStarted => {
                    debug!(slot = tank.slot, "minigun stream started");
                }
                TriggerPull::Refused => {}
            }
        }
        let stream_rounds = advance_stream(tank, dt);
        if stream_rounds > 0 {
            volleys.push(Volley {
                slot: tank.slot,
                weapon: WeaponKind::Minigun,
                position: transform.position,
                heading: transform.forward,
                rounds: stream_rounds,
            });
        }
        if rounds > 0 {
            if fired_with == WeaponKind::Default {
                if let Some(count) = live_default.get_mut(tank.slot) {
                    *count += rounds as usize;
                }
            }
            volleys.push(Volley {
                slot: tank.slot,
                weapon: fired_with,
                position: transform.position,
                heading: transform.forward,
                rounds,
            });
        }
    }

    for volley in volleys {
        for _ in 0..volley.rounds {
            world_setup::spawn_projectile(
                world,
                maze,
                rng,
                volley.slot,
                volley.weapon,
                volley.position,
                volley.heading,
                agent_radius,
            );
        }
    }
}
