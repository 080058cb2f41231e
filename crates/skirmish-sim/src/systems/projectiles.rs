//! Projectile system: flight, wall bounces, lifetime and kills.

use glam::Vec3;
use hecs::World;
use tracing::info;

use skirmish_arena::sweep::sphere_cast_walls;
use skirmish_arena::Maze;
use skirmish_core::components::*;
use skirmish_core::events::AgentEvent;
use skirmish_core::geometry::planar_distance;
use skirmish_core::state::ScoreView;

/// Advance every projectile by `dt`.
///
/// A round that meets a wall stops at the contact point and reflects its
/// velocity about the wall normal. Lifetimes count down here; expired rounds
/// are left for cleanup with `remaining_secs <= 0`.
pub fn integrate(world: &mut World, maze: &Maze, dt: f32) {
    let walls = maze.wall_boxes();
    for (_entity, (transform, velocity, projectile)) in
        world.query_mut::<(&mut Transform, &mut Velocity, &mut Projectile)>()
    {
        projectile.remaining_secs -= dt;
        if projectile.remaining_secs <= 0.0 {
            continue;
        }
        let step = velocity.0 * dt;
        let distance = step.length();
        if distance <= f32::EPSILON {
            continue;
        }
        match sphere_cast_walls(walls, transform.position, projectile.radius, step, distance) {
            Some(hit) => {
                let v = velocity.0;
                velocity.0 = v - 2.0 * v.dot(hit.normal) * hit.normal;
                transform.position = hit.point + hit.normal * 1e-3;
            }
            None => transform.position += step,
        }
        if let Some(heading) = velocity.0.try_normalize() {
            transform.forward = heading;
        }
    }
}

/// Destroy tanks touched by a projectile.
///
/// Contact is planar: center distance below the sum of the radii. The round
/// is spent, the tank dies, and the kill is credited to the other slot (a
/// tank hit by its own bounced round still scores for its opponent).
/// Returns the slots killed this tick.
pub fn resolve_hits(
    world: &mut World,
    agent_radius: f32,
    score: &mut ScoreView,
    events: &mut Vec<AgentEvent>,
) -> Vec<usize> {
    let mut tanks: Vec<(usize, Vec3, bool)> = world
        .query_mut::<(&Transform, &Tank)>()
        .into_iter()
        .map(|(_, (transform, tank))| (tank.slot, transform.position, tank.alive))
        .collect();

    let mut killed = Vec::new();
    for (_entity, (transform, projectile)) in world.query_mut::<(&Transform, &mut Projectile)>() {
        if projectile.remaining_secs <= 0.0 {
            continue;
        }
        let hit = tanks.iter_mut().find(|(_, position, alive)| {
            *alive
                && planar_distance(*position, transform.position) < agent_radius + projectile.radius
        });
        if let Some((slot, _, alive)) = hit {
            *alive = false;
            projectile.remaining_secs = 0.0;
            killed.push(*slot);
        }
    }

    for &victim_slot in &killed {
        let killer_slot = 1 - victim_slot.min(1);
        for (_entity, (tank, velocity)) in world.query_mut::<(&mut Tank, &mut Velocity)>() {
            if tank.slot == victim_slot {
                tank.alive = false;
                tank.stream_remaining = 0.0;
                tank.stream_cooldown = 0.0;
                velocity.0 = Vec3::ZERO;
            }
        }
        if let Some(kills) = score.kills.get_mut(killer_slot) {
            *kills += 1;
        }
        info!(victim_slot, killer_slot, score = ?score.kills, "tank destroyed");
        events.push(AgentEvent::AgentKilled {
            victim_slot,
            killer_slot,
        });
    }
    killed
}
