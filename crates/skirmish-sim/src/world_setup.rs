//! Entity spawn factories for the arena world.
//!
//! Tanks, projectiles and power-up crates with their component bundles,
//! plus the id mapping between hecs entities and `EntityId`s.

use glam::Vec3;
use hecs::{Entity, World};
use rand::Rng;

use skirmish_arena::sweep::sphere_cast_walls;
use skirmish_arena::Maze;
use skirmish_core::components::*;
use skirmish_core::constants::*;
use skirmish_core::enums::WeaponKind;
use skirmish_core::geometry::rotate_yaw;
use skirmish_core::types::EntityId;
use skirmish_core::weapons::weapon_profile;

/// Stable id of a hecs entity.
pub fn entity_id(entity: Entity) -> EntityId {
    EntityId(entity.to_bits().get())
}

/// The hecs entity behind an id, if the bits are valid.
pub fn entity_of(id: EntityId) -> Option<Entity> {
    Entity::from_bits(id.0)
}

/// Facing at spawn: slot 0 looks east, slot 1 looks west.
pub fn spawn_facing(slot: usize) -> Vec3 {
    if slot == 0 {
        Vec3::X
    } else {
        Vec3::NEG_X
    }
}

/// Spawn a live tank for `slot` at `position`.
pub fn spawn_tank(world: &mut World, slot: usize, position: Vec3) -> Entity {
    world.spawn((
        Transform {
            position,
            forward: spawn_facing(slot),
        },
        Velocity::default(),
        Tank {
            slot,
            weapon: WeaponKind::Default,
            alive: true,
            stream_remaining: 0.0,
            stream_cooldown: 0.0,
        },
        DriveFrame::default(),
        AgentTelemetry::default(),
    ))
}

/// Put a tank back at `position`: alive, stopped, facing its spawn
/// direction and carrying the default weapon.
pub fn place_tank(world: &mut World, entity: Entity, position: Vec3) {
    let Ok((transform, velocity, tank, frame)) =
        world.query_one_mut::<(&mut Transform, &mut Velocity, &mut Tank, &mut DriveFrame)>(entity)
    else {
        return;
    };
    transform.position = position;
    transform.forward = spawn_facing(tank.slot);
    velocity.0 = Vec3::ZERO;
    tank.alive = true;
    tank.weapon = WeaponKind::Default;
    tank.stream_remaining = 0.0;
    tank.stream_cooldown = 0.0;
    *frame = DriveFrame::default();
}

/// Spawn one projectile leaving the muzzle of a tank.
///
/// `heading` is the barrel direction; the weapon's spread cone is applied as
/// a random yaw. The round starts just outside the tank; if a wall sits
/// between the tank and the muzzle it starts at the wall, already bounced.
#[allow(clippy::too_many_arguments)]
pub fn spawn_projectile(
    world: &mut World,
    maze: &Maze,
    rng: &mut impl Rng,
    owner_slot: usize,
    weapon: WeaponKind,
    tank_position: Vec3,
    heading: Vec3,
    agent_radius: f32,
) -> Entity {
    let profile = weapon_profile(weapon);
    let half_cone = profile.spread_deg * 0.5;
    let direction = if half_cone > 0.0 {
        rotate_yaw(heading, rng.gen_range(-half_cone..=half_cone))
    } else {
        heading
    };

    let origin = tank_position + Vec3::Y * AGENT_HEIGHT;
    let muzzle_offset = agent_radius + profile.radius + 0.5;
    let mut velocity = direction * profile.speed;
    let position = match sphere_cast_walls(
        maze.wall_boxes(),
        origin,
        profile.radius,
        direction,
        muzzle_offset,
    ) {
        Some(hit) => {
            velocity -= 2.0 * velocity.dot(hit.normal) * hit.normal;
            hit.point + hit.normal * 1e-3
        }
        None => origin + direction * muzzle_offset,
    };

    world.spawn((
        Transform {
            position,
            forward: direction,
        },
        Velocity(velocity),
        Projectile {
            owner_slot,
            weapon,
            radius: profile.radius,
            remaining_secs: profile.lifetime_secs,
        },
    ))
}

/// Spawn a power-up crate hovering over `tile_center`.
pub fn spawn_powerup(world: &mut World, tile_center: Vec3, tick: u64) -> Entity {
    world.spawn((
        Transform {
            position: Vec3::new(tile_center.x, POWERUP_HEIGHT, tile_center.z),
            forward: Vec3::X,
        },
        Powerup { spawned_tick: tick },
    ))
}

/// Despawn every projectile and power-up. Returns how many were removed.
pub fn clear_arena(world: &mut World, despawn_buffer: &mut Vec<Entity>) -> usize {
    despawn_buffer.clear();
    despawn_buffer.extend(world.query_mut::<&Projectile>().into_iter().map(|(e, _)| e));
    despawn_buffer.extend(world.query_mut::<&Powerup>().into_iter().map(|(e, _)| e));
    let removed = despawn_buffer.len();
    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
    removed
}
