//! Cleanup system: removes spent projectiles and queued entities.

use hecs::{Entity, World};

use skirmish_core::components::Projectile;

/// Despawn projectiles whose lifetime ran out (or that hit a tank) along
/// with anything other systems queued in `despawn_buffer`.
pub fn run(world: &mut World, despawn_buffer: &mut Vec<Entity>) {
    for (entity, projectile) in world.query_mut::<&Projectile>() {
        if projectile.remaining_secs <= 0.0 {
            despawn_buffer.push(entity);
        }
    }

    despawn_buffer.sort_unstable_by_key(|e| e.to_bits());
    despawn_buffer.dedup();
    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
