//! Read-only `WorldQuery` over the arena world.

use glam::Vec3;
use hecs::World;

use skirmish_agent::ports::{EntityView, SweepHit, WorldQuery};
use skirmish_arena::sweep::sphere_cast_walls;
use skirmish_arena::Maze;
use skirmish_core::components::*;
use skirmish_core::constants::AGENT_HEIGHT;
use skirmish_core::enums::EntityCategory;
use skirmish_core::types::EntityId;

use crate::world_setup::{entity_id, entity_of};

/// Dead tanks are invisible to every scan and sweep.
pub struct ArenaView<'a> {
    world: &'a World,
    maze: &'a Maze,
    agent_radius: f32,
}

impl<'a> ArenaView<'a> {
    pub fn new(world: &'a World, maze: &'a Maze, agent_radius: f32) -> Self {
        Self {
            world,
            maze,
            agent_radius,
        }
    }

    /// Nearest live tank hit by the swept sphere, as (entity, distance).
    fn sweep_tanks(
        &self,
        origin: Vec3,
        radius: f32,
        direction: Vec3,
        max_distance: f32,
    ) -> Option<(EntityId, f32)> {
        let reach = self.agent_radius + radius;
        self.world
            .query::<(&Transform, &Tank)>()
            .iter()
            .filter(|(_, (_, tank))| tank.alive)
            .filter_map(|(entity, (transform, _))| {
                let center = transform.position + Vec3::Y * AGENT_HEIGHT;
                ray_sphere(origin, direction, center, reach)
                    .filter(|&t| t <= max_distance)
                    .map(|t| (entity_id(entity), t))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
    }
}

/// Entry distance of a ray into a sphere. `None` when the ray misses, the
/// sphere is behind, or the origin is already inside it.
fn ray_sphere(origin: Vec3, direction: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let m = origin - center;
    let c = m.length_squared() - radius * radius;
    if c <= 0.0 {
        return None;
    }
    let b = m.dot(direction);
    if b > 0.0 {
        return None;
    }
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    Some(-b - disc.sqrt())
}

impl WorldQuery for ArenaView<'_> {
    fn live_entities(&self, category: EntityCategory) -> Vec<EntityView> {
        match category {
            EntityCategory::Agent => self
                .world
                .query::<(&Transform, &Velocity, &Tank)>()
                .iter()
                .filter(|(_, (_, _, tank))| tank.alive)
                .map(|(entity, (transform, velocity, _))| EntityView {
                    id: entity_id(entity),
                    category,
                    position: transform.position,
                    velocity: velocity.0,
                })
                .collect(),
            EntityCategory::Projectile => self
                .world
                .query::<(&Transform, &Velocity, &Projectile)>()
                .iter()
                .map(|(entity, (transform, velocity, _))| EntityView {
                    id: entity_id(entity),
                    category,
                    position: transform.position,
                    velocity: velocity.0,
                })
                .collect(),
            EntityCategory::Powerup => self
                .world
                .query::<(&Transform, &Powerup)>()
                .iter()
                .map(|(entity, (transform, _))| EntityView {
                    id: entity_id(entity),
                    category,
                    position: transform.position,
                    velocity: Vec3::ZERO,
                })
                .collect(),
        }
    }

    fn locate(&self, id: EntityId) -> Option<EntityView> {
        let entity = self.world.entity(entity_of(id)?).ok()?;
        let category = if let Some(tank) = entity.get::<&Tank>() {
            if !tank.alive {
                return None;
            }
            EntityCategory::Agent
        } else if entity.has::<Projectile>() {
            EntityCategory::Projectile
        } else if entity.has::<Powerup>() {
            EntityCategory::Powerup
        } else {
            return None;
        };
        let position = entity.get::<&Transform>()?.position;
        let velocity = entity.get::<&Velocity>().map(|v| v.0).unwrap_or(Vec3::ZERO);
        Some(EntityView {
            id,
            category,
            position,
            velocity,
        })
    }

    fn sphere_cast(
        &self,
        origin: Vec3,
        radius: f32,
        direction: Vec3,
        max_distance: f32,
    ) -> Option<SweepHit> {
        let direction = direction.try_normalize()?;
        let wall = sphere_cast_walls(self.maze.wall_boxes(), origin, radius, direction, max_distance)
            .map(|hit| SweepHit {
                entity: None,
                distance: hit.distance,
                point: hit.point,
            });
        let tank = self
            .sweep_tanks(origin, radius, direction, max_distance)
            .map(|(id, distance)| SweepHit {
                entity: Some(id),
                distance,
                point: origin + direction * distance,
            });
        match (wall, tank) {
            (Some(w), Some(t)) => Some(if t.distance <= w.distance { t } else { w }),
            (w, t) => w.or(t),
        }
    }
}
