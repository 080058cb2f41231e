//! Movement system: integrates tank velocity against the maze walls.

use glam::Vec3;
use hecs::World;

use skirmish_arena::{Aabb, Maze};
use skirmish_core::components::{Tank, Transform, Velocity};

/// Move every living tank by `velocity * dt`, sliding along walls.
///
/// X and Z are resolved separately so a blocked axis does not stop motion
/// along the other one.
pub fn run(world: &mut World, maze: &Maze, agent_radius: f32, dt: f32) {
    let walls = maze.wall_boxes();
    for (_entity, (transform, velocity, tank)) in
        world.query_mut::<(&mut Transform, &Velocity, &Tank)>()
    {
        if !tank.alive {
            continue;
        }
        let step = velocity.0 * dt;
        let mut position = transform.position;

        let along_x = position + Vec3::new(step.x, 0.0, 0.0);
        if !blocked(walls, along_x, agent_radius) {
            position = along_x;
        }
        let along_z = position + Vec3::new(0.0, 0.0, step.z);
        if !blocked(walls, along_z, agent_radius) {
            position = along_z;
        }
        transform.position = position;
    }
}

/// Whether a disc of `radius` at `position` overlaps any wall footprint.
pub fn blocked(walls: &[Aabb], position: Vec3, radius: f32) -> bool {
    walls.iter().any(|wall| {
        position.x > wall.min.x - radius
            && position.x < wall.max.x + radius
            && position.z > wall.min.z - radius
            && position.z < wall.max.z + radius
    })
}
