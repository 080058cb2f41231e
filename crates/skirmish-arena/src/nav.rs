//! Navigation over the maze's tile graph.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

use glam::Vec3;

use crate::maze::{Maze, Tile};

/// Route corners from `from` to `to`.
///
/// A* over 4-connected tiles through open walls with a Manhattan heuristic.
/// The result starts with `from` itself, continues with the centers of the
/// tiles where the route turns, and ends with `to`. Either end outside the
/// grid, or no connection, yields `None`.
pub fn find_path(maze: &Maze, from: Vec3, to: Vec3) -> Option<Vec<Vec3>> {
    let start = maze.tile_at(from)?;
    let goal = maze.tile_at(to)?;
    let tiles = astar(maze, start, goal)?;

    let mut corners = vec![from];
    for window in tiles.windows(3) {
        let (a, b, c) = (window[0], window[1], window[2]);
        if step(a, b) != step(b, c) {
            corners.push(maze.tile_center(b.0, b.1));
        }
    }
    corners.push(to);
    Some(corners)
}

/// Closest point to `point` inside the open interior of its tile, if that
/// point lies within `radius`.
///
/// The interior is the tile shrunk by half a wall plus `clearance`. Points
/// off the grid are tested against the nearest tile.
pub fn sample_position(maze: &Maze, point: Vec3, radius: f32, clearance: f32) -> Option<Vec3> {
    let (x, z) = maze.nearest_tile(point);
    let center = maze.tile_center(x, z);
    let margin =
        (maze.tile_size() * 0.5 - maze.config().wall_thickness * 0.5 - clearance).max(0.0);
    let clamped = Vec3::new(
        point.x.clamp(center.x - margin, center.x + margin),
        0.0,
        point.z.clamp(center.z - margin, center.z + margin),
    );
    let planar = Vec3::new(point.x, 0.0, point.z);
    (clamped.distance(planar) <= radius).then_some(clamped)
}

fn step(a: Tile, b: Tile) -> (isize, isize) {
    (
        b.0 as isize - a.0 as isize,
        b.1 as isize - a.1 as isize,
    )
}

fn manhattan(a: Tile, b: Tile) -> usize {
    a.0.abs_diff(b.0) + a.1.abs_diff(b.1)
}

fn astar(maze: &Maze, start: Tile, goal: Tile) -> Option<Vec<Tile>> {
    let mut open = BinaryHeap::new();
    let mut came_from: HashMap<Tile, Tile> = HashMap::new();
    let mut cost: HashMap<Tile, usize> = HashMap::new();

    cost.insert(start, 0);
    open.push(Reverse((manhattan(start, goal), 0usize, start)));

    while let Some(Reverse((_, g, tile))) = open.pop() {
        if tile == goal {
            let mut path = vec![tile];
            let mut current = tile;
            while let Some(&prev) = came_from.get(&current) {
                path.push(prev);
                current = prev;
            }
            path.reverse();
            return Some(path);
        }
        if cost.get(&tile).is_some_and(|&best| g > best) {
            continue;
        }

        for next in maze.passable_neighbors(tile) {
            let tentative = g + 1;
            if cost.get(&next).map_or(true, |&best| tentative < best) {
                cost.insert(next, tentative);
                came_from.insert(next, tile);
                open.push(Reverse((tentative + manhattan(next, goal), tentative, next)));
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;
    use crate::maze::MazeConfig;

    #[test]
    fn test_open_arena_straight_line() {
        let maze = Maze::open(MazeConfig::default());
        let from = Vec3::new(-80.0, 0.0, 0.0);
        let to = Vec3::new(80.0, 0.0, 0.0);
        let path = find_path(&maze, from, to).unwrap();
        assert_eq!(path, vec![from, to], "no turns on a straight corridor");
    }

    #[test]
    fn test_path_starts_at_agent_and_ends_at_goal() {
        let mut rng = ChaCha8Rng::seed_from_u64(21);
        let maze = Maze::generate(MazeConfig::default(), &mut rng);
        let [from, to] = maze.spawn_points();
        let path = find_path(&maze, from, to).unwrap();
        assert_eq!(path.first(), Some(&from));
        assert_eq!(path.last(), Some(&to));
        assert!(path.len() >= 3, "corner to corner needs at least one turn");
    }

    #[test]
    fn test_same_tile_path() {
        let maze = Maze::open(MazeConfig::default());
        let from = Vec3::new(1.0, 0.0, 1.0);
        let to = Vec3::new(-2.0, 0.0, 3.0);
        assert_eq!(find_path(&maze, from, to), Some(vec![from, to]));
    }

    #[test]
    fn test_off_grid_has_no_path() {
        let maze = Maze::open(MazeConfig::default());
        assert!(find_path(&maze, Vec3::ZERO, Vec3::new(500.0, 0.0, 0.0)).is_none());
    }

    #[test]
    fn test_sample_clamps_into_tile_interior() {
        let maze = Maze::open(MazeConfig::default());
        // Point hugging the east boundary of the (8, 4) tile.
        let point = Vec3::new(89.9, 0.0, 0.0);
        let sampled = sample_position(&maze, point, 10.0, 1.5).unwrap();
        assert_abs_diff_eq!(sampled.x, 80.0 + 10.0 - 0.6 - 1.5, epsilon = 1e-4);
        assert_abs_diff_eq!(sampled.z, 0.0, epsilon = 1e-4);

        let far_outside = Vec3::new(150.0, 0.0, 0.0);
        assert!(sample_position(&maze, far_outside, 10.0, 1.5).is_none());
    }
}
