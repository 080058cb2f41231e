//! Tile maze generation.
//!
//! The arena is a `width x depth` grid of square tiles centered on the
//! origin. Every tile edge starts walled; a randomized depth-first
//! backtracker carves a perfect maze, then extra interior walls are
//! knocked out to open the layout up. The outer boundary always stays.

use glam::Vec3;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use skirmish_core::constants::*;

use crate::geometry::Aabb;

/// Layout parameters for maze generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MazeConfig {
    pub width: usize,
    pub depth: usize,
    pub tile_size: f32,
    pub wall_height: f32,
    pub wall_thickness: f32,
    /// Base chance of removing each remaining interior north/east wall.
    pub extra_removal_chance: f32,
    /// Uniform jitter applied once per generation to the removal chance.
    pub removal_jitter: f32,
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self {
            width: MAZE_TILES,
            depth: MAZE_TILES,
            tile_size: TILE_SIZE,
            wall_height: WALL_HEIGHT,
            wall_thickness: WALL_THICKNESS,
            extra_removal_chance: EXTRA_WALL_REMOVAL_CHANCE,
            removal_jitter: EXTRA_WALL_REMOVAL_JITTER,
        }
    }
}

/// Compass direction on the tile grid. North is +Z, east is +X.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    fn offset(self) -> (isize, isize) {
        match self {
            Direction::North => (0, 1),
            Direction::South => (0, -1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
        }
    }
}

/// A tile coordinate `(x, z)`.
pub type Tile = (usize, usize);

/// Generated maze: passages between tiles plus the resulting wall boxes.
#[derive(Debug, Clone)]
pub struct Maze {
    config: MazeConfig,
    /// Passage between `(x, z)` and `(x, z + 1)`.
    open_north: Vec<bool>,
    /// Passage between `(x, z)` and `(x + 1, z)`.
    open_east: Vec<bool>,
    walls: Vec<Aabb>,
}

impl Maze {
    /// Carve a new maze.
    pub fn generate(config: MazeConfig, rng: &mut impl Rng) -> Self {
        let mut maze = Self::walled(config);
        maze.carve(rng);

        let jitter = if maze.config.removal_jitter > 0.0 {
            rng.gen_range(-maze.config.removal_jitter..=maze.config.removal_jitter)
        } else {
            0.0
        };
        let chance = (maze.config.extra_removal_chance + jitter).clamp(0.0, 1.0);
        maze.remove_extra_walls(f64::from(chance), rng);
        maze.rebuild_walls();

        debug!(
            width = maze.config.width,
            depth = maze.config.depth,
            removal_chance = chance,
            walls = maze.walls.len(),
            "maze generated"
        );
        maze
    }

    /// Arena with no interior walls, only the boundary.
    pub fn open(config: MazeConfig) -> Self {
        let mut maze = Self::walled(config);
        maze.open_north.iter_mut().for_each(|o| *o = true);
        maze.open_east.iter_mut().for_each(|o| *o = true);
        maze.rebuild_walls();
        maze
    }

    fn walled(config: MazeConfig) -> Self {
        let width = config.width.max(1);
        let depth = config.depth.max(1);
        let config = MazeConfig {
            width,
            depth,
            ..config
        };
        Self {
            open_north: vec![false; width * depth],
            open_east: vec![false; width * depth],
            walls: Vec::new(),
            config,
        }
    }

    pub fn config(&self) -> &MazeConfig {
        &self.config
    }

    pub fn width(&self) -> usize {
        self.config.width
    }

    pub fn depth(&self) -> usize {
        self.config.depth
    }

    pub fn tile_size(&self) -> f32 {
        self.config.tile_size
    }

    /// Half the arena extent along X and Z.
    pub fn half_extents(&self) -> (f32, f32) {
        (
            self.config.width as f32 * self.config.tile_size * 0.5,
            self.config.depth as f32 * self.config.tile_size * 0.5,
        )
    }

    /// World-space center of a tile, on the floor.
    pub fn tile_center(&self, x: usize, z: usize) -> Vec3 {
        let size = self.config.tile_size;
        Vec3::new(
            (x as f32 - (self.config.width - 1) as f32 * 0.5) * size,
            0.0,
            (z as f32 - (self.config.depth - 1) as f32 * 0.5) * size,
        )
    }

    /// Tile containing a world position, if it is inside the grid.
    pub fn tile_at(&self, position: Vec3) -> Option<Tile> {
        let (hx, hz) = self.half_extents();
        let size = self.config.tile_size;
        let fx = ((position.x + hx) / size).floor();
        let fz = ((position.z + hz) / size).floor();
        if fx < 0.0 || fz < 0.0 {
            return None;
        }
        let (x, z) = (fx as usize, fz as usize);
        (x < self.config.width && z < self.config.depth).then_some((x, z))
    }

    /// Tile nearest to a world position, clamping onto the grid.
    pub fn nearest_tile(&self, position: Vec3) -> Tile {
        let (hx, hz) = self.half_extents();
        let size = self.config.tile_size;
        let clamp = |v: f32, n: usize| (v.floor().max(0.0) as usize).min(n - 1);
        (
            clamp((position.x + hx) / size, self.config.width),
            clamp((position.z + hz) / size, self.config.depth),
        )
    }

    /// Neighbor in `dir`, if it lies on the grid.
    pub fn neighbor(&self, (x, z): Tile, dir: Direction) -> Option<Tile> {
        let (dx, dz) = dir.offset();
        let nx = x.checked_add_signed(dx)?;
        let nz = z.checked_add_signed(dz)?;
        (nx < self.config.width && nz < self.config.depth).then_some((nx, nz))
    }

    /// Whether the edge of `tile` facing `dir` has no wall.
    pub fn is_open(&self, tile: Tile, dir: Direction) -> bool {
        let Some(next) = self.neighbor(tile, dir) else {
            return false;
        };
        match dir {
            Direction::North => self.open_north[self.index(tile)],
            Direction::South => self.open_north[self.index(next)],
            Direction::East => self.open_east[self.index(tile)],
            Direction::West => self.open_east[self.index(next)],
        }
    }

    /// Tiles reachable in one step from `tile`.
    pub fn passable_neighbors(&self, tile: Tile) -> impl Iterator<Item = Tile> + '_ {
        Direction::ALL
            .into_iter()
            .filter(move |&d| self.is_open(tile, d))
            .filter_map(move |d| self.neighbor(tile, d))
    }

    /// Static wall boxes: interior walls plus the four boundary walls.
    pub fn wall_boxes(&self) -> &[Aabb] {
        &self.walls
    }

    /// Center of a uniformly chosen tile.
    pub fn random_tile_center(&self, rng: &mut impl Rng) -> Vec3 {
        let x = rng.gen_range(0..self.config.width);
        let z = rng.gen_range(0..self.config.depth);
        self.tile_center(x, z)
    }

    /// Spawn points of the two slots: the north-west and south-east corner tiles.
    pub fn spawn_points(&self) -> [Vec3; 2] {
        [
            self.tile_center(0, self.config.depth - 1),
            self.tile_center(self.config.width - 1, 0),
        ]
    }

    fn index(&self, (x, z): Tile) -> usize {
        z * self.config.width + x
    }

    fn open_between(&mut self, a: Tile, dir: Direction) {
        let Some(b) = self.neighbor(a, dir) else {
            return;
        };
        match dir {
            Direction::North => {
                let i = self.index(a);
                self.open_north[i] = true;
            }
            Direction::South => {
                let i = self.index(b);
                self.open_north[i] = true;
            }
            Direction::East => {
                let i = self.index(a);
                self.open_east[i] = true;
            }
            Direction::West => {
                let i = self.index(b);
                self.open_east[i] = true;
            }
        }
    }

    /// Randomized depth-first backtracker from a random start tile.
    fn carve(&mut self, rng: &mut impl Rng) {
        let mut visited = vec![false; self.config.width * self.config.depth];
        let start = (
            rng.gen_range(0..self.config.width),
            rng.gen_range(0..self.config.depth),
        );
        visited[self.index(start)] = true;
        let mut stack = vec![start];

        while let Some(&current) = stack.last() {
            let mut dirs = Direction::ALL;
            dirs.shuffle(rng);
            let next = dirs.into_iter().find_map(|d| {
                self.neighbor(current, d)
                    .filter(|&n| !visited[self.index(n)])
                    .map(|n| (d, n))
            });
            match next {
                Some((dir, tile)) => {
                    self.open_between(current, dir);
                    visited[self.index(tile)] = true;
                    stack.push(tile);
                }
                None => {
                    stack.pop();
                }
            }
        }
    }

    fn remove_extra_walls(&mut self, chance: f64, rng: &mut impl Rng) {
        for x in 0..self.config.width {
            for z in 0..self.config.depth {
                let i = self.index((x, z));
                if z + 1 < self.config.depth && rng.gen_bool(chance) {
                    self.open_north[i] = true;
                }
                if x + 1 < self.config.width && rng.gen_bool(chance) {
                    self.open_east[i] = true;
                }
            }
        }
    }

    fn rebuild_walls(&mut self) {
        let MazeConfig {
            width,
            depth,
            tile_size,
            wall_height,
            wall_thickness,
            ..
        } = self.config;
        let y = wall_height * 0.5;
        let mut walls = Vec::new();

        for x in 0..width {
            for z in 0..depth {
                let center = self.tile_center(x, z);
                if z + 1 < depth && !self.open_north[self.index((x, z))] {
                    walls.push(Aabb::from_center_size(
                        Vec3::new(center.x, y, center.z + tile_size * 0.5),
                        Vec3::new(tile_size, wall_height, wall_thickness),
                    ));
                }
                if x + 1 < width && !self.open_east[self.index((x, z))] {
                    walls.push(Aabb::from_center_size(
                        Vec3::new(center.x + tile_size * 0.5, y, center.z),
                        Vec3::new(wall_thickness, wall_height, tile_size),
                    ));
                }
            }
        }

        // Boundary walls overlap at the corners.
        let (hx, hz) = self.half_extents();
        let span_x = width as f32 * tile_size + wall_thickness;
        let span_z = depth as f32 * tile_size + wall_thickness;
        for sign in [-1.0, 1.0] {
            walls.push(Aabb::from_center_size(
                Vec3::new(0.0, y, sign * hz),
                Vec3::new(span_x, wall_height, wall_thickness),
            ));
            walls.push(Aabb::from_center_size(
                Vec3::new(sign * hx, y, 0.0),
                Vec3::new(wall_thickness, wall_height, span_z),
            ));
        }

        self.walls = walls;
    }
}
