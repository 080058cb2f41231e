//! Arena geometry for SKIRMISH.
//!
//! Maze generation, static wall boxes, tile-graph navigation and sphere
//! sweeps against walls. Plain data and pure functions; no ECS.

pub mod geometry;
pub mod maze;
pub mod nav;
pub mod sweep;

pub use geometry::Aabb;
pub use maze::{Maze, MazeConfig};
