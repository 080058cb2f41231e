//! ECS systems that operate on the arena world each tick.
//!
//! Systems are plain functions over `&mut World` (or `&World` for
//! read-only work). State that outlives a tick lives in components or in
//! the small structs the engine owns.

pub mod actuation;
pub mod agent_ai;
pub mod cleanup;
pub mod movement;
pub mod powerups;
pub mod projectiles;
pub mod respawn;
pub mod snapshot;
