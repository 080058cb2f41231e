//! SKIRMISH arena simulation: a headless ECS world driving two tanks.
//!
//! Owns the hecs world, runs the agent controllers against it through the
//! collaborator traits, integrates tanks, projectiles and power-ups, and
//! produces `ArenaSnapshot`s. Deterministic for a given seed.

pub mod actuator;
pub mod engine;
pub mod navigation;
pub mod systems;
pub mod view;
pub mod world_setup;

pub use engine::{ArenaConfig, ArenaEngine};
pub use skirmish_agent as agent;
pub use skirmish_core as core;
