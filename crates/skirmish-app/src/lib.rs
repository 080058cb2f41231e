//! SKIRMISH headless application.
//!
//! Wires the simulation crates into a command-line runner: builds an
//! arena from configuration, plays a match without a renderer, and
//! summarizes what the agents did.

pub mod game_loop;
pub mod logging;

pub use skirmish_core as core;
