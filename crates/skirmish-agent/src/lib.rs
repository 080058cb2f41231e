//! Autonomous combat-agent controller for SKIRMISH.
//!
//! Stands in for a human player: perceives the opponent, incoming
//! projectiles and power-ups, picks a behavior, and emits the same
//! turn/throttle/fire signals a keyboard would. Pure logic over the
//! collaborator traits in [`ports`]; no ECS dependency.

pub mod combat;
pub mod config;
pub mod controller;
pub mod dodge;
pub mod error;
pub mod liveness;
pub mod motion;
pub mod path;
pub mod perception;
pub mod ports;
pub mod selection;
pub mod state;

pub use config::ControllerConfig;
pub use controller::AgentController;
pub use error::AgentError;
pub use ports::{Actuator, PathPlanner, Ports, WorldQuery};
pub use skirmish_core as core;

#[cfg(test)]
mod test_support;
#[cfg(test)]
mod tests;
