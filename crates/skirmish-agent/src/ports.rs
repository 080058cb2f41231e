//! Collaborator interfaces consumed by the controller.
//!
//! The controller never reaches for global state: every tick it is handed
//! a [`Ports`] bundle borrowing the actuator that moves and fires the
//! agent, the agent's path planner, and a read-only view of the world.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use skirmish_core::enums::{EntityCategory, WeaponKind};
use skirmish_core::types::{ControlInput, EntityId, Pose};
use skirmish_core::weapons::WeaponProfile;

use crate::error::AgentError;
use crate::path::Route;

/// A live entity as reported by the world.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EntityView {
    pub id: EntityId,
    pub category: EntityCategory,
    pub position: Vec3,
    pub velocity: Vec3,
}

/// First obstruction met by a sphere sweep.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepHit {
    /// Owning entity, or `None` for static geometry.
    pub entity: Option<EntityId>,
    pub distance: f32,
    pub point: Vec3,
}

/// The movement/combat component the controller drives.
pub trait Actuator {
    /// Entity this actuator moves.
    fn id(&self) -> EntityId;
    fn pose(&self) -> Pose;
    fn current_weapon(&self) -> WeaponKind;
    /// Weapon stats for `kind`.
    fn weapon_profile(&self, kind: WeaponKind) -> Result<WeaponProfile, AgentError>;
    /// Apply turn and throttle for this tick. Vertical velocity is preserved.
    fn drive(&mut self, input: &ControlInput);
    /// Fire one shot of the equipped weapon.
    fn attack(&mut self);
    fn respawn(&mut self, position: Vec3);
}

/// Per-agent path-planning service. It plans routes but never moves the agent.
pub trait PathPlanner {
    fn is_available(&self) -> bool;
    fn set_destination(&mut self, goal: Vec3) -> Result<(), AgentError>;
    /// Route computed by the last successful `set_destination`.
    fn route(&self) -> Option<&Route>;
    /// Nearest navigable point within `radius` of `point`.
    fn sample_position(&self, point: Vec3, radius: f32) -> Option<Vec3>;
    fn reset_path(&mut self);
    /// Teleport the planner's notion of the agent.
    fn warp(&mut self, position: Vec3);
    /// Keep the planner's notion of the agent in step with the real one.
    fn sync_position(&mut self, position: Vec3);
}

/// Read-only scans and sweeps over the live world.
pub trait WorldQuery {
    fn live_entities(&self, category: EntityCategory) -> Vec<EntityView>;
    fn locate(&self, id: EntityId) -> Option<EntityView>;
    /// Sweep a sphere along `direction` and report the nearest hit.
    ///
    /// Colliders that already overlap the sphere at `origin` are ignored.
    fn sphere_cast(
        &self,
        origin: Vec3,
        radius: f32,
        direction: Vec3,
        max_distance: f32,
    ) -> Option<SweepHit>;
}

/// Collaborators handed to every controller entry point.
pub struct Ports<'a> {
    pub actuator: &'a mut dyn Actuator,
    pub planner: &'a mut dyn PathPlanner,
    pub world: &'a dyn WorldQuery,
}
