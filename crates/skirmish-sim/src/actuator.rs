//! Tank-side implementation of the controller's `Actuator`.
//!
//! The controller runs while the world is borrowed for queries, so the
//! actuator works on a captured copy of the tank and buffers what the
//! controller asks for into a `DriveFrame`. The frame is written back once
//! the controller is done and consumed by the actuation system.

use glam::Vec3;
use hecs::{Entity, World};

use skirmish_agent::error::AgentError;
use skirmish_agent::ports::Actuator;
use skirmish_core::components::{DriveFrame, Tank, Transform};
use skirmish_core::enums::WeaponKind;
use skirmish_core::types::{ControlInput, EntityId, Pose};
use skirmish_core::weapons::{weapon_profile, WeaponProfile};

use crate::world_setup::entity_id;

pub struct TankActuator {
    id: EntityId,
    pose: Pose,
    weapon: WeaponKind,
    alive: bool,
    frame: DriveFrame,
}

impl TankActuator {
    /// Capture a tank's current state. Missing entities yield `None`.
    pub fn capture(world: &World, entity: Entity) -> Option<Self> {
        let mut query = world.query_one::<(&Transform, &Tank)>(entity).ok()?;
        let (transform, tank) = query.get()?;
        Some(Self {
            id: entity_id(entity),
            pose: Pose::new(transform.position, transform.forward),
            weapon: tank.weapon,
            alive: tank.alive,
            frame: DriveFrame::default(),
        })
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn frame(&self) -> &DriveFrame {
        &self.frame
    }

    /// Write the buffered frame onto the tank.
    pub fn commit(self, world: &mut World, entity: Entity) {
        if let Ok(mut frame) = world.get::<&mut DriveFrame>(entity) {
            *frame = self.frame;
        }
    }
}

impl Actuator for TankActuator {
    fn id(&self) -> EntityId {
        self.id
    }

    fn pose(&self) -> Pose {
        self.pose
    }

    fn current_weapon(&self) -> WeaponKind {
        self.weapon
    }

    fn weapon_profile(&self, kind: WeaponKind) -> Result<WeaponProfile, AgentError> {
        Ok(weapon_profile(kind))
    }

    fn drive(&mut self, input: &ControlInput) {
        self.frame.input = *input;
    }

    fn attack(&mut self) {
        self.frame.fire = true;
    }

    fn respawn(&mut self, position: Vec3) {
        self.pose.position = position;
        self.frame.respawn_to = Some(position);
    }
}
