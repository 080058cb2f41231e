//! Scripted stand-ins for the controller's collaborators.

use std::cell::RefCell;

use glam::Vec3;

use skirmish_core::enums::{EntityCategory, WeaponKind};
use skirmish_core::geometry::rotate_yaw;
use skirmish_core::types::{ControlInput, EntityId, Pose};
use skirmish_core::weapons::{weapon_profile, WeaponProfile};

use crate::error::AgentError;
use crate::path::{Route, RouteOrigin};
use crate::ports::{Actuator, EntityView, PathPlanner, Ports, SweepHit, WorldQuery};

pub const AGENT: EntityId = EntityId(1);
pub const OPPONENT: EntityId = EntityId(2);

/// Records every call; rotates in place when driven, never translates.
pub struct FakeActuator {
    pub pose: Pose,
    pub weapon: WeaponKind,
    pub stats_available: bool,
    pub drives: Vec<ControlInput>,
    pub attacks: u32,
    pub respawns: Vec<Vec3>,
}

impl Actuator for FakeActuator {
    fn id(&self) -> EntityId {
        AGENT
    }

    fn pose(&self) -> Pose {
        self.pose
    }

    fn current_weapon(&self) -> WeaponKind {
        self.weapon
    }

    fn weapon_profile(&self, kind: WeaponKind) -> Result<WeaponProfile, AgentError> {
        if self.stats_available {
            Ok(weapon_profile(kind))
        } else {
            Err(AgentError::WeaponStatsUnavailable(kind))
        }
    }

    fn drive(&mut self, input: &ControlInput) {
        self.pose.forward = rotate_yaw(self.pose.forward, input.yaw_degrees);
        self.drives.push(*input);
    }

    fn attack(&mut self) {
        self.attacks += 1;
    }

    fn respawn(&mut self, position: Vec3) {
        self.pose.position = position;
        self.respawns.push(position);
    }
}

/// Returns a scripted route for any destination.
pub struct FakePlanner {
    pub available: bool,
    pub scripted_route: Option<Route>,
    pub current: Option<Route>,
    pub sample: Option<Vec3>,
    pub destinations: Vec<Vec3>,
    pub resets: u32,
    pub warps: Vec<Vec3>,
    pub synced: Option<Vec3>,
}

impl PathPlanner for FakePlanner {
    fn is_available(&self) -> bool {
        self.available
    }

    fn set_destination(&mut self, goal: Vec3) -> Result<(), AgentError> {
        if !self.available {
            return Err(AgentError::PlannerUnavailable);
        }
        self.destinations.push(goal);
        self.current = self.scripted_route.clone();
        match self.current {
            Some(_) => Ok(()),
            None => Err(AgentError::NoRoute { goal }),
        }
    }

    fn route(&self) -> Option<&Route> {
        self.current.as_ref()
    }

    fn sample_position(&self, _point: Vec3, _radius: f32) -> Option<Vec3> {
        self.sample
    }

    fn reset_path(&mut self) {
        self.current = None;
        self.resets += 1;
    }

    fn warp(&mut self, position: Vec3) {
        self.warps.push(position);
    }

    fn sync_position(&mut self, position: Vec3) {
        self.synced = Some(position);
    }
}

/// Entity lists plus a scripted sweep result.
pub struct FakeWorld {
    pub agents: Vec<EntityView>,
    pub projectiles: Vec<EntityView>,
    pub powerups: Vec<EntityView>,
    pub sweep: Option<SweepHit>,
    /// `(radius, max_distance)` of every sweep.
    pub casts: RefCell<Vec<(f32, f32)>>,
}

impl WorldQuery for FakeWorld {
    fn live_entities(&self, category: EntityCategory) -> Vec<EntityView> {
        match category {
            EntityCategory::Agent => self.agents.clone(),
            EntityCategory::Projectile => self.projectiles.clone(),
            EntityCategory::Powerup => self.powerups.clone(),
        }
    }

    fn locate(&self, id: EntityId) -> Option<EntityView> {
        self.agents
            .iter()
            .chain(&self.projectiles)
            .chain(&self.powerups)
            .find(|e| e.id == id)
            .copied()
    }

    fn sphere_cast(
        &self,
        _origin: Vec3,
        radius: f32,
        _direction: Vec3,
        max_distance: f32,
    ) -> Option<SweepHit> {
        self.casts.borrow_mut().push((radius, max_distance));
        self.sweep
    }
}

/// Agent at the origin facing +X, opponent somewhere on the map.
pub struct FakeArena {
    pub actuator: FakeActuator,
    pub planner: FakePlanner,
    pub world: FakeWorld,
}

impl FakeArena {
    pub fn new(opponent_at: Vec3) -> Self {
        Self {
            actuator: FakeActuator {
                pose: Pose::new(Vec3::ZERO, Vec3::X),
                weapon: WeaponKind::Default,
                stats_available: true,
                drives: Vec::new(),
                attacks: 0,
                respawns: Vec::new(),
            },
            planner: FakePlanner {
                available: true,
                scripted_route: None,
                current: None,
                sample: None,
                destinations: Vec::new(),
                resets: 0,
                warps: Vec::new(),
                synced: None,
            },
            world: FakeWorld {
                agents: vec![agent_view(AGENT, Vec3::ZERO), agent_view(OPPONENT, opponent_at)],
                projectiles: Vec::new(),
                powerups: Vec::new(),
                sweep: None,
                casts: RefCell::new(Vec::new()),
            },
        }
    }

    pub fn ports(&mut self) -> Ports<'_> {
        Ports {
            actuator: &mut self.actuator,
            planner: &mut self.planner,
            world: &self.world,
        }
    }

    /// Sweeps report the opponent as the first obstruction.
    pub fn sweep_hits_opponent(&mut self) {
        self.world.sweep = Some(SweepHit {
            entity: Some(OPPONENT),
            distance: 1.0,
            point: Vec3::ZERO,
        });
    }

    /// Sweeps report static geometry as the first obstruction.
    pub fn sweep_hits_wall(&mut self) {
        self.world.sweep = Some(SweepHit {
            entity: None,
            distance: 1.0,
            point: Vec3::ZERO,
        });
    }

    pub fn script_route(&mut self, waypoints: Vec<Vec3>) {
        self.planner.scripted_route = Some(Route::new(waypoints, RouteOrigin::IncludesAgent));
    }

    pub fn move_opponent(&mut self, position: Vec3) {
        if let Some(view) = self.world.agents.iter_mut().find(|e| e.id == OPPONENT) {
            view.position = position;
        }
    }

    pub fn add_projectile(&mut self, id: u64, position: Vec3, velocity: Vec3) {
        self.world.projectiles.push(EntityView {
            id: EntityId(id),
            category: EntityCategory::Projectile,
            position,
            velocity,
        });
    }

    pub fn add_powerup(&mut self, id: u64, position: Vec3) {
        self.world.powerups.push(EntityView {
            id: EntityId(id),
            category: EntityCategory::Powerup,
            position,
            velocity: Vec3::ZERO,
        });
    }

    pub fn last_drive(&self) -> Option<ControlInput> {
        self.actuator.drives.last().copied()
    }
}

fn agent_view(id: EntityId, position: Vec3) -> EntityView {
    EntityView {
        id,
        category: EntityCategory::Agent,
        position,
        velocity: Vec3::ZERO,
    }
}
