//! Arena engine, the core of the simulation.
//!
//! `ArenaEngine` owns the hecs world, the maze and both agent slots,
//! processes orchestrator commands, runs all systems, and produces
//! `ArenaSnapshot`s. Completely headless, enabling deterministic testing.

use std::collections::VecDeque;

use glam::Vec3;
use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use skirmish_agent::ports::Ports;
use skirmish_agent::{AgentController, ControllerConfig};
use skirmish_arena::{Maze, MazeConfig};
use skirmish_core::commands::ArenaCommand;
use skirmish_core::components::Velocity;
use skirmish_core::constants::*;
use skirmish_core::enums::MatchPhase;
use skirmish_core::events::AgentEvent;
use skirmish_core::state::{ArenaSnapshot, ScoreView};
use skirmish_core::types::SimTime;

use crate::actuator::TankActuator;
use crate::navigation::{NavAgent, Navigator};
use crate::systems;
use crate::systems::powerups::PowerupSpawner;
use crate::systems::respawn::{RespawnSequence, RespawnStep};
use crate::view::ArenaView;
use crate::world_setup;

/// Configuration for a new arena.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    /// RNG seed for determinism. Same seed = same match.
    pub seed: u64,
    pub maze: MazeConfig,
    /// Seconds between power-up spawns.
    pub powerup_interval: f32,
    /// Seconds from a kill to the maze rebuild.
    pub respawn_regenerate_delay: f32,
    /// Seconds from the maze rebuild to putting the tanks back.
    pub respawn_place_delay: f32,
    /// Slots handed to the AI when the match starts.
    pub ai_slots: [bool; 2],
    /// Tank speed at full throttle (units per second).
    pub move_speed: f32,
    /// Tank turn rate at full turn input (degrees per second).
    pub rotation_speed_deg: f32,
    pub agent_radius: f32,
    /// Live default-weapon rounds allowed per tank.
    pub projectile_cap: usize,
    /// Extra reach beyond the tank radius for picking up a crate.
    pub powerup_pickup_radius: f32,
    pub controller: ControllerConfig,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            maze: MazeConfig::default(),
            powerup_interval: POWERUP_SPAWN_INTERVAL,
            respawn_regenerate_delay: RESPAWN_REGENERATE_DELAY,
            respawn_place_delay: RESPAWN_PLACE_DELAY,
            ai_slots: [true, true],
            move_speed: AGENT_MOVE_SPEED,
            rotation_speed_deg: ROTATION_SPEED_DEG,
            agent_radius: AGENT_RADIUS,
            projectile_cap: DEFAULT_WEAPON_PROJECTILE_CAP,
            powerup_pickup_radius: POWERUP_PICKUP_RADIUS,
            controller: ControllerConfig::default(),
        }
    }
}

/// One combatant: its tank entity, its controller and its planner state.
pub struct AgentSlot {
    pub entity: Entity,
    pub controller: AgentController,
    pub nav: NavAgent,
}

/// The arena engine. Owns the ECS world and all match state.
pub struct ArenaEngine {
    config: ArenaConfig,
    world: World,
    time: SimTime,
    phase: MatchPhase,
    rng: ChaCha8Rng,
    maze: Maze,
    nav_ready: bool,
    slots: Vec<AgentSlot>,
    command_queue: VecDeque<ArenaCommand>,
    despawn_buffer: Vec<Entity>,
    events: Vec<AgentEvent>,
    score: ScoreView,
    powerups: PowerupSpawner,
    respawn: RespawnSequence,
}

impl ArenaEngine {
    /// Create an arena: generate the maze and spawn both tanks at their
    /// spawn points. The match waits in the lobby until `StartMatch`.
    pub fn new(config: ArenaConfig) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let maze = Maze::generate(config.maze.clone(), &mut rng);
        let mut world = World::new();

        let mut controller_config = config.controller.clone();
        controller_config.rotation_speed_deg = config.rotation_speed_deg;

        let slots = maze
            .spawn_points()
            .into_iter()
            .enumerate()
            .map(|(slot, position)| {
                let entity = world_setup::spawn_tank(&mut world, slot, position);
                let id = world_setup::entity_id(entity);
                AgentSlot {
                    entity,
                    controller: AgentController::new(id, controller_config.clone(), position),
                    nav: NavAgent::new(position),
                }
            })
            .collect();

        Self {
            world,
            time: SimTime::default(),
            phase: MatchPhase::default(),
            rng,
            maze,
            nav_ready: true,
            slots,
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
            score: ScoreView::default(),
            powerups: PowerupSpawner::new(config.powerup_interval),
            respawn: RespawnSequence::default(),
            config,
        }
    }

    /// Queue a command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: ArenaCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = ArenaCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the arena by one tick and return the resulting snapshot.
    pub fn tick(&mut self) -> ArenaSnapshot {
        self.process_commands();

        if self.phase == MatchPhase::Active {
            self.run_systems();
            self.time.advance();
        }

        systems::agent_ai::sync_telemetry(&mut self.world, &self.slots);
        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(&self.world, &self.time, self.phase, events, &self.score)
    }

    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn config(&self) -> &ArenaConfig {
        &self.config
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    pub fn score(&self) -> &ScoreView {
        &self.score
    }

    /// Controller of a slot, if the slot exists.
    pub fn controller(&self, slot: usize) -> Option<&AgentController> {
        self.slots.get(slot).map(|s| &s.controller)
    }

    /// Tank entity of a slot, if the slot exists.
    pub fn tank_entity(&self, slot: usize) -> Option<Entity> {
        self.slots.get(slot).map(|s| s.entity)
    }

    /// Mutable world access for tests that stage situations directly.
    #[cfg(test)]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Swap in a hand-built maze (for tests needing a known layout).
    #[cfg(test)]
    pub fn set_maze(&mut self, maze: Maze) {
        self.maze = maze;
    }

    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    fn handle_command(&mut self, command: ArenaCommand) {
        match command {
            ArenaCommand::StartMatch => {
                if self.phase == MatchPhase::Lobby {
                    self.phase = MatchPhase::Active;
                    self.time = SimTime::default();
                    for slot in 0..self.slots.len() {
                        if self.config.ai_slots.get(slot).copied().unwrap_or(false) {
                            self.set_controlled(slot, true);
                        }
                    }
                    info!(seed = self.config.seed, "match started");
                }
            }
            ArenaCommand::Pause => {
                if self.phase == MatchPhase::Active {
                    self.phase = MatchPhase::Paused;
                }
            }
            ArenaCommand::Resume => {
                if self.phase == MatchPhase::Paused {
                    self.phase = MatchPhase::Active;
                }
            }
            ArenaCommand::SetControlled { slot, enabled } => {
                self.set_controlled(slot, enabled);
            }
            ArenaCommand::ToggleControl { slot } => {
                if let Some(current) = self.slots.get(slot).map(|s| s.controller.is_controlled()) {
                    self.set_controlled(slot, !current);
                } else {
                    warn!(slot, "toggle for unknown slot ignored");
                }
            }
            ArenaCommand::Respawn { slot, position } => {
                if slot < self.slots.len() {
                    self.respawn_slot(slot, position);
                } else {
                    warn!(slot, "respawn for unknown slot ignored");
                }
            }
        }
    }

    /// Hand a slot to the controller (or take it back) and apply the
    /// resulting halt immediately.
    fn set_controlled(&mut self, slot: usize, enabled: bool) {
        let Some(agent) = self.slots.get_mut(slot) else {
            warn!(slot, "control change for unknown slot ignored");
            return;
        };
        let Some(mut actuator) = TankActuator::capture(&self.world, agent.entity) else {
            return;
        };
        {
            let view = ArenaView::new(&self.world, &self.maze, self.config.agent_radius);
            let mut planner =
                Navigator::new(&mut agent.nav, &self.maze, self.nav_ready, self.config.agent_radius);
            let mut ports = Ports {
                actuator: &mut actuator,
                planner: &mut planner,
                world: &view,
            };
            agent.controller.set_controlled(enabled, &mut ports, &mut self.events);
        }
        if !enabled {
            if let Ok(mut velocity) = self.world.get::<&mut Velocity>(agent.entity) {
                velocity.0 = Vec3::new(0.0, velocity.0.y, 0.0);
            }
        }
        actuator.commit(&mut self.world, agent.entity);
        info!(slot, enabled, "ai control changed");
    }

    /// Put one slot's tank back at `position`, through its controller when
    /// it is AI-controlled.
    fn respawn_slot(&mut self, slot: usize, position: Vec3) {
        let Some(agent) = self.slots.get_mut(slot) else {
            return;
        };
        world_setup::place_tank(&mut self.world, agent.entity, position);
        if !agent.controller.is_controlled() {
            agent.nav = NavAgent::new(position);
            debug!(slot, ?position, "tank respawned");
            return;
        }
        let Some(mut actuator) = TankActuator::capture(&self.world, agent.entity) else {
            return;
        };
        {
            let view = ArenaView::new(&self.world, &self.maze, self.config.agent_radius);
            let mut planner =
                Navigator::new(&mut agent.nav, &self.maze, self.nav_ready, self.config.agent_radius);
            let mut ports = Ports {
                actuator: &mut actuator,
                planner: &mut planner,
                world: &view,
            };
            agent.controller.respawn(position, &mut ports, &mut self.events);
        }
        let placed_at = actuator.frame().respawn_to.unwrap_or(position);
        world_setup::place_tank(&mut self.world, agent.entity, placed_at);
        debug!(slot, ?placed_at, "ai tank respawned");
    }

    /// Rebuild the maze from the engine RNG. Navigation is unavailable
    /// until the tanks are placed again.
    fn regenerate_maze(&mut self) {
        self.maze = Maze::generate(self.config.maze.clone(), &mut self.rng);
        self.nav_ready = false;
        info!(tick = self.time.tick, "maze regenerated");
        self.events.push(AgentEvent::MapRegenerated {
            tick: self.time.tick,
        });
    }

    /// Clear the arena and put both tanks back at their spawn points.
    fn respawn_all(&mut self) {
        let removed = world_setup::clear_arena(&mut self.world, &mut self.despawn_buffer);
        self.nav_ready = true;
        let spawns = self.maze.spawn_points();
        for (agent, position) in self.slots.iter().zip(spawns) {
            world_setup::place_tank(&mut self.world, agent.entity, position);
        }
        for (slot, position) in spawns.into_iter().enumerate() {
            self.respawn_slot(slot, position);
        }
        info!(removed, "tanks respawned");
    }

    /// Run all systems in order.
    fn run_systems(&mut self) {
        let dt = self.time.dt();
        let radius = self.config.agent_radius;

        // 1. Agent AI
        systems::agent_ai::run(
            &mut self.world,
            &self.maze,
            self.nav_ready,
            &mut self.slots,
            radius,
            dt,
            &mut self.events,
        );
        // 2-3. Actuation and weapons
        systems::actuation::run(
            &mut self.world,
            &self.maze,
            &mut self.rng,
            self.config.move_speed,
            radius,
            self.config.projectile_cap,
            dt,
        );
        // 4. Tank movement
        systems::movement::run(&mut self.world, &self.maze, radius, dt);
        // 5. Projectiles
        systems::projectiles::integrate(&mut self.world, &self.maze, dt);
        let killed = systems::projectiles::resolve_hits(
            &mut self.world,
            radius,
            &mut self.score,
            &mut self.events,
        );
        if !killed.is_empty() {
            self.respawn.trigger(self.config.respawn_regenerate_delay);
        }
        // 6. Power-ups
        systems::powerups::spawn(
            &mut self.world,
            &self.maze,
            &mut self.rng,
            &mut self.powerups,
            self.time.tick,
            dt,
        );
        systems::powerups::collect(
            &mut self.world,
            &mut self.rng,
            radius + self.config.powerup_pickup_radius,
            &mut self.events,
            &mut self.despawn_buffer,
        );
        // 7. Respawn sequence
        match self.respawn.advance(dt, self.config.respawn_place_delay) {
            RespawnStep::Wait => {}
            RespawnStep::Regenerate => self.regenerate_maze(),
            RespawnStep::Place => self.respawn_all(),
        }
        // 8. Cleanup
        systems::cleanup::run(&mut self.world, &mut self.despawn_buffer);
    }
}
