//! The agent controller: one perception/decision/action cycle per tick.
//!
//! Order within a tick is fixed: threat check and dodge override, target
//! refresh (on its own cadence), combat, liveness sampling, then motion
//! synthesis. A dodge or a recovery maneuver bypasses selection and
//! steering for as long as it lasts.

use glam::Vec3;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, warn};

use skirmish_core::enums::Intent;
use skirmish_core::events::AgentEvent;
use skirmish_core::types::{ControlInput, EntityId, Pose};

use crate::config::ControllerConfig;
use crate::dodge::{self, DodgeStep};
use crate::error::AgentError;
use crate::liveness::Liveness;
use crate::motion;
use crate::path::resolve_aim_point;
use crate::perception;
use crate::ports::{EntityView, Ports};
use crate::selection::{select_target, SelectionInput, TargetDecision};
use crate::state::{AgentState, DodgeState, RecoveryManeuver};

/// Stands in for a human player on one agent.
pub struct AgentController {
    id: EntityId,
    config: ControllerConfig,
    state: AgentState,
    rng: ChaCha8Rng,
}

impl AgentController {
    /// Create a controller for the agent `id` standing at `position`.
    ///
    /// Control starts disabled; the orchestrator hands it over with
    /// [`AgentController::set_controlled`].
    pub fn new(id: EntityId, config: ControllerConfig, position: Vec3) -> Self {
        let rng = ChaCha8Rng::seed_from_u64(config.seed ^ id.0.rotate_left(32));
        Self {
            id,
            config,
            state: AgentState::new(position),
            rng,
        }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn state(&self) -> &AgentState {
        &self.state
    }

    pub fn is_controlled(&self) -> bool {
        self.state.controlled
    }

    pub fn intent(&self) -> Intent {
        self.state.intent
    }

    pub fn has_line_of_sight(&self) -> bool {
        self.state.has_line_of_sight
    }

    pub fn is_dodging(&self) -> bool {
        self.state.dodge.is_active()
    }

    /// Hand the agent to the controller, or take it back.
    ///
    /// Disabling halts the agent, clears the planned route and resets every
    /// counter in the same call. Enabling re-targets the current position,
    /// re-acquires the opponent and arms an immediate refresh. Either way the
    /// intent drops back to `Idle`.
    pub fn set_controlled(
        &mut self,
        enabled: bool,
        ports: &mut Ports<'_>,
        events: &mut Vec<AgentEvent>,
    ) {
        let position = ports.actuator.pose().position;
        self.set_intent(Intent::Idle, events);
        if enabled {
            self.state.reset(position);
            self.state.controlled = true;
            self.state.refresh_timer = self.config.refresh_interval;
            self.state.opponent = self.acquire_opponent(ports, position).map(|o| o.id);
            ports.planner.warp(position);
        } else {
            ports.actuator.drive(&ControlInput::idle());
            ports.planner.reset_path();
            self.state.reset(position);
            self.state.controlled = false;
        }
        debug!(agent = %self.id, enabled, "ai control toggled");
    }

    /// Put the agent back at `position` and start from a clean state.
    pub fn respawn(
        &mut self,
        position: Vec3,
        ports: &mut Ports<'_>,
        events: &mut Vec<AgentEvent>,
    ) {
        ports.actuator.respawn(position);
        self.set_intent(Intent::Idle, events);
        self.state.reset(position);
        self.state.refresh_timer = self.config.refresh_interval;
        self.state.opponent = self.acquire_opponent(ports, position).map(|o| o.id);
        ports.planner.warp(position);
        ports.planner.reset_path();
        debug!(agent = %self.id, ?position, "controller respawned");
    }

    /// Run one cycle. Returns the input sent to the actuator, or `None`
    /// while the agent is not under AI control.
    pub fn tick(
        &mut self,
        ports: &mut Ports<'_>,
        dt: f32,
        events: &mut Vec<AgentEvent>,
    ) -> Option<ControlInput> {
        if !self.state.controlled {
            return None;
        }
        let pose = ports.actuator.pose();

        // Step 1: threat check; a new dodge preempts everything else
        if let Some(threat) = perception::detect_threat(ports.world, pose.position, &self.config) {
            if !self.state.dodge.is_active() {
                let dodge = dodge::begin(&threat, &pose, &*ports.planner, &self.config, &mut self.rng);
                if let DodgeState::Dodging { target, .. } = dodge {
                    debug!(agent = %self.id, threat = %threat.id, distance = threat.distance, "dodging");
                    events.push(AgentEvent::DodgeStarted {
                        agent: self.id,
                        threat: threat.id,
                        target,
                    });
                }
                self.state.dodge = dodge;
                self.state.burst.reset();
                self.state.recovery = None;
                self.set_intent(Intent::Dodge, events);
            }
        }

        // Step 2: an active dodge overrides the rest of the cycle
        match dodge::advance(&mut self.state.dodge, &pose, &self.config, dt) {
            Some(DodgeStep::Continue(input)) => return Some(self.emit(ports, &pose, input)),
            Some(DodgeStep::Finished { reached }) => {
                debug!(agent = %self.id, reached, "dodge ended");
                events.push(AgentEvent::DodgeEnded {
                    agent: self.id,
                    reached,
                });
                self.state.refresh_timer = self.config.refresh_interval;
            }
            None => {}
        }

        // Step 3: periodic target refresh, held off while recovering
        self.state.refresh_timer += dt;
        if self.state.recovery.is_none()
            && self.state.refresh_timer + 1e-4 >= self.config.refresh_interval
        {
            self.refresh(ports, &pose, events);
            self.state.refresh_timer = 0.0;
        }

        let opponent = self.state.opponent.and_then(|id| ports.world.locate(id));

        // Step 4: combat whenever the opponent is in sight
        match opponent {
            Some(ref target) if self.state.has_line_of_sight => {
                let weapon = perception::read_weapon(&*ports.actuator, &self.config);
                crate::combat::engage(
                    &mut self.state,
                    ports,
                    self.id,
                    &pose,
                    target,
                    weapon,
                    &self.config,
                    dt,
                    events,
                );
            }
            _ => self.state.burst.reset(),
        }

        // Step 5: liveness sampling
        let sample = self.state.stuck.sample(
            pose.position,
            self.state.has_line_of_sight,
            &self.config,
            dt,
        );
        if sample == Some(Liveness::Stuck) {
            let maneuver = RecoveryManeuver::start(&self.config, &mut self.rng);
            debug!(agent = %self.id, yaw = maneuver.pending_yaw_deg, "stuck, backing out");
            events.push(AgentEvent::Unstuck {
                agent: self.id,
                yaw_degrees: maneuver.pending_yaw_deg,
            });
            self.state.recovery = Some(maneuver);
            ports.planner.reset_path();
            self.set_intent(Intent::Recover, events);
        }

        // Step 6: motion synthesis
        let input = match self.state.recovery.as_mut() {
            Some(maneuver) => {
                let (input, continues) = maneuver.step(&self.config, dt);
                if !continues {
                    self.state.recovery = None;
                    self.state.refresh_timer = self.config.refresh_interval;
                }
                input
            }
            None => self.synthesize(&pose, opponent.as_ref(), dt),
        };

        Some(self.emit(ports, &pose, input))
    }

    fn emit(&self, ports: &mut Ports<'_>, pose: &Pose, input: ControlInput) -> ControlInput {
        ports.actuator.drive(&input);
        ports.planner.sync_position(pose.position);
        input
    }

    fn synthesize(&self, pose: &Pose, opponent: Option<&EntityView>, dt: f32) -> ControlInput {
        match (self.state.intent, opponent) {
            (Intent::Hold, Some(target)) => motion::hold(pose, target.position, &self.config, dt),
            (Intent::Hold | Intent::Idle, _) => ControlInput::idle(),
            _ => motion::pursue(pose, self.state.aim_point, &self.config, dt),
        }
    }

    fn refresh(&mut self, ports: &mut Ports<'_>, pose: &Pose, events: &mut Vec<AgentEvent>) {
        let opponent = match self.state.opponent.and_then(|id| ports.world.locate(id)) {
            Some(view) => Some(view),
            None => self.acquire_opponent(ports, pose.position),
        };
        self.state.opponent = opponent.map(|o| o.id);

        let weapon = perception::read_weapon(&*ports.actuator, &self.config);
        let visible = opponent.as_ref().is_some_and(|o| {
            perception::opponent_visible(ports.world, pose, o, weapon.radius, &self.config)
        });
        if visible != self.state.has_line_of_sight {
            debug!(agent = %self.id, visible, "line of sight changed");
        }
        self.state.has_line_of_sight = visible;

        let powerup = perception::nearest_powerup(ports.world, pose.position, &self.config);
        let input = SelectionInput {
            visible,
            holds_powerup: ports.actuator.current_weapon().is_powerup(),
            opponent: opponent.map(|o| (o.position, o.position.distance(pose.position))),
            powerup: powerup.map(|p| (p.id, p.position)),
        };

        let decision = select_target(&input, &self.config);
        self.state.aim_point = match decision {
            TargetDecision::Loot { goal, .. } | TargetDecision::Pursue { goal } => {
                resolve_aim_point(&mut *ports.planner, self.id, goal)
            }
            TargetDecision::Hold | TargetDecision::Idle => pose.position,
        };

        self.set_intent(decision.intent(), events);
    }

    fn acquire_opponent(&self, ports: &Ports<'_>, from: Vec3) -> Option<EntityView> {
        let found = perception::acquire_opponent(ports.world, self.id, from);
        if found.is_none() {
            warn!(agent = %self.id, error = %AgentError::OpponentNotFound(self.id), "opponent lookup failed");
        }
        found
    }

    fn set_intent(&mut self, intent: Intent, events: &mut Vec<AgentEvent>) {
        if self.state.intent == intent {
            return;
        }
        debug!(agent = %self.id, from = ?self.state.intent, to = ?intent, "intent changed");
        events.push(AgentEvent::IntentChanged {
            agent: self.id,
            from: self.state.intent,
            to: intent,
        });
        self.state.intent = intent;
    }
}
