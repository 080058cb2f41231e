//! Combat execution: aim check, clear-shot check, burst cadence.

use glam::Vec3;
use tracing::debug;

use skirmish_core::events::AgentEvent;
use skirmish_core::geometry::planar_angle_deg;
use skirmish_core::types::{EntityId, Pose};

use crate::config::ControllerConfig;
use crate::perception::{clear_path, WeaponReading};
use crate::ports::{EntityView, Ports};
use crate::state::{AgentState, BurstCounter};

/// Tolerance for timer comparisons against accumulated tick time.
const TIMER_EPSILON: f32 = 1e-4;

/// What the burst counter decided this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BurstStep {
    /// Waiting on the shot cooldown or the post-burst pause.
    Wait,
    /// Pull the trigger. Carries the shot's index within the burst (1-based).
    Fire { shot_in_burst: u32 },
    /// Post-burst pause is over; a new burst may start.
    Rearmed,
}

impl BurstCounter {
    /// Advance the cadence by `dt` while the shot is lined up.
    pub fn advance(&mut self, dt: f32, burst_size: u32, config: &ControllerConfig) -> BurstStep {
        if self.shots >= burst_size {
            self.recovery += dt;
            if self.recovery + TIMER_EPSILON >= config.shot_cooldown * config.burst_recovery_factor {
                self.reset();
                return BurstStep::Rearmed;
            }
            return BurstStep::Wait;
        }

        self.cooldown += dt;
        if self.cooldown + TIMER_EPSILON >= config.shot_cooldown {
            self.shots += 1;
            self.cooldown = 0.0;
            return BurstStep::Fire {
                shot_in_burst: self.shots,
            };
        }
        BurstStep::Wait
    }
}

/// Whether the agent's heading is within the aiming tolerance of `target`.
pub fn is_aimed(pose: &Pose, target: Vec3, config: &ControllerConfig) -> bool {
    planar_angle_deg(pose.forward, target - pose.position) <= config.aim_tolerance_deg
}

/// Run one tick of combat against a visible opponent.
#[allow(clippy::too_many_arguments)]
pub fn engage(
    state: &mut AgentState,
    ports: &mut Ports<'_>,
    agent: EntityId,
    pose: &Pose,
    opponent: &EntityView,
    weapon: WeaponReading,
    config: &ControllerConfig,
    dt: f32,
    events: &mut Vec<AgentEvent>,
) {
    let kind = ports.actuator.current_weapon();
    if state.burst_weapon != Some(kind) {
        state.burst.reset();
        state.burst_weapon = Some(kind);
    }

    if !is_aimed(pose, opponent.position, config) {
        return;
    }
    if !clear_path(
        ports.world,
        pose.position,
        opponent,
        weapon.radius,
        config.eye_height,
    ) {
        return;
    }

    match state.burst.advance(dt, weapon.burst_size, config) {
        BurstStep::Fire { shot_in_burst } => {
            ports.actuator.attack();
            events.push(AgentEvent::ShotFired {
                agent,
                weapon: kind,
                shot_in_burst,
            });
            if shot_in_burst >= weapon.burst_size {
                debug!(agent = %agent, shots = shot_in_burst, "burst complete");
                events.push(AgentEvent::BurstComplete {
                    agent,
                    shots: shot_in_burst,
                });
            }
        }
        BurstStep::Rearmed | BurstStep::Wait => {}
    }
}
