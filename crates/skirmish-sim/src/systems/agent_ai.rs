//! Agent AI system: runs each slot's controller against the world.

use hecs::World;

use skirmish_agent::ports::Ports;
use skirmish_arena::Maze;
use skirmish_core::components::AgentTelemetry;
use skirmish_core::events::AgentEvent;

use crate::actuator::TankActuator;
use crate::engine::AgentSlot;
use crate::navigation::Navigator;
use crate::view::ArenaView;

/// Tick every living, AI-controlled slot and buffer its drive frame.
pub fn run(
    world: &mut World,
    maze: &Maze,
    nav_ready: bool,
    slots: &mut [AgentSlot],
    agent_radius: f32,
    dt: f32,
    events: &mut Vec<AgentEvent>,
) {
    for slot in slots.iter_mut() {
        if !slot.controller.is_controlled() {
            continue;
        }
        let Some(mut actuator) = TankActuator::capture(world, slot.entity) else {
            continue;
        };
        if !actuator.is_alive() {
            continue;
        }
        {
            let view = ArenaView::new(world, maze, agent_radius);
            let mut planner = Navigator::new(&mut slot.nav, maze, nav_ready, agent_radius);
            let mut ports = Ports {
                actuator: &mut actuator,
                planner: &mut planner,
                world: &view,
            };
            slot.controller.tick(&mut ports, dt, events);
        }
        actuator.commit(world, slot.entity);
    }
}

/// Mirror controller state onto each tank for snapshots.
pub fn sync_telemetry(world: &mut World, slots: &[AgentSlot]) {
    for slot in slots {
        if let Ok(mut telemetry) = world.get::<&mut AgentTelemetry>(slot.entity) {
            telemetry.controlled = slot.controller.is_controlled();
            telemetry.intent = slot.controller.intent();
            telemetry.line_of_sight = slot.controller.has_line_of_sight();
            telemetry.dodging = slot.controller.is_dodging();
        }
    }
}
