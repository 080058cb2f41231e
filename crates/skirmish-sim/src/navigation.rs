//! Per-slot path planning over the maze.

use glam::Vec3;

use skirmish_agent::error::AgentError;
use skirmish_agent::path::{Route, RouteOrigin};
use skirmish_agent::ports::PathPlanner;
use skirmish_arena::{nav, Maze};

/// Planner state owned by one slot: where the planner thinks the agent is
/// and the last route it produced.
#[derive(Debug, Clone, Default)]
pub struct NavAgent {
    pub position: Vec3,
    pub route: Option<Route>,
}

impl NavAgent {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            route: None,
        }
    }
}

/// `PathPlanner` view of a slot's `NavAgent` over the current maze.
///
/// `ready` is false while the maze is being rebuilt; the planner then
/// reports itself unavailable.
pub struct Navigator<'a> {
    agent: &'a mut NavAgent,
    maze: &'a Maze,
    ready: bool,
    clearance: f32,
}

impl<'a> Navigator<'a> {
    pub fn new(agent: &'a mut NavAgent, maze: &'a Maze, ready: bool, clearance: f32) -> Self {
        Self {
            agent,
            maze,
            ready,
            clearance,
        }
    }
}

impl PathPlanner for Navigator<'_> {
    fn is_available(&self) -> bool {
        self.ready
    }

    fn set_destination(&mut self, goal: Vec3) -> Result<(), AgentError> {
        if !self.ready {
            return Err(AgentError::PlannerUnavailable);
        }
        match nav::find_path(self.maze, self.agent.position, goal) {
            Some(corners) => {
                self.agent.route = Some(Route::new(corners, RouteOrigin::IncludesAgent));
                Ok(())
            }
            None => {
                self.agent.route = None;
                Err(AgentError::NoRoute { goal })
            }
        }
    }

    fn route(&self) -> Option<&Route> {
        self.agent.route.as_ref()
    }

    fn sample_position(&self, point: Vec3, radius: f32) -> Option<Vec3> {
        nav::sample_position(self.maze, point, radius, self.clearance)
    }

    fn reset_path(&mut self) {
        self.agent.route = None;
    }

    fn warp(&mut self, position: Vec3) {
        self.agent.position = position;
        self.agent.route = None;
    }

    fn sync_position(&mut self, position: Vec3) {
        self.agent.position = position;
    }
}
