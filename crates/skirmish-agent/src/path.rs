//! Path translation: planner routes to a single immediate aim-point.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use tracing::debug;

use skirmish_core::types::EntityId;

use crate::ports::PathPlanner;

/// Whether a route's first waypoint is the agent's own position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RouteOrigin {
    /// Waypoint 0 is where the agent stands; the next vertex is waypoint 1.
    IncludesAgent,
    /// Waypoint 0 is already the next vertex to drive to.
    ExcludesAgent,
}

/// Ordered waypoints from the agent toward a goal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub waypoints: Vec<Vec3>,
    pub origin: RouteOrigin,
}

impl Route {
    pub fn new(waypoints: Vec<Vec3>, origin: RouteOrigin) -> Self {
        Self { waypoints, origin }
    }

    /// The vertex the agent should steer toward right now.
    ///
    /// For a route that includes the agent's position, a lone waypoint is
    /// used as-is. An empty route yields `None`.
    pub fn next_waypoint(&self) -> Option<Vec3> {
        match self.origin {
            RouteOrigin::IncludesAgent => self
                .waypoints
                .get(1)
                .or_else(|| self.waypoints.first())
                .copied(),
            RouteOrigin::ExcludesAgent => self.waypoints.first().copied(),
        }
    }
}

/// Ask the planner for a route to `goal` and pick the immediate aim-point.
///
/// Falls back to the straight-line goal when the planner is unavailable,
/// refuses the destination, or produces an empty route.
pub fn resolve_aim_point(planner: &mut dyn PathPlanner, agent: EntityId, goal: Vec3) -> Vec3 {
    if !planner.is_available() {
        debug!(agent = %agent, "path planner unavailable, steering straight at goal");
        return goal;
    }
    if let Err(err) = planner.set_destination(goal) {
        debug!(agent = %agent, error = %err, "route planning failed, steering straight at goal");
        return goal;
    }
    planner
        .route()
        .and_then(Route::next_waypoint)
        .unwrap_or(goal)
}
