//! Perception: opponent visibility, incoming threats, power-up scan.

use glam::Vec3;
use tracing::warn;

use skirmish_core::enums::EntityCategory;
use skirmish_core::geometry::planar_angle_deg;
use skirmish_core::types::{EntityId, Pose};
use skirmish_core::weapons::weapon_profile;

use crate::config::ControllerConfig;
use crate::ports::{Actuator, EntityView, WorldQuery};

/// A projectile on course to hit the agent. Lives for one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThreatCandidate {
    pub id: EntityId,
    pub position: Vec3,
    pub velocity: Vec3,
    pub distance: f32,
}

/// What the controller needs to know about the equipped weapon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeaponReading {
    pub radius: f32,
    pub burst_size: u32,
}

/// Read the equipped weapon's projectile radius and burst size.
///
/// When the actuator cannot report stats, the default projectile radius and
/// the built-in burst size are used.
pub fn read_weapon(actuator: &dyn Actuator, config: &ControllerConfig) -> WeaponReading {
    let kind = actuator.current_weapon();
    match actuator.weapon_profile(kind) {
        Ok(profile) => WeaponReading {
            radius: profile.radius,
            burst_size: profile.burst_size.max(1),
        },
        Err(err) => {
            warn!(agent = %actuator.id(), error = %err, "weapon stats lookup failed, using default projectile radius");
            WeaponReading {
                radius: config.default_projectile_radius,
                burst_size: weapon_profile(kind).burst_size.max(1),
            }
        }
    }
}

/// Nearest live agent other than `self_id`.
pub fn acquire_opponent(world: &dyn WorldQuery, self_id: EntityId, from: Vec3) -> Option<EntityView> {
    world
        .live_entities(EntityCategory::Agent)
        .into_iter()
        .filter(|e| e.id != self_id)
        .min_by(|a, b| {
            a.position
                .distance_squared(from)
                .total_cmp(&b.position.distance_squared(from))
        })
}

/// Whether a sphere of `radius` can travel from the agent to the opponent.
///
/// Clear only if the first thing hit is the opponent. A sweep that hits
/// nothing is treated as blocked.
pub fn clear_path(
    world: &dyn WorldQuery,
    from: Vec3,
    opponent: &EntityView,
    radius: f32,
    eye_height: f32,
) -> bool {
    let offset = opponent.position - from;
    let Some(direction) = offset.try_normalize() else {
        return false;
    };
    let origin = from + Vec3::Y * eye_height;
    match world.sphere_cast(origin, radius, direction, offset.length()) {
        Some(hit) => hit.entity == Some(opponent.id),
        None => false,
    }
}

/// Range, field-of-view and obstruction test against the opponent.
pub fn opponent_visible(
    world: &dyn WorldQuery,
    pose: &Pose,
    opponent: &EntityView,
    radius: f32,
    config: &ControllerConfig,
) -> bool {
    let offset = opponent.position - pose.position;
    if offset.length() > config.sight_range {
        return false;
    }
    if planar_angle_deg(pose.forward, offset) > config.sight_half_angle_deg {
        return false;
    }
    clear_path(world, pose.position, opponent, radius, config.eye_height)
}

/// Nearest projectile that is heading for the agent.
pub fn detect_threat(
    world: &dyn WorldQuery,
    agent_position: Vec3,
    config: &ControllerConfig,
) -> Option<ThreatCandidate> {
    let mut nearest: Option<ThreatCandidate> = None;

    for projectile in world.live_entities(EntityCategory::Projectile) {
        let to_projectile = projectile.position - agent_position;
        let distance = to_projectile.length();
        if distance > config.threat_detection_radius {
            continue;
        }

        let speed = projectile.velocity.length();
        if speed < config.threat_min_speed {
            continue;
        }

        let Some(toward_agent) = (-to_projectile).try_normalize() else {
            continue;
        };
        let alignment = (projectile.velocity / speed).dot(toward_agent);
        if alignment <= config.threat_alignment_threshold {
            continue;
        }

        // Agent must sit inside the cone around the projectile's path.
        let off_path = (-projectile.velocity).angle_between(to_projectile).to_degrees();
        if off_path >= config.danger_half_angle_deg {
            continue;
        }

        if nearest.map_or(true, |n| distance < n.distance) {
            nearest = Some(ThreatCandidate {
                id: projectile.id,
                position: projectile.position,
                velocity: projectile.velocity,
                distance,
            });
        }
    }

    nearest
}

/// Nearest power-up within the detection radius, visible or not.
pub fn nearest_powerup(
    world: &dyn WorldQuery,
    agent_position: Vec3,
    config: &ControllerConfig,
) -> Option<EntityView> {
    world
        .live_entities(EntityCategory::Powerup)
        .into_iter()
        .map(|p| (p.position.distance(agent_position), p))
        .filter(|(d, _)| *d < config.powerup_detection_radius)
        .min_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, p)| p)
}
