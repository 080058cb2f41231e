//! Simulation constants and tuning parameters.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 50;

/// Seconds per tick.
pub const DT: f32 = 1.0 / TICK_RATE as f32;

// --- Controller cadence ---

/// Seconds between target refreshes (visibility + target selection + route query).
pub const TARGET_REFRESH_INTERVAL: f32 = 0.5;

/// Seconds between liveness samples.
pub const STUCK_CHECK_INTERVAL: f32 = 2.0;

/// Planar distance an agent must cover per liveness sample to count as moving.
pub const STUCK_MIN_MOVEMENT: f32 = 1.0;

/// Consecutive stuck samples before a recovery maneuver fires.
pub const STUCK_THRESHOLD: u32 = 2;

/// Duration of the reverse-throttle recovery maneuver (seconds).
pub const RECOVERY_DURATION: f32 = 0.5;

/// Throttle applied while recovering (half speed in reverse).
pub const RECOVERY_THROTTLE: f32 = -0.5;

/// Bounds of the random in-place rotation applied when unsticking (degrees).
pub const RECOVERY_YAW_MIN_DEG: f32 = 90.0;
pub const RECOVERY_YAW_MAX_DEG: f32 = 180.0;

// --- Perception ---

/// Maximum distance at which the opponent can be seen.
pub const SIGHT_RANGE: f32 = 100.0;

/// Field-of-view half-angle (degrees).
pub const SIGHT_HALF_ANGLE_DEG: f32 = 60.0;

/// Height above the agent origin from which sweeps are cast.
pub const EYE_HEIGHT: f32 = 0.5;

/// Radius within which projectiles are considered for threat detection.
pub const THREAT_DETECTION_RADIUS: f32 = 15.0;

/// Projectiles slower than this are never threats.
pub const THREAT_MIN_SPEED: f32 = 1.0;

/// Cosine between projectile heading and direction to agent required to qualify.
pub const THREAT_ALIGNMENT_THRESHOLD: f32 = 0.5;

/// Half-angle of the danger cone around a projectile's reversed velocity (degrees).
pub const THREAT_DANGER_HALF_ANGLE_DEG: f32 = 30.0;

/// Radius within which power-ups are noticed.
pub const POWERUP_DETECTION_RADIUS: f32 = 30.0;

/// Opponent must be at least this far away before the agent detours for loot.
pub const SAFETY_DISTANCE: f32 = 15.0;

/// Projectile radius assumed when the weapon table cannot be read.
pub const DEFAULT_PROJECTILE_RADIUS: f32 = 0.5;

// --- Motion synthesis ---

/// Agent rotation speed (degrees per second).
pub const ROTATION_SPEED_DEG: f32 = 100.0;

/// Heading error that maps to a full turn input (degrees).
pub const TURN_FULL_SCALE_DEG: f32 = 45.0;

/// Dead zone while pursuing a waypoint (degrees).
pub const PURSUIT_DEAD_ZONE_DEG: f32 = 5.0;

/// Dead zone while holding position and tracking the opponent (degrees).
pub const HOLD_DEAD_ZONE_DEG: f32 = 2.0;

/// Full forward throttle is only applied while the target is inside this cone (degrees).
pub const FORWARD_CONE_DEG: f32 = 90.0;

// --- Combat ---

/// Heading error within which the agent may fire (degrees).
pub const AIM_TOLERANCE_DEG: f32 = 15.0;

/// Seconds between shots inside a burst.
pub const SHOT_COOLDOWN: f32 = 0.5;

/// Multiple of the shot cooldown waited after a completed burst.
pub const BURST_RECOVERY_FACTOR: f32 = 3.0;

// --- Dodge ---

/// Fixed dodge duration (seconds).
pub const DODGE_DURATION: f32 = 1.0;

/// Lateral distance of the dodge target.
pub const DODGE_DISTANCE: f32 = 10.0;

/// Search radius for a navigable dodge target.
pub const DODGE_SAMPLE_RADIUS: f32 = 10.0;

/// Throttle multiplier while dodging.
pub const DODGE_THROTTLE: f32 = 1.2;

/// Planar distance at which a dodge target counts as reached.
pub const DODGE_ARRIVAL_EPSILON: f32 = 0.1;

// --- Agent body ---

/// Agent planar movement speed (units per second at full throttle).
pub const AGENT_MOVE_SPEED: f32 = 15.0;

/// Agent collision radius.
pub const AGENT_RADIUS: f32 = 1.5;

/// Height of the agent origin above the floor.
pub const AGENT_HEIGHT: f32 = 0.5;

// --- Arena ---

/// Default maze width and depth in tiles.
pub const MAZE_TILES: usize = 9;

/// Edge length of one tile.
pub const TILE_SIZE: f32 = 20.0;

/// Wall height.
pub const WALL_HEIGHT: f32 = 4.0;

/// Wall thickness.
pub const WALL_THICKNESS: f32 = 1.2;

/// Base probability of knocking out an extra interior wall after carving.
pub const EXTRA_WALL_REMOVAL_CHANCE: f32 = 0.4;

/// Jitter applied to the extra-wall removal chance.
pub const EXTRA_WALL_REMOVAL_JITTER: f32 = 0.1;

/// Spawn points of the two slots on the default grid.
pub const SPAWN_POINTS: [[f32; 3]; 2] = [[-80.0, 0.0, 80.0], [80.0, 0.0, -80.0]];

// --- Match flow ---

/// Seconds between power-up spawns.
pub const POWERUP_SPAWN_INTERVAL: f32 = 15.0;

/// Height at which power-ups float.
pub const POWERUP_HEIGHT: f32 = 1.0;

/// Pickup radius for power-ups.
pub const POWERUP_PICKUP_RADIUS: f32 = 2.0;

/// Delay between a kill and map regeneration.
pub const RESPAWN_REGENERATE_DELAY: f32 = 1.0;

/// Delay between map regeneration and both agents reappearing.
pub const RESPAWN_PLACE_DELAY: f32 = 0.5;

/// Live projectile cap for the default weapon, per owner.
pub const DEFAULT_WEAPON_PROJECTILE_CAP: usize = 5;

/// Minigun stream duration (seconds).
pub const MINIGUN_STREAM_DURATION: f32 = 1.0;
