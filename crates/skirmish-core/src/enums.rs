//! Enumerations shared across the workspace.

use serde::{Deserialize, Serialize};

/// Weapons an agent can hold. Everything but `Default` is a single-use power-up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeaponKind {
    #[default]
    Default,
    Minigun,
    Shotgun,
    Sniper,
}

impl WeaponKind {
    /// Weapons that can be granted by a power-up pickup.
    pub const POWERUPS: [WeaponKind; 3] = [WeaponKind::Minigun, WeaponKind::Shotgun, WeaponKind::Sniper];

    pub fn is_powerup(self) -> bool {
        self != WeaponKind::Default
    }
}

/// High-level behavior the controller has chosen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Intent {
    #[default]
    Idle,
    /// Opponent visible: stand still and track it.
    Hold,
    /// Route toward the opponent.
    Pursue,
    /// Detour to collect a power-up.
    Loot,
    /// Evade an incoming projectile.
    Dodge,
    /// Reverse out of a stuck position.
    Recover,
}

/// Categories of live world entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityCategory {
    Agent,
    Projectile,
    Powerup,
}

/// Match flow phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchPhase {
    #[default]
    Lobby,
    Active,
    Paused,
}
