//! Static weapon table.

use serde::{Deserialize, Serialize};

use crate::enums::WeaponKind;

/// Ballistic and cadence data for one weapon.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeaponProfile {
    /// Projectile speed (units per second).
    pub speed: f32,
    /// Projectile collision radius.
    pub radius: f32,
    /// Full spread cone (degrees).
    pub spread_deg: f32,
    pub lifetime_secs: f32,
    /// Shots per second while the trigger is held.
    pub fire_rate: f32,
    pub pellets_per_shot: u32,
    /// Shots in one burst before the long recovery.
    pub burst_size: u32,
}

/// Look up the profile of a weapon.
pub fn weapon_profile(kind: WeaponKind) -> WeaponProfile {
    match kind {
        WeaponKind::Default => WeaponProfile {
            speed: 50.0,
            radius: 1.0,
            spread_deg: 0.0,
            lifetime_secs: 10.0,
            fire_rate: 2.0,
            pellets_per_shot: 1,
            burst_size: 3,
        },
        WeaponKind::Minigun => WeaponProfile {
            speed: 60.0,
            radius: 0.3,
            spread_deg: 5.0,
            lifetime_secs: 5.0,
            fire_rate: 20.0,
            pellets_per_shot: 1,
            burst_size: 1,
        },
        WeaponKind::Shotgun => WeaponProfile {
            speed: 70.0,
            radius: 0.3,
            spread_deg: 10.0,
            lifetime_secs: 2.0,
            fire_rate: 1.0,
            pellets_per_shot: 12,
            burst_size: 1,
        },
        WeaponKind::Sniper => WeaponProfile {
            speed: 120.0,
            radius: 0.8,
            spread_deg: 0.0,
            lifetime_secs: 12.0,
            fire_rate: 0.5,
            pellets_per_shot: 1,
            burst_size: 1,
        },
    }
}
