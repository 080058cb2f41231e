//! Target selection, evaluated on each refresh.

use glam::Vec3;

use skirmish_core::enums::Intent;
use skirmish_core::types::EntityId;

use crate::config::ControllerConfig;

/// Inputs gathered by perception for one refresh.
#[derive(Debug, Clone, Copy, Default)]
pub struct SelectionInput {
    pub visible: bool,
    /// Agent already carries a power-up weapon.
    pub holds_powerup: bool,
    /// Opponent position and distance, if one is known.
    pub opponent: Option<(Vec3, f32)>,
    pub powerup: Option<(EntityId, Vec3)>,
}

/// Outcome of target selection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TargetDecision {
    /// Detour to collect a power-up.
    Loot { powerup: EntityId, goal: Vec3 },
    /// Route toward the opponent.
    Pursue { goal: Vec3 },
    /// Opponent visible: stay put and track it.
    Hold,
    /// No opponent known.
    Idle,
}

impl TargetDecision {
    pub fn intent(&self) -> Intent {
        match self {
            TargetDecision::Loot { .. } => Intent::Loot,
            TargetDecision::Pursue { .. } => Intent::Pursue,
            TargetDecision::Hold => Intent::Hold,
            TargetDecision::Idle => Intent::Idle,
        }
    }
}

/// Priority order: safe loot, then pursuit without sight, then hold.
///
/// Loot is only considered while the agent holds no power-up and the
/// opponent is at least the safety distance away. Without a known opponent
/// the agent stays idle until a later refresh finds one.
pub fn select_target(input: &SelectionInput, config: &ControllerConfig) -> TargetDecision {
    let Some((position, distance)) = input.opponent else {
        return TargetDecision::Idle;
    };

    if !input.holds_powerup && distance >= config.safety_distance {
        if let Some((powerup, goal)) = input.powerup {
            return TargetDecision::Loot { powerup, goal };
        }
    }

    if input.visible {
        TargetDecision::Hold
    } else {
        TargetDecision::Pursue { goal: position }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> SelectionInput {
        SelectionInput {
            visible: false,
            holds_powerup: false,
            opponent: Some((Vec3::new(50.0, 0.0, 0.0), 50.0)),
            powerup: None,
        }
    }

    #[test]
    fn test_pursue_without_sight() {
        let decision = select_target(&base(), &ControllerConfig::default());
        assert_eq!(decision, TargetDecision::Pursue { goal: Vec3::new(50.0, 0.0, 0.0) });
    }

    #[test]
    fn test_hold_with_sight() {
        let input = SelectionInput { visible: true, ..base() };
        assert_eq!(select_target(&input, &ControllerConfig::default()), TargetDecision::Hold);
    }

    #[test]
    fn test_loot_preferred_when_safe() {
        let goal = Vec3::new(0.0, 1.0, 10.0);
        let input = SelectionInput {
            visible: true,
            powerup: Some((EntityId(9), goal)),
            ..base()
        };
        assert_eq!(
            select_target(&input, &ControllerConfig::default()),
            TargetDecision::Loot { powerup: EntityId(9), goal }
        );
    }

    #[test]
    fn test_no_loot_when_opponent_close() {
        let input = SelectionInput {
            opponent: Some((Vec3::new(10.0, 0.0, 0.0), 10.0)),
            powerup: Some((EntityId(9), Vec3::Z)),
            ..base()
        };
        assert!(matches!(
            select_target(&input, &ControllerConfig::default()),
            TargetDecision::Pursue { .. }
        ));
    }

    #[test]
    fn test_no_loot_when_already_armed() {
        let input = SelectionInput {
            holds_powerup: true,
            powerup: Some((EntityId(9), Vec3::Z)),
            ..base()
        };
        assert!(matches!(
            select_target(&input, &ControllerConfig::default()),
            TargetDecision::Pursue { .. }
        ));
    }

    #[test]
    fn test_idle_without_opponent() {
        let input = SelectionInput {
            opponent: None,
            powerup: Some((EntityId(9), Vec3::new(20.0, 1.0, 0.0))),
            ..base()
        };
        assert_eq!(select_target(&input, &ControllerConfig::default()), TargetDecision::Idle);
    }
}
