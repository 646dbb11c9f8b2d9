//! Turn maneuvers: wheel speeds, dwell and ramping for each turn kind.

use crate::config::RoachConfig;

/// Direction the robot's heading rotates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnDirection {
    Left,
    Right,
}

impl TurnDirection {
    /// Map a coin flip to a direction.
    pub fn from_coin(coin: bool) -> Self {
        if coin { Self::Left } else { Self::Right }
    }
}

/// Why a turn is happening; selects speeds and dwell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnKind {
    /// Boredom turn: pivot on one stopped wheel.
    Standard,
    /// Light is getting worse: spin in place for longer.
    Emphatic,
    /// Single bumper hit: pivot hard away from the obstacle.
    Evasive,
    /// After a frontal reverse, in the direction recorded at the hit.
    Recovery,
}

/// A fully specified turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnPlan {
    pub kind: TurnKind,
    pub direction: TurnDirection,
}

impl TurnPlan {
    pub fn new(kind: TurnKind, direction: TurnDirection) -> Self {
        Self { kind, direction }
    }

    /// `(left, right)` wheel speeds.
    pub fn wheel_speeds(&self, config: &RoachConfig) -> (i8, i8) {
        let cruise = config.cruise_speed;
        // Speeds for a left turn; a right turn swaps the wheels.
        let (inner, outer) = match self.kind {
            TurnKind::Standard => (0, cruise),
            TurnKind::Emphatic => (-cruise, cruise),
            TurnKind::Evasive | TurnKind::Recovery => (-config.reverse_speed, config.evade_speed),
        };
        match self.direction {
            TurnDirection::Left => (inner, outer),
            TurnDirection::Right => (outer, inner),
        }
    }

    pub fn dwell_ms(&self, config: &RoachConfig) -> u32 {
        match self.kind {
            TurnKind::Standard => config.standard_turn_ms,
            TurnKind::Emphatic => config.emphatic_turn_ms,
            TurnKind::Evasive | TurnKind::Recovery => config.evasive_turn_ms,
        }
    }

    /// Collision turns skip the ramp.
    pub fn is_immediate(&self) -> bool {
        matches!(self.kind, TurnKind::Evasive | TurnKind::Recovery)
    }
}
