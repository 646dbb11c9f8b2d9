//! Bumper patterns and the maneuver each one calls for.
//!
//! | Pattern     | Reaction                                            |
//! |-------------|-----------------------------------------------------|
//! | left only   | evasive pivot to the right                          |
//! | right only  | evasive pivot to the left                           |
//! | both        | full reverse, then turn the way we last turned      |
//!
//! Bumpers are sampled fresh every tick; nothing latches past the tick.

use crate::control::maneuver::TurnDirection;

/// Front bumper contacts for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BumperPattern {
    Clear,
    Left,
    Right,
    Both,
}

impl BumperPattern {
    pub fn from_contacts(left: bool, right: bool) -> Self {
        match (left, right) {
            (false, false) => Self::Clear,
            (true, false) => Self::Left,
            (false, true) => Self::Right,
            (true, true) => Self::Both,
        }
    }

    pub fn is_contact(self) -> bool {
        self != Self::Clear
    }
}

/// Collision response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Maneuver {
    /// Pivot in the given direction.
    Evade(TurnDirection),
    /// Back straight off, then turn.
    Reverse,
}

/// Map a bumper pattern to its maneuver.  `None` when nothing is touched.
pub fn react(pattern: BumperPattern) -> Option<Maneuver> {
    match pattern {
        BumperPattern::Clear => None,
        BumperPattern::Left => Some(Maneuver::Evade(TurnDirection::Right)),
        BumperPattern::Right => Some(Maneuver::Evade(TurnDirection::Left)),
        BumperPattern::Both => Some(Maneuver::Reverse),
    }
}
