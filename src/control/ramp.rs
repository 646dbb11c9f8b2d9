//! Velocity ramp controller.
//!
//! Holds a current and a target speed per wheel.  Each ramp tick moves
//! `current` one unit toward `target`, so a commanded change of `n` units
//! lands in exactly `n` ramp ticks without overshoot.  Collision maneuvers
//! use [`RampController::set_immediate`] to skip the ramp entirely.

use super::{Side, clamp_speed};

/// Current/target pair for one wheel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WheelVelocity {
    pub current: i8,
    pub target: i8,
}

impl WheelVelocity {
    fn step(&mut self) {
        if self.target > self.current {
            self.current += 1;
        } else if self.target < self.current {
            self.current -= 1;
        }
    }

    pub fn at_target(&self) -> bool {
        self.current == self.target
    }
}

/// Two-wheel velocity ramp.
#[derive(Debug, Clone, Default)]
pub struct RampController {
    left: WheelVelocity,
    right: WheelVelocity,
    /// An immediate set happened; actuators must be written this tick.
    write_pending: bool,
}

impl RampController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set new targets, reached one unit per ramp tick.
    pub fn set_targets(&mut self, left: i8, right: i8) {
        self.left.target = clamp_speed(left);
        self.right.target = clamp_speed(right);
    }

    /// Jump straight to the given speeds.
    pub fn set_immediate(&mut self, left: i8, right: i8) {
        self.set_targets(left, right);
        self.left.current = self.left.target;
        self.right.current = self.right.target;
        self.write_pending = true;
    }

    /// Advance both wheels by one ramp tick.
    pub fn step(&mut self) {
        self.left.step();
        self.right.step();
    }

    /// Both wheels have reached their targets.
    pub fn at_target(&self) -> bool {
        self.left.at_target() && self.right.at_target()
    }

    /// Returns `true` once after an immediate set.
    pub fn take_write_pending(&mut self) -> bool {
        core::mem::take(&mut self.write_pending)
    }

    pub fn wheel(&self, side: Side) -> WheelVelocity {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    /// `(left, right)` current speeds.
    pub fn current(&self) -> (i8, i8) {
        (self.left.current, self.right.current)
    }

    /// `(left, right)` target speeds.
    pub fn targets(&self) -> (i8, i8) {
        (self.left.target, self.right.target)
    }
}
