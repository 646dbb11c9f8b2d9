//! Calibration parameters for the roach control core.
//!
//! Every threshold, margin, dwell and speed the behaviour uses lives here.
//! Values are fixed at start-up; the host binary may load a JSON override
//! before the controller is constructed, never afterwards.

use serde::{Deserialize, Serialize};

use crate::control::MAX_WHEEL_SPEED;
use crate::error::{ConfigError, Result};

/// Which way along the light scale counts as progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LightGoal {
    /// Higher readings are better.
    Brighter,
    /// Lower readings are better (hide in the dark).
    Darker,
}

/// Behaviour profile run while the robot is awake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Behavior {
    /// Run / turn / reverse on frontal hits.
    Roam,
    /// Search with extremum tracking, return to the best spot on contact.
    Seek,
}

/// Core calibration table.  Fields missing from a JSON override keep
/// their defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RoachConfig {
    // --- Behaviour ---
    pub behavior: Behavior,
    pub light_goal: LightGoal,

    // --- Light classifier ---
    /// Reading above which a resting roach wakes up.
    pub dark_threshold: u16,
    /// Reading at or below which a running roach goes back to rest.
    pub light_threshold: u16,

    // --- Progress monitor ---
    /// Light change (raw units) that counts as progress or regression.
    pub progress_margin: u16,
    /// Improvement over the current extremum needed to record a new one.
    pub search_margin: u16,
    /// Time without progress before a standard turn (ms).
    pub boredom_ms: u32,

    // --- Maneuver dwell times (ms) ---
    pub standard_turn_ms: u32,
    pub emphatic_turn_ms: u32,
    pub evasive_turn_ms: u32,
    pub reverse_ms: u32,
    /// Upper bound on the dead-reckoned return leg.
    pub return_timeout_ms: u32,

    // --- Wheel speeds (device units, 1..=MAX_WHEEL_SPEED) ---
    pub cruise_speed: i8,
    /// Outer wheel speed while pivoting away from an obstacle.
    pub evade_speed: i8,
    /// Magnitude used for full reverse.
    pub reverse_speed: i8,

    // --- Timing ---
    /// Fixed control loop period (ms).
    pub tick_period_ms: u32,
    /// Velocity ramp step period (ms).
    pub ramp_period_ms: u32,
    /// Telemetry report period (ms).
    pub report_period_ms: u32,

    // --- Direction source ---
    /// `Some(seed)` selects the seeded generator, `None` the clock residue.
    pub direction_seed: Option<u64>,
}

impl Default for RoachConfig {
    fn default() -> Self {
        Self {
            behavior: Behavior::Roam,
            light_goal: LightGoal::Brighter,

            dark_threshold: 500,
            light_threshold: 400,

            progress_margin: 50,
            search_margin: 2,
            boredom_ms: 3000,

            standard_turn_ms: 2000,
            emphatic_turn_ms: 3000,
            evasive_turn_ms: 1000,
            reverse_ms: 1500,
            return_timeout_ms: 5000,

            cruise_speed: MAX_WHEEL_SPEED,
            evade_speed: 5,
            reverse_speed: MAX_WHEEL_SPEED,

            tick_period_ms: 10,   // 100 Hz
            ramp_period_ms: 50,   // 20 Hz, 0 -> cruise in 0.5 s
            report_period_ms: 500,

            direction_seed: None,
        }
    }
}

impl RoachConfig {
    /// Check ranges and orderings.  Called once before the controller is
    /// built; a rejected table is never clamped into shape.
    pub fn validate(&self) -> Result<()> {
        if self.light_threshold >= self.dark_threshold {
            return Err(ConfigError::ThresholdOrder {
                light: self.light_threshold,
                dark: self.dark_threshold,
            });
        }

        for (field, value) in [
            ("boredom_ms", self.boredom_ms),
            ("standard_turn_ms", self.standard_turn_ms),
            ("emphatic_turn_ms", self.emphatic_turn_ms),
            ("evasive_turn_ms", self.evasive_turn_ms),
            ("reverse_ms", self.reverse_ms),
            ("return_timeout_ms", self.return_timeout_ms),
            ("tick_period_ms", self.tick_period_ms),
            ("ramp_period_ms", self.ramp_period_ms),
            ("report_period_ms", self.report_period_ms),
        ] {
            if value == 0 {
                return Err(ConfigError::ZeroDuration(field));
            }
        }

        for (field, value) in [
            ("cruise_speed", self.cruise_speed),
            ("evade_speed", self.evade_speed),
            ("reverse_speed", self.reverse_speed),
        ] {
            if !(1..=MAX_WHEEL_SPEED).contains(&value) {
                return Err(ConfigError::SpeedOutOfRange { field, value });
            }
        }

        if self.emphatic_turn_ms <= self.standard_turn_ms {
            return Err(ConfigError::DwellOrder(
                "emphatic turn must outlast the standard turn",
            ));
        }
        if self.reverse_ms <= self.evasive_turn_ms {
            return Err(ConfigError::DwellOrder(
                "frontal reverse must outlast the single-bumper evasive turn",
            ));
        }

        if self.ramp_period_ms < self.tick_period_ms {
            return Err(ConfigError::RampFasterThanTick {
                ramp_ms: self.ramp_period_ms,
                tick_ms: self.tick_period_ms,
            });
        }

        Ok(())
    }
}
