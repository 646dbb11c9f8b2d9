//! Error types for the roach control core.
//!
//! The control path itself has no recoverable errors: every port is
//! infallible and the state machine is total.  What can go wrong is a bad
//! calibration table handed in at start-up, so that is the only error
//! family defined here.  Variants are `Copy` so they can be passed around
//! without allocation.

use core::fmt;

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

/// A [`RoachConfig`](crate::config::RoachConfig) value failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// The light threshold must sit strictly below the dark threshold,
    /// otherwise the classifier has no dead band.
    ThresholdOrder { light: u16, dark: u16 },
    /// A period or dwell that gates a timer was zero.
    ZeroDuration(&'static str),
    /// A wheel speed is zero or beyond the actuator range.
    SpeedOutOfRange { field: &'static str, value: i8 },
    /// Two related durations are in the wrong order.
    DwellOrder(&'static str),
    /// The ramp would be stepped more often than the control loop runs.
    RampFasterThanTick { ramp_ms: u32, tick_ms: u32 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ThresholdOrder { light, dark } => write!(
                f,
                "light threshold {light} must be below dark threshold {dark}"
            ),
            Self::ZeroDuration(field) => write!(f, "{field} must be non-zero"),
            Self::SpeedOutOfRange { field, value } => {
                write!(f, "{field}={value} is outside 1..={}", crate::control::MAX_WHEEL_SPEED)
            }
            Self::DwellOrder(msg) => write!(f, "dwell order: {msg}"),
            Self::RampFasterThanTick { ramp_ms, tick_ms } => write!(
                f,
                "ramp period {ramp_ms}ms is shorter than tick period {tick_ms}ms"
            ),
        }
    }
}

impl core::error::Error for ConfigError {}

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, ConfigError>;
