//! Port traits: the hexagonal boundary between behaviour and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ RoachService (domain)
//! ```
//!
//! Driven adapters (light sensor, bumpers, drive, clock, event sinks)
//! implement these traits.  The [`RoachService`](super::service::RoachService)
//! consumes them via generics, so the core never touches hardware directly.

use crate::control::Side;

// ───────────────────────────────────────────────────────────────
// Sensor ports (driven adapters: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Ambient light sensor.  Larger readings mean brighter light.
pub trait LightSensorPort {
    fn read_light(&mut self) -> u16;
}

/// Front bumper switches.
pub trait BumperPort {
    /// `true` while the bumper on `side` is pressed.
    fn read_bumper(&mut self, side: Side) -> bool;
}

// ───────────────────────────────────────────────────────────────
// Drive port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Differential drive.
pub trait DrivePort {
    /// Command one wheel.  `speed` is already clamped to
    /// `-MAX_WHEEL_SPEED..=MAX_WHEEL_SPEED`; negative is reverse.
    fn set_wheel_speed(&mut self, side: Side, speed: i8);
}

// ───────────────────────────────────────────────────────────────
// Clock port
// ───────────────────────────────────────────────────────────────

/// Monotonic millisecond clock.
pub trait ClockPort {
    fn now_ms(&self) -> u64;
}

// ───────────────────────────────────────────────────────────────
// Event sink ports (driven adapters: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

/// Raw line-oriented diagnostic output (serial port, stdout).
/// Implementations may block until the line is accepted.
pub trait DiagnosticPort {
    fn emit_diagnostic(&mut self, line: &str);
}
