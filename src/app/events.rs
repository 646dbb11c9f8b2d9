//! Outbound application events.
//!
//! The [`RoachService`](super::service::RoachService) emits these through
//! the [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them.

use crate::collision::BumperPattern;
use crate::fsm::StateId;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// The service has started (carries initial state).
    Started(StateId),

    /// The FSM transitioned between states under the named rule.
    StateChanged {
        from: StateId,
        to: StateId,
        rule: &'static str,
    },

    /// A bumper contact triggered a maneuver.
    Collision(BumperPattern),

    /// Periodic telemetry snapshot.
    Telemetry(TelemetryData),
}

/// A point-in-time telemetry snapshot suitable for logging or transmission.
#[derive(Debug, Clone, PartialEq)]
pub struct TelemetryData {
    pub state: StateId,
    pub light: u16,
    pub reference: u16,
    pub dark: bool,
    pub bumpers: BumperPattern,
    pub left_speed: i8,
    pub right_speed: i8,
    pub left_target: i8,
    pub right_target: i8,
    pub distance: i64,
}
