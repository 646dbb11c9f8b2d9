//! Line-oriented diagnostic output.
//!
//! [`DiagnosticEventSink`] renders each [`AppEvent`] as one short text
//! line into a fixed `heapless::String` and hands it to a
//! [`DiagnosticPort`].  No heap is touched on this path, so the same sink
//! works over a blocking serial transmitter.  Lines that do not fit are
//! truncated.
//!
//! Format (one line per event):
//!
//! ```text
//!   S Resting
//!   T Running->Turning bored
//!   B Left
//!   R Running L=612 W=10,10
//! ```

use core::fmt::Write as _;
use std::io::Write as _;

use heapless::String;

use crate::app::events::AppEvent;
use crate::app::ports::{DiagnosticPort, EventSink};

/// Longest rendered line.
pub const LINE_CAPACITY: usize = 128;

/// Event sink that writes compact text lines to a [`DiagnosticPort`].
pub struct DiagnosticEventSink<D: DiagnosticPort> {
    port: D,
}

impl<D: DiagnosticPort> DiagnosticEventSink<D> {
    pub fn new(port: D) -> Self {
        Self { port }
    }

    pub fn into_inner(self) -> D {
        self.port
    }
}

/// Render an event as a single diagnostic line.
pub fn render(event: &AppEvent) -> String<LINE_CAPACITY> {
    let mut line = String::new();
    // Overflow leaves the prefix that fit.
    let _ = match event {
        AppEvent::Started(state) => write!(line, "S {}", state),
        AppEvent::StateChanged { from, to, rule } => write!(line, "T {}->{} {}", from, to, rule),
        AppEvent::Collision(pattern) => write!(line, "B {:?}", pattern),
        AppEvent::Telemetry(t) => write!(
            line,
            "R {} L={} W={},{}",
            t.state, t.light, t.left_speed, t.right_speed
        ),
    };
    line
}

impl<D: DiagnosticPort> EventSink for DiagnosticEventSink<D> {
    fn emit(&mut self, event: &AppEvent) {
        let line = render(event);
        self.port.emit_diagnostic(line.as_str());
    }
}

// ── Stdout port ───────────────────────────────────────────────

/// Blocking diagnostic port over the process's stdout.
#[derive(Default)]
pub struct StdoutDiagnostics;

impl DiagnosticPort for StdoutDiagnostics {
    fn emit_diagnostic(&mut self, line: &str) {
        let mut out = std::io::stdout().lock();
        if writeln!(out, "{line}").is_err() {
            log::warn!("diagnostic line dropped");
        }
    }
}
