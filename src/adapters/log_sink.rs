//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! whatever `log` backend the binary installed.

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`].
#[derive(Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Telemetry(t) => {
                info!(
                    "TELEM | state={} | light={} ref={} dark={} | bumpers={:?} | \
                     wheels={}/{} -> {}/{} | dist={}",
                    t.state,
                    t.light,
                    t.reference,
                    t.dark,
                    t.bumpers,
                    t.left_speed,
                    t.right_speed,
                    t.left_target,
                    t.right_target,
                    t.distance,
                );
            }
            AppEvent::StateChanged { from, to, rule } => {
                info!("STATE | {} -> {} [{}]", from, to, rule);
            }
            AppEvent::Collision(pattern) => {
                warn!("BUMP  | {:?}", pattern);
            }
            AppEvent::Started(state) => {
                info!("START | initial_state={}", state);
            }
        }
    }
}
