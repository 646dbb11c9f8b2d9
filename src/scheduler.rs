//! Fixed-period tick scheduler.
//!
//! The control loop runs at `tick_period_ms`.  After each tick the main
//! loop asks how long to sleep so the next tick starts on the period
//! boundary.  A tick that overruns its period is counted and logged, and
//! the next one starts immediately.
//!
//! ```text
//!   started      now          next boundary
//!     │───work───│────sleep────│
//!     └────────── period ──────┘
//! ```
//!
//! Pure arithmetic over millisecond timestamps, so it is testable without
//! a clock.

use log::warn;

pub struct TickScheduler {
    period_ms: u64,
    overruns: u32,
}

impl TickScheduler {
    pub fn new(period_ms: u32) -> Self {
        Self {
            period_ms: u64::from(period_ms.max(1)),
            overruns: 0,
        }
    }

    /// Delay before the next tick, given when this tick started and the
    /// time now.
    pub fn next_delay(&mut self, started_ms: u64, now_ms: u64) -> u64 {
        let spent = now_ms.saturating_sub(started_ms);
        if spent > self.period_ms {
            self.overruns = self.overruns.saturating_add(1);
            warn!(
                "tick overrun: {}ms > {}ms period ({} total)",
                spent, self.period_ms, self.overruns
            );
            0
        } else {
            self.period_ms - spent
        }
    }

    /// Ticks that took longer than one period.
    pub fn overruns(&self) -> u32 {
        self.overruns
    }
}
