//! Host clock adapter.
//!
//! Wraps `std::time::Instant` so the domain only ever sees monotonic
//! milliseconds since the adapter was created.

use std::time::Instant;

use crate::app::ports::ClockPort;

pub struct StdClock {
    start: Instant,
}

impl Default for StdClock {
    fn default() -> Self {
        Self::new()
    }
}

impl StdClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl ClockPort for StdClock {
    fn now_ms(&self) -> u64 {
        u64::try_from(self.start.elapsed().as_millis()).unwrap_or(u64::MAX)
    }
}
