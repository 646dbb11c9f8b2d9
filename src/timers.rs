//! Software countdown timers.
//!
//! A fixed set of independently identified timers checked against the
//! monotonic millisecond clock.  Arming records an absolute deadline;
//! querying compares `now` against it.  Nothing re-arms itself and there is
//! no default duration: whoever depends on a dwell arms it on entry.
//! Periodic timers use [`Timers::rearm`], which advances from the expired
//! deadline so the period does not stretch to the next tick boundary.
//!
//! ```text
//!   arm(Dwell, now=1000, 250)   deadline = 1250
//!   is_expired(Dwell, 1249)     false
//!   is_expired(Dwell, 1250)     true   (and every later query until re-armed)
//!
//!   rearm(Ramp, now=1260, 15)   deadline 1250 -> 1265
//!   rearm(Ramp, now=1300, 15)   deadline 1265 -> 1280 is past, resync to 1315
//! ```

/// Identity of each timer slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TimerId {
    /// Progress check while cruising.
    Boredom = 0,
    /// Bound dwell of the current maneuver.
    Dwell = 1,
    /// Velocity ramp step pacing.
    Ramp = 2,
    /// Telemetry report pacing.
    Report = 3,
}

impl TimerId {
    pub const COUNT: usize = 4;
}

/// The timer bank.  `None` means never armed (or disarmed).
#[derive(Debug, Clone, Default)]
pub struct Timers {
    deadlines: [Option<u64>; TimerId::COUNT],
}

impl Timers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm `id` to expire `duration_ms` after `now_ms`.  Re-arming replaces
    /// the previous deadline.
    pub fn arm(&mut self, id: TimerId, now_ms: u64, duration_ms: u32) {
        self.deadlines[id as usize] = Some(now_ms.saturating_add(u64::from(duration_ms)));
    }

    /// Advance a periodic timer by one `period_ms` from its last deadline.
    ///
    /// If that deadline is already past, the missed periods are dropped and
    /// the timer restarts from `now_ms`.  Returns `false` in that case.  An
    /// unarmed timer is armed from `now_ms`.
    pub fn rearm(&mut self, id: TimerId, now_ms: u64, period_ms: u32) -> bool {
        let slot = &mut self.deadlines[id as usize];
        let period = u64::from(period_ms);
        let next = slot.unwrap_or(now_ms).saturating_add(period);
        if next > now_ms {
            *slot = Some(next);
            true
        } else {
            *slot = Some(now_ms.saturating_add(period));
            false
        }
    }

    /// Forget `id`; it reports not-expired until armed again.
    pub fn disarm(&mut self, id: TimerId) {
        self.deadlines[id as usize] = None;
    }

    /// `true` once `now_ms` has reached the deadline.  Unarmed timers never
    /// expire.
    pub fn is_expired(&self, id: TimerId, now_ms: u64) -> bool {
        self.deadlines[id as usize].is_some_and(|deadline| now_ms >= deadline)
    }

    pub fn is_armed(&self, id: TimerId) -> bool {
        self.deadlines[id as usize].is_some()
    }
}
