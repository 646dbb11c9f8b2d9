//! Dead-reckoned travel along the heading.
//!
//! Integrates the *commanded* wheel speeds once per control tick.  Each
//! tick adds `left + right` (twice the mean forward speed), which keeps the
//! arithmetic integral.  Turning in place contributes nothing, so the
//! figure approximates straight-line travel only; slip and ramp lag make
//! the error compound over a leg.

/// Signed distance accumulator in speed-ticks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Distance(i64);

impl Distance {
    pub fn reset(&mut self) {
        self.0 = 0;
    }

    /// Add one tick of travel at the given wheel speeds.
    pub fn integrate(&mut self, left: i8, right: i8) {
        self.0 = self.0.saturating_add(i64::from(left) + i64::from(right));
    }

    pub fn value(&self) -> i64 {
        self.0
    }

    /// Back at (or behind) the reference point.
    pub fn is_home(&self) -> bool {
        self.0 <= 0
    }
}
