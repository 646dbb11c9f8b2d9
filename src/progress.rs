//! Progress monitor: is the roach getting anywhere?
//!
//! Compares the current reading with the reference captured when the
//! cruise phase began.  Gain is signed toward the configured
//! [`LightGoal`]; a loss beyond the margin forces an immediate emphatic
//! turn, and a boredom expiry without a gain beyond the margin forces a
//! standard one.

use crate::config::LightGoal;

/// Verdict for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    /// Moving the wrong way by more than the margin.
    Regressing,
    /// Boredom expired and nothing gained beyond the margin.
    Stagnant,
    /// Keep going.
    Advancing,
}

#[derive(Debug, Clone, Copy)]
pub struct ProgressMonitor {
    goal: LightGoal,
    margin: u16,
}

impl ProgressMonitor {
    pub fn new(goal: LightGoal, margin: u16) -> Self {
        Self { goal, margin }
    }

    /// Signed improvement of `current` over `baseline` toward the goal.
    pub fn gain(&self, current: u16, baseline: u16) -> i32 {
        let delta = i32::from(current) - i32::from(baseline);
        match self.goal {
            LightGoal::Brighter => delta,
            LightGoal::Darker => -delta,
        }
    }

    pub fn evaluate(&self, current: u16, reference: u16, boredom_expired: bool) -> Progress {
        let gain = self.gain(current, reference);
        let margin = i32::from(self.margin);
        if gain < -margin {
            Progress::Regressing
        } else if boredom_expired && gain <= margin {
            Progress::Stagnant
        } else {
            Progress::Advancing
        }
    }

    /// `candidate` beats `best` by more than `threshold`.
    pub fn improves_on(&self, candidate: u16, best: u16, threshold: u16) -> bool {
        self.gain(candidate, best) > i32::from(threshold)
    }
}
