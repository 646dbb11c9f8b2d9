//! Light level bookkeeping and the hysteresis "is it dark?" classifier.
//!
//! The classifier is a Schmitt trigger over raw readings.  Two thresholds
//! open a dead band between them:
//!
//! ```text
//!   reading ▲
//!           │              ┌──────── not dark ─────────┐
//!   DARK  ──┼──────────────┼───────────────────────────┼────────
//!           │   dead band  │    (stays not dark)        │
//!   LIGHT ──┼──────────────┼───────────────────────────┼────────
//!           │              │                            └── dark
//! ```
//!
//! While dark the roach must climb above `dark_threshold` to wake; once
//! awake it has to fall to `light_threshold` or below to rest again.

/// Remembered-threshold hysteresis classifier.
#[derive(Debug, Clone)]
pub struct LightClassifier {
    dark_threshold: u16,
    light_threshold: u16,
    /// Threshold the next reading is compared against.
    threshold: u16,
}

impl LightClassifier {
    /// Start in the dark: the first reading must exceed `dark_threshold`.
    pub fn new(dark_threshold: u16, light_threshold: u16) -> Self {
        debug_assert!(light_threshold < dark_threshold);
        Self {
            dark_threshold,
            light_threshold,
            threshold: dark_threshold,
        }
    }

    /// Classify `reading` and remember the opposite threshold for next time.
    pub fn is_dark(&mut self, reading: u16) -> bool {
        if reading > self.threshold {
            self.threshold = self.light_threshold;
            false
        } else {
            self.threshold = self.dark_threshold;
            true
        }
    }

    pub fn threshold(&self) -> u16 {
        self.threshold
    }
}

/// Raw light readings retained across ticks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LightLevels {
    pub current: u16,
    pub previous: u16,
    /// Captured when a run/search phase begins.
    pub reference: u16,
    /// Best reading of the current search phase.
    pub extremum: u16,
}

impl LightLevels {
    /// Shift in a fresh sensor reading.
    pub fn update(&mut self, reading: u16) {
        self.previous = self.current;
        self.current = reading;
    }

    pub fn capture_reference(&mut self) {
        self.reference = self.current;
    }
}
