//! Shared mutable context threaded through every FSM handler.
//!
//! `RoachContext` is the single struct that state handlers read from and
//! write to: the latest sensor sample, classifier memory, the timer bank,
//! the velocity ramp, dead-reckoning and turn bookkeeping, configuration,
//! and the injected direction source.  Nothing lives in module statics.

use crate::collision::BumperPattern;
use crate::config::{Behavior, RoachConfig};
use crate::control::maneuver::{TurnDirection, TurnKind, TurnPlan};
use crate::control::odometry::Distance;
use crate::control::ramp::RampController;
use crate::light::{LightClassifier, LightLevels};
use crate::progress::{Progress, ProgressMonitor};
use crate::random::DirectionSource;
use crate::timers::{TimerId, Timers};

use super::StateId;

// ---------------------------------------------------------------------------
// Sensor sample (written once per tick by the service)
// ---------------------------------------------------------------------------

/// Raw peripheral reads for one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SensorSample {
    pub light: u16,
    pub left_bumper: bool,
    pub right_bumper: bool,
}

impl SensorSample {
    pub fn bumpers(&self) -> BumperPattern {
        BumperPattern::from_contacts(self.left_bumper, self.right_bumper)
    }
}

/// Sub-phase of the return leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnPhase {
    /// Reversing toward the recorded extremum.
    Backing,
    /// Ramping down to a stop before the post-return turn.
    Halting,
}

// ---------------------------------------------------------------------------
// RoachContext
// ---------------------------------------------------------------------------

/// The shared context passed to every state handler.
pub struct RoachContext {
    // -- Timing --
    /// Clock reading taken at the start of this tick (ms).
    pub now_ms: u64,

    // -- Sensing --
    pub sensors: SensorSample,
    pub light: LightLevels,
    pub classifier: LightClassifier,
    /// Classifier output for this tick.
    pub dark: bool,

    // -- Control --
    pub timers: Timers,
    pub drive: RampController,
    pub progress: ProgressMonitor,
    pub distance: Distance,
    pub return_phase: ReturnPhase,

    // -- Turn bookkeeping --
    /// Turn staged by a rule for `Turning` to execute on entry.
    pub pending_turn: TurnPlan,
    /// Direction of the most recent turn.
    pub last_turn: TurnDirection,
    /// Direction captured when a frontal hit started a reverse.
    pub recorded_turn: TurnDirection,

    // -- Configuration --
    pub config: RoachConfig,

    random: Box<dyn DirectionSource>,
}

impl RoachContext {
    pub fn new(config: RoachConfig, random: Box<dyn DirectionSource>) -> Self {
        Self {
            now_ms: 0,
            sensors: SensorSample::default(),
            light: LightLevels::default(),
            classifier: LightClassifier::new(config.dark_threshold, config.light_threshold),
            dark: true,
            timers: Timers::new(),
            drive: RampController::new(),
            progress: ProgressMonitor::new(config.light_goal, config.progress_margin),
            distance: Distance::default(),
            return_phase: ReturnPhase::Backing,
            pending_turn: TurnPlan::new(TurnKind::Standard, TurnDirection::Left),
            last_turn: TurnDirection::Left,
            recorded_turn: TurnDirection::Left,
            config,
            random,
        }
    }

    /// Take in a fresh sample and run the classifier.  Called exactly once
    /// per tick, before any state logic.
    pub fn observe(&mut self, sample: SensorSample) {
        self.sensors = sample;
        self.light.update(sample.light);
        self.dark = self.classifier.is_dark(sample.light);
    }

    pub fn bumpers(&self) -> BumperPattern {
        self.sensors.bumpers()
    }

    pub fn timer_expired(&self, id: TimerId) -> bool {
        self.timers.is_expired(id, self.now_ms)
    }

    /// Progress of the current reading against the cruise reference.
    pub fn progress_verdict(&self) -> Progress {
        self.progress.evaluate(
            self.light.current,
            self.light.reference,
            self.timer_expired(TimerId::Boredom),
        )
    }

    /// Flip the injected coin.
    pub fn random_direction(&mut self) -> TurnDirection {
        TurnDirection::from_coin(self.random.next_bool(self.now_ms))
    }

    /// State the roach cruises in under the configured behaviour.
    pub fn cruise_state(&self) -> StateId {
        match self.config.behavior {
            Behavior::Roam => StateId::Running,
            Behavior::Seek => StateId::Searching,
        }
    }
}
