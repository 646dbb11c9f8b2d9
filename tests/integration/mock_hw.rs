//! Mock hardware, clock and event sink for integration tests.
//!
//! Records every wheel write so tests can assert on the full command
//! history without touching real GPIO/PWM registers.

use std::cell::Cell;

use roach::app::events::AppEvent;
use roach::app::ports::{BumperPort, ClockPort, DrivePort, EventSink, LightSensorPort};
use roach::app::service::RoachService;
use roach::config::RoachConfig;
use roach::control::Side;
use roach::fsm::{StateId, Transition};
use roach::random::DirectionSource;

// ── MockHardware ──────────────────────────────────────────────

#[derive(Default)]
pub struct MockHardware {
    pub light: u16,
    pub left_bumper: bool,
    pub right_bumper: bool,
    /// Every `set_wheel_speed` call, in order.
    pub writes: Vec<(Side, i8)>,
    /// Last commanded `(left, right)`.
    pub wheels: (i8, i8),
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bumpers(&mut self, left: bool, right: bool) {
        self.left_bumper = left;
        self.right_bumper = right;
    }

    pub fn wheel_history(&self, side: Side) -> Vec<i8> {
        self.writes
            .iter()
            .filter(|(s, _)| *s == side)
            .map(|(_, v)| *v)
            .collect()
    }
}

impl LightSensorPort for MockHardware {
    fn read_light(&mut self) -> u16 {
        self.light
    }
}

impl BumperPort for MockHardware {
    fn read_bumper(&mut self, side: Side) -> bool {
        match side {
            Side::Left => self.left_bumper,
            Side::Right => self.right_bumper,
        }
    }
}

impl DrivePort for MockHardware {
    fn set_wheel_speed(&mut self, side: Side, speed: i8) {
        self.writes.push((side, speed));
        match side {
            Side::Left => self.wheels.0 = speed,
            Side::Right => self.wheels.1 = speed,
        }
    }
}

// ── ManualClock ───────────────────────────────────────────────

#[derive(Default)]
pub struct ManualClock(Cell<u64>);

#[allow(dead_code)]
impl ManualClock {
    pub fn set(&self, ms: u64) {
        self.0.set(ms);
    }

    pub fn advance(&self, ms: u64) {
        self.0.set(self.0.get() + ms);
    }
}

impl ClockPort for ManualClock {
    fn now_ms(&self) -> u64 {
        self.0.get()
    }
}

// ── RecordingSink ─────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn transitions(&self) -> Vec<(StateId, StateId, &'static str)> {
        self.events
            .iter()
            .filter_map(|e| match e {
                AppEvent::StateChanged { from, to, rule } => Some((*from, *to, *rule)),
                _ => None,
            })
            .collect()
    }

    pub fn telemetry_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, AppEvent::Telemetry(_)))
            .count()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}

// ── Direction sources ─────────────────────────────────────────

/// Always answers the same way.
pub struct Fixed(pub bool);

impl DirectionSource for Fixed {
    fn next_bool(&mut self, _now_ms: u64) -> bool {
        self.0
    }
}

// ── Rig: service + mocks wired together ──────────────────────

pub struct Rig {
    pub app: RoachService,
    pub hw: MockHardware,
    pub clock: ManualClock,
    pub sink: RecordingSink,
}

#[allow(dead_code)]
impl Rig {
    /// Started service at t=0, light off, coin always `true` (left).
    pub fn new(config: RoachConfig) -> Self {
        Self::with_random(config, Box::new(Fixed(true)))
    }

    pub fn with_random(config: RoachConfig, random: Box<dyn DirectionSource>) -> Self {
        let mut app = RoachService::new(config, random);
        let mut hw = MockHardware::new();
        let clock = ManualClock::default();
        let mut sink = RecordingSink::default();
        app.start(&mut hw, &clock, &mut sink);
        Self {
            app,
            hw,
            clock,
            sink,
        }
    }

    pub fn now(&self) -> u64 {
        self.clock.now_ms()
    }

    /// Advance one tick period and run the service.
    pub fn tick(&mut self) -> Option<Transition> {
        let period = u64::from(self.app.config().tick_period_ms);
        self.clock.advance(period);
        self.app.tick(&mut self.hw, &self.clock, &mut self.sink)
    }

    /// Tick until the clock reads `t_ms`.
    pub fn run_until(&mut self, t_ms: u64) {
        while self.now() < t_ms {
            self.tick();
        }
    }

    /// Tick until the state differs from the current one, at most `max` ticks.
    pub fn tick_until_change(&mut self, max: usize) -> Option<Transition> {
        for _ in 0..max {
            if let Some(t) = self.tick() {
                return Some(t);
            }
        }
        None
    }

    pub fn state(&self) -> StateId {
        self.app.state()
    }
}
