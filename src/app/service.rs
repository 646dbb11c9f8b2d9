//! Application service: the hexagonal core.
//!
//! [`RoachService`] owns the FSM and the shared context.  It exposes a
//! hardware-agnostic API; all I/O flows through port traits injected at
//! call sites, making the whole service testable with mock adapters.
//!
//! ```text
//!  LightSensorPort ──▶ ┌──────────────────────────┐ ──▶ EventSink
//!  BumperPort ───────▶ │       RoachService       │
//!  ClockPort ────────▶ │  classify · FSM · ramp   │
//!  DrivePort ◀──────── └──────────────────────────┘
//! ```

use log::{debug, info, warn};

use crate::config::RoachConfig;
use crate::control::Side;
use crate::fsm::context::{RoachContext, SensorSample};
use crate::fsm::states::{COLLISION_RULE, build_state_table};
use crate::fsm::{Fsm, StateId, Transition};
use crate::random::DirectionSource;
use crate::timers::TimerId;

use super::events::{AppEvent, TelemetryData};
use super::ports::{BumperPort, ClockPort, DrivePort, EventSink, LightSensorPort};

// ───────────────────────────────────────────────────────────────
// RoachService
// ───────────────────────────────────────────────────────────────

/// The application service orchestrates all behaviour logic.
pub struct RoachService {
    fsm: Fsm,
    ctx: RoachContext,
    tick_count: u64,
}

impl RoachService {
    /// Construct the service from a validated configuration.
    ///
    /// Does **not** start the FSM; call [`start`](Self::start) next.
    pub fn new(config: RoachConfig, random: Box<dyn DirectionSource>) -> Self {
        let ctx = RoachContext::new(config, random);
        let fsm = Fsm::new(build_state_table(), StateId::Resting);
        Self {
            fsm,
            ctx,
            tick_count: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Stop both wheels, enter `Resting` and start the periodic timers.
    pub fn start(&mut self, hw: &mut impl DrivePort, clock: &impl ClockPort, sink: &mut impl EventSink) {
        let now = clock.now_ms();
        self.ctx.now_ms = now;
        self.fsm.start(&mut self.ctx);
        self.ctx.drive.set_immediate(0, 0);
        self.ctx.drive.take_write_pending();
        write_wheels(&self.ctx, hw);

        self.ctx.timers.arm(TimerId::Ramp, now, self.ctx.config.ramp_period_ms);
        self.ctx.timers.arm(TimerId::Report, now, self.ctx.config.report_period_ms);

        sink.emit(&AppEvent::Started(self.fsm.current_state()));
        info!("RoachService started in {}", self.fsm.current_state());
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one full control cycle: sample → classify → FSM → ramp → write.
    ///
    /// `hw` satisfies every hardware port at once, which avoids a double
    /// mutable borrow while keeping the port boundary explicit.
    pub fn tick(
        &mut self,
        hw: &mut (impl LightSensorPort + BumperPort + DrivePort),
        clock: &impl ClockPort,
        sink: &mut impl EventSink,
    ) -> Option<Transition> {
        self.tick_count += 1;
        let now = clock.now_ms();
        self.ctx.now_ms = now;

        // 1. Sample every sensor exactly once
        let sample = SensorSample {
            light: hw.read_light(),
            left_bumper: hw.read_bumper(Side::Left),
            right_bumper: hw.read_bumper(Side::Right),
        };

        // 2. Classify (once per tick, hysteresis lives in the classifier)
        self.ctx.observe(sample);

        // 3. FSM tick (pure state logic)
        let transition = self.fsm.tick(&mut self.ctx);

        // 4. Ramp and actuator writes
        self.service_drive(hw);

        // 5. Events
        if let Some(t) = transition {
            if t.rule == COLLISION_RULE {
                sink.emit(&AppEvent::Collision(sample.bumpers()));
            }
            sink.emit(&AppEvent::StateChanged {
                from: t.from,
                to: t.to,
                rule: t.rule,
            });
        }

        if self.ctx.timer_expired(TimerId::Report) {
            sink.emit(&AppEvent::Telemetry(self.build_telemetry()));
            if !self.ctx.timers.rearm(TimerId::Report, now, self.ctx.config.report_period_ms) {
                debug!("report timer fell behind, resynchronised at {}ms", now);
            }
        }

        transition
    }

    // ── Queries ───────────────────────────────────────────────

    /// Build a telemetry snapshot from the current context.
    pub fn build_telemetry(&self) -> TelemetryData {
        let (left_speed, right_speed) = self.ctx.drive.current();
        let (left_target, right_target) = self.ctx.drive.targets();
        TelemetryData {
            state: self.fsm.current_state(),
            light: self.ctx.light.current,
            reference: self.ctx.light.reference,
            dark: self.ctx.dark,
            bumpers: self.ctx.bumpers(),
            left_speed,
            right_speed,
            left_target,
            right_target,
            distance: self.ctx.distance.value(),
        }
    }

    /// Current FSM state.
    pub fn state(&self) -> StateId {
        self.fsm.current_state()
    }

    /// Total control ticks executed since startup.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Read-only view of the shared context.
    pub fn context(&self) -> &RoachContext {
        &self.ctx
    }

    /// Live configuration.
    pub fn config(&self) -> &RoachConfig {
        &self.ctx.config
    }

    // ── Internal ──────────────────────────────────────────────

    /// Step the ramp on its own period and push speeds to the drive.
    ///
    /// Every ramp tick writes both wheels, changed or not, so the hardware
    /// never drifts from the commanded speed. An immediate set writes in
    /// the tick that requested it.
    fn service_drive(&mut self, hw: &mut impl DrivePort) {
        let now = self.ctx.now_ms;
        let mut write = self.ctx.drive.take_write_pending();

        if self.ctx.timer_expired(TimerId::Ramp) {
            self.ctx.drive.step();
            if !self.ctx.timers.rearm(TimerId::Ramp, now, self.ctx.config.ramp_period_ms) {
                warn!("ramp timer fell behind, resynchronised at {}ms", now);
            }
            write = true;
        }

        if write {
            debug!("drive: {:?}", self.ctx.drive.current());
            write_wheels(&self.ctx, hw);
        }
    }
}

/// Translate the ramp's current speeds into port calls.
fn write_wheels(ctx: &RoachContext, hw: &mut impl DrivePort) {
    for side in Side::BOTH {
        hw.set_wheel_speed(side, ctx.drive.wheel(side).current);
    }
}
