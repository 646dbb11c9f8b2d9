//! Roach host runner: the control core driving a simulated arena.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  Simulator            StdClock     LogEventSink                │
//! │  (Light+Bumper+Drive) (ClockPort)  DiagnosticEventSink         │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │              RoachService (pure logic)                 │    │
//! │  │  classifier · FSM rules · timers · ramp                │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! │                                                                │
//! │  TickScheduler (fixed period)                                  │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Environment:
//!
//! | Variable            | Meaning                                      |
//! |---------------------|----------------------------------------------|
//! | `ROACH_CONFIG`      | path to a JSON calibration override          |
//! | `ROACH_LOG`         | log level (default `info`)                   |
//! | `ROACH_DIAG`        | set to also print compact diagnostic lines   |
//! | `ROACH_DURATION_MS` | stop after this long (default: run forever)  |
#![deny(unused_must_use)]

use std::env::VarError;
use std::time::Duration;

use anyhow::{Context, Result};
use log::{info, warn};

use roach::adapters::console::ConsoleLogger;
use roach::adapters::diagnostics::{DiagnosticEventSink, StdoutDiagnostics};
use roach::adapters::log_sink::LogEventSink;
use roach::adapters::sim::Simulator;
use roach::adapters::time::StdClock;
use roach::app::events::AppEvent;
use roach::app::ports::{ClockPort, EventSink};
use roach::app::service::RoachService;
use roach::config::RoachConfig;
use roach::random;
use roach::scheduler::TickScheduler;

// ── Event fan-out ─────────────────────────────────────────────

struct Sinks {
    log: LogEventSink,
    diag: Option<DiagnosticEventSink<StdoutDiagnostics>>,
}

impl EventSink for Sinks {
    fn emit(&mut self, event: &AppEvent) {
        self.log.emit(event);
        if let Some(diag) = self.diag.as_mut() {
            diag.emit(event);
        }
    }
}

// ── Config ────────────────────────────────────────────────────

/// Interpret an environment lookup: absent is `None`, badly encoded is an
/// error rather than a silent fallback.
fn env_value(name: &str, lookup: core::result::Result<String, VarError>) -> Result<Option<String>> {
    match lookup {
        Ok(value) => Ok(Some(value)),
        Err(VarError::NotPresent) => Ok(None),
        Err(VarError::NotUnicode(raw)) => {
            anyhow::bail!("{name} is not valid UTF-8: {}", raw.to_string_lossy())
        }
    }
}

fn load_config() -> Result<RoachConfig> {
    let config = match env_value("ROACH_CONFIG", std::env::var("ROACH_CONFIG"))? {
        Some(path) => {
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("reading config override {path}"))?;
            let config: RoachConfig =
                serde_json::from_str(&text).with_context(|| format!("parsing {path}"))?;
            info!("Config loaded from {}", path);
            config
        }
        None => {
            warn!("No ROACH_CONFIG, using default calibration");
            RoachConfig::default()
        }
    };
    config.validate().context("invalid configuration")?;
    Ok(config)
}

fn duration_limit() -> Result<Option<u64>> {
    env_value("ROACH_DURATION_MS", std::env::var("ROACH_DURATION_MS"))?
        .map(|v| v.parse().with_context(|| format!("ROACH_DURATION_MS={v}")))
        .transpose()
}

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    // ── 1. Logging ────────────────────────────────────────────
    ConsoleLogger::init(ConsoleLogger::level_from_env())
        .map_err(|e| anyhow::anyhow!("logger init failed: {e}"))?;

    info!("╔══════════════════════════════════════╗");
    info!("║  Roach v{}                        ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Configuration ──────────────────────────────────────
    let config = load_config()?;
    let limit = duration_limit()?;
    info!(
        "Behaviour {:?}, goal {:?}, tick {}ms, seed {:?}",
        config.behavior, config.light_goal, config.tick_period_ms, config.direction_seed
    );

    // ── 3. Adapters ───────────────────────────────────────────
    let clock = StdClock::new();
    let mut arena = Simulator::centred();
    let mut sinks = Sinks {
        log: LogEventSink::new(),
        diag: std::env::var_os("ROACH_DIAG").map(|_| DiagnosticEventSink::new(StdoutDiagnostics)),
    };

    // ── 4. Core ───────────────────────────────────────────────
    let mut scheduler = TickScheduler::new(config.tick_period_ms);
    let random = random::from_seed(config.direction_seed);
    let mut app = RoachService::new(config, random);
    arena.advance_to(clock.now_ms());
    app.start(&mut arena, &clock, &mut sinks);

    info!("System ready. Entering control loop.");

    // ── 5. Control loop ───────────────────────────────────────
    loop {
        let started = clock.now_ms();
        if limit.is_some_and(|l| started >= l) {
            break;
        }

        arena.advance_to(started);
        app.tick(&mut arena, &clock, &mut sinks);

        let delay = scheduler.next_delay(started, clock.now_ms());
        std::thread::sleep(Duration::from_millis(delay));
    }

    let pose = arena.pose();
    info!(
        "Stopped after {} ticks ({} overruns) in {} at ({:.0}, {:.0})",
        app.tick_count(),
        scheduler.overruns(),
        app.state(),
        pose.x,
        pose.y
    );
    Ok(())
}
