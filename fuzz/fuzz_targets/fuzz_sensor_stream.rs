//! Fuzz target: `RoachService::tick` under arbitrary sensor streams
//!
//! Every 4 input bytes form one tick: light (2 bytes LE, masked to 10
//! bits), bumper bits, and milliseconds since the previous tick.  The
//! first byte picks the behaviour profile.
//!
//! Invariants checked:
//! - No panics under any byte sequence
//! - Every wheel write is within `±MAX_WHEEL_SPEED`
//! - Writes always arrive as left/right pairs
//!
//! cargo fuzz run fuzz_sensor_stream

#![no_main]

use std::cell::Cell;

use libfuzzer_sys::fuzz_target;
use roach::app::events::AppEvent;
use roach::app::ports::{BumperPort, ClockPort, DrivePort, EventSink, LightSensorPort};
use roach::app::service::RoachService;
use roach::config::{Behavior, RoachConfig};
use roach::control::{MAX_WHEEL_SPEED, Side};
use roach::random::ClockResidue;

#[derive(Default)]
struct Hw {
    light: u16,
    bumpers: u8,
    writes: usize,
}

impl LightSensorPort for Hw {
    fn read_light(&mut self) -> u16 {
        self.light
    }
}

impl BumperPort for Hw {
    fn read_bumper(&mut self, side: Side) -> bool {
        match side {
            Side::Left => self.bumpers & 0b01 != 0,
            Side::Right => self.bumpers & 0b10 != 0,
        }
    }
}

impl DrivePort for Hw {
    fn set_wheel_speed(&mut self, _side: Side, speed: i8) {
        assert!(speed.abs() <= MAX_WHEEL_SPEED, "speed {speed} out of range");
        self.writes += 1;
    }
}

struct Clock(Cell<u64>);

impl ClockPort for Clock {
    fn now_ms(&self) -> u64 {
        self.0.get()
    }
}

struct Discard;

impl EventSink for Discard {
    fn emit(&mut self, _event: &AppEvent) {}
}

fuzz_target!(|data: &[u8]| {
    let Some((&profile, rest)) = data.split_first() else {
        return;
    };
    let config = RoachConfig {
        behavior: if profile & 1 == 0 { Behavior::Roam } else { Behavior::Seek },
        ..RoachConfig::default()
    };

    let mut app = RoachService::new(config, Box::new(ClockResidue));
    let mut hw = Hw::default();
    let clock = Clock(Cell::new(0));
    app.start(&mut hw, &clock, &mut Discard);

    for chunk in rest.chunks_exact(4) {
        hw.light = u16::from_le_bytes([chunk[0], chunk[1]]) & 0x3FF;
        hw.bumpers = chunk[2];
        clock.0.set(clock.0.get() + u64::from(chunk[3]));
        app.tick(&mut hw, &clock, &mut Discard);
    }

    assert_eq!(hw.writes % 2, 0, "unpaired wheel write");
});
