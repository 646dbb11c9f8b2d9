//! Hardware adapter: bridges `embedded-hal` peripherals to the port traits.
//!
//! | Peripheral       | HAL trait                 | Port              |
//! |------------------|---------------------------|-------------------|
//! | bumper switches  | `digital::InputPin`       | `BumperPort`      |
//! | wheel H-bridges  | `pwm::SetDutyCycle` + dir | `DrivePort`       |
//! | light sensor ADC | injected read function    | `LightSensorPort` |
//!
//! `embedded-hal` 1.0 has no ADC trait, so the light reading is supplied
//! as a closure over whatever ADC driver the board uses.
//!
//! Ports are infallible; a peripheral error is logged and the tick goes on
//! with a released bumper or an unchanged wheel.

use embedded_hal::digital::{InputPin, OutputPin};
use embedded_hal::pwm::SetDutyCycle;
use log::warn;

use crate::app::ports::{BumperPort, DrivePort, LightSensorPort};
use crate::control::{MAX_WHEEL_SPEED, Side, clamp_speed};

// ── Bumpers ───────────────────────────────────────────────────

/// A bumper microswitch on a digital input.
pub struct Bumper<P> {
    pin: P,
    /// Pressed pulls the line low.
    active_low: bool,
}

impl<P: InputPin> Bumper<P> {
    pub fn new(pin: P, active_low: bool) -> Self {
        Self { pin, active_low }
    }

    pub fn is_pressed(&mut self) -> bool {
        match self.pin.is_high() {
            Ok(high) => high != self.active_low,
            Err(e) => {
                warn!("bumper read failed: {:?}", e);
                false
            }
        }
    }
}

// ── Wheels ────────────────────────────────────────────────────

/// One wheel motor behind an H-bridge: PWM for magnitude, one pin for
/// direction (high = forward).
pub struct HBridgeWheel<P, D> {
    pwm: P,
    direction: D,
    speed: i8,
}

impl<P: SetDutyCycle, D: OutputPin> HBridgeWheel<P, D> {
    pub fn new(pwm: P, direction: D) -> Self {
        Self {
            pwm,
            direction,
            speed: 0,
        }
    }

    /// Duty percentage for a signed speed.
    pub fn duty_percent(speed: i8) -> u8 {
        let magnitude = u16::from(clamp_speed(speed).unsigned_abs());
        (magnitude * 100 / MAX_WHEEL_SPEED.unsigned_abs() as u16) as u8
    }

    pub fn apply(&mut self, speed: i8) {
        let speed = clamp_speed(speed);
        let dir = if speed >= 0 {
            self.direction.set_high()
        } else {
            self.direction.set_low()
        };
        if let Err(e) = dir {
            warn!("wheel direction write failed: {:?}", e);
            return;
        }
        if let Err(e) = self.pwm.set_duty_cycle_percent(Self::duty_percent(speed)) {
            warn!("wheel duty write failed: {:?}", e);
            return;
        }
        self.speed = speed;
    }

    /// Last speed successfully applied.
    pub fn speed(&self) -> i8 {
        self.speed
    }
}

// ── Combined adapter ──────────────────────────────────────────

/// Concrete adapter combining every peripheral behind the port traits.
pub struct HalHardware<A, B, P, D> {
    read_light: A,
    left_bumper: Bumper<B>,
    right_bumper: Bumper<B>,
    left_wheel: HBridgeWheel<P, D>,
    right_wheel: HBridgeWheel<P, D>,
}

impl<A, B, P, D> HalHardware<A, B, P, D>
where
    A: FnMut() -> u16,
    B: InputPin,
    P: SetDutyCycle,
    D: OutputPin,
{
    pub fn new(
        read_light: A,
        bumpers: (Bumper<B>, Bumper<B>),
        wheels: (HBridgeWheel<P, D>, HBridgeWheel<P, D>),
    ) -> Self {
        Self {
            read_light,
            left_bumper: bumpers.0,
            right_bumper: bumpers.1,
            left_wheel: wheels.0,
            right_wheel: wheels.1,
        }
    }

    pub fn wheel(&self, side: Side) -> &HBridgeWheel<P, D> {
        match side {
            Side::Left => &self.left_wheel,
            Side::Right => &self.right_wheel,
        }
    }
}

impl<A, B, P, D> LightSensorPort for HalHardware<A, B, P, D>
where
    A: FnMut() -> u16,
{
    fn read_light(&mut self) -> u16 {
        (self.read_light)()
    }
}

impl<A, B, P, D> BumperPort for HalHardware<A, B, P, D>
where
    B: InputPin,
{
    fn read_bumper(&mut self, side: Side) -> bool {
        match side {
            Side::Left => self.left_bumper.is_pressed(),
            Side::Right => self.right_bumper.is_pressed(),
        }
    }
}

impl<A, B, P, D> DrivePort for HalHardware<A, B, P, D>
where
    P: SetDutyCycle,
    D: OutputPin,
{
    fn set_wheel_speed(&mut self, side: Side, speed: i8) {
        match side {
            Side::Left => self.left_wheel.apply(speed),
            Side::Right => self.right_wheel.apply(speed),
        }
    }
}
