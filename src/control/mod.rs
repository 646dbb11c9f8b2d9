//! Motion control: velocity ramp, maneuver geometry, dead reckoning.

pub mod maneuver;
pub mod odometry;
pub mod ramp;

/// Largest wheel speed magnitude the drive accepts (device units).
pub const MAX_WHEEL_SPEED: i8 = 10;

/// Clamp a commanded speed into the actuator range.
pub fn clamp_speed(speed: i8) -> i8 {
    speed.clamp(-MAX_WHEEL_SPEED, MAX_WHEEL_SPEED)
}

/// A drive wheel, also used to name bumpers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Left, Side::Right];
}
