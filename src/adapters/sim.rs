//! Simulated arena for running the controller on a host.
//!
//! A square walled arena with one lamp.  The robot is a disc with
//! differential drive; its two front bumpers sit either side of the nose.
//!
//! ```text
//!   (0,size) ┌───────────────────────┐ (size,size)
//!            │                  *    │   * lamp
//!            │      ╭─╮              │
//!            │      │>│  heading 0   │
//!            │      ╰─╯  = +x        │
//!   (0,0)    └───────────────────────┘ (size,0)
//! ```
//!
//! Light falls off as `ambient + power / (1 + (d / falloff)²)`, clamped
//! to the 10-bit ADC range.  The body is clamped inside the walls; a
//! bumper reads pressed when its contact point is within reach of a wall.

use core::f32::consts::PI;

use crate::app::ports::{BumperPort, DrivePort, LightSensorPort};
use crate::control::Side;

/// Largest value the simulated ADC returns.
pub const ADC_MAX: u16 = 1023;

#[derive(Debug, Clone)]
pub struct SimConfig {
    pub arena_mm: f32,
    pub lamp_mm: (f32, f32),
    pub lamp_power: f32,
    pub ambient: f32,
    pub falloff_mm: f32,
    /// Ground speed per wheel speed unit, mm/s.
    pub mm_per_unit: f32,
    pub wheel_base_mm: f32,
    pub body_radius_mm: f32,
    /// Bumper contact points sit this far either side of the nose.
    pub bumper_angle_rad: f32,
    /// A bumper closes when its contact point is this near a wall.
    pub bumper_reach_mm: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            arena_mm: 2000.0,
            lamp_mm: (1600.0, 1600.0),
            lamp_power: 900.0,
            ambient: 200.0,
            falloff_mm: 800.0,
            mm_per_unit: 20.0,
            wheel_base_mm: 120.0,
            body_radius_mm: 80.0,
            bumper_angle_rad: PI / 5.0,
            bumper_reach_mm: 20.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub x: f32,
    pub y: f32,
    /// Radians, counter-clockwise from +x.
    pub heading: f32,
}

pub struct Simulator {
    config: SimConfig,
    pose: Pose,
    wheels: (i8, i8),
    lamp_on: bool,
    last_ms: Option<u64>,
}

impl Simulator {
    pub fn new(config: SimConfig, pose: Pose) -> Self {
        Self {
            config,
            pose,
            wheels: (0, 0),
            lamp_on: true,
            last_ms: None,
        }
    }

    /// Robot in the middle of a default arena, facing +x.
    pub fn centred() -> Self {
        let config = SimConfig::default();
        let mid = config.arena_mm / 2.0;
        Self::new(
            config,
            Pose {
                x: mid,
                y: mid,
                heading: 0.0,
            },
        )
    }

    pub fn pose(&self) -> Pose {
        self.pose
    }

    pub fn set_lamp(&mut self, on: bool) {
        self.lamp_on = on;
    }

    /// Integrate motion up to `now_ms`.  The first call only records the
    /// time.
    pub fn advance_to(&mut self, now_ms: u64) {
        let Some(last) = self.last_ms.replace(now_ms) else {
            return;
        };
        let dt = now_ms.saturating_sub(last) as f32 / 1000.0;
        let k = self.config.mm_per_unit;
        let vl = f32::from(self.wheels.0) * k;
        let vr = f32::from(self.wheels.1) * k;
        let v = (vl + vr) / 2.0;
        let omega = (vr - vl) / self.config.wheel_base_mm;

        let p = &mut self.pose;
        p.heading = (p.heading + omega * dt).rem_euclid(2.0 * PI);
        p.x += v * p.heading.cos() * dt;
        p.y += v * p.heading.sin() * dt;

        let lo = self.config.body_radius_mm;
        let hi = self.config.arena_mm - lo;
        p.x = p.x.clamp(lo, hi);
        p.y = p.y.clamp(lo, hi);
    }

    /// ADC reading at a point.
    pub fn light_at(&self, x: f32, y: f32) -> u16 {
        let c = &self.config;
        let mut level = c.ambient;
        if self.lamp_on {
            let (dx, dy) = (x - c.lamp_mm.0, y - c.lamp_mm.1);
            let d2 = (dx * dx + dy * dy) / (c.falloff_mm * c.falloff_mm);
            level += c.lamp_power / (1.0 + d2);
        }
        level.clamp(0.0, f32::from(ADC_MAX)) as u16
    }

    fn bumper_point(&self, side: Side) -> (f32, f32) {
        let offset = match side {
            Side::Left => self.config.bumper_angle_rad,
            Side::Right => -self.config.bumper_angle_rad,
        };
        let a = self.pose.heading + offset;
        let r = self.config.body_radius_mm;
        (self.pose.x + r * a.cos(), self.pose.y + r * a.sin())
    }

    fn touching_wall(&self, (x, y): (f32, f32)) -> bool {
        let reach = self.config.bumper_reach_mm;
        let far = self.config.arena_mm - reach;
        x <= reach || y <= reach || x >= far || y >= far
    }
}

impl LightSensorPort for Simulator {
    fn read_light(&mut self) -> u16 {
        self.light_at(self.pose.x, self.pose.y)
    }
}

impl BumperPort for Simulator {
    fn read_bumper(&mut self, side: Side) -> bool {
        self.touching_wall(self.bumper_point(side))
    }
}

impl DrivePort for Simulator {
    fn set_wheel_speed(&mut self, side: Side, speed: i8) {
        match side {
            Side::Left => self.wheels.0 = speed,
            Side::Right => self.wheels.1 = speed,
        }
    }
}
