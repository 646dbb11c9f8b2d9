//! Application core: pure behaviour logic, zero I/O.
//!
//! Orchestrates the per-tick pipeline (sample, classify, decide, ramp,
//! write, report).  All interaction with hardware happens through the
//! **port traits** in [`ports`], keeping this layer fully testable
//! without real peripherals.

pub mod events;
pub mod ports;
pub mod service;
