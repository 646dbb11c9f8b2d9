//! Roach reactive control core.
//!
//! Exposes the pure-logic modules for integration testing and for the
//! host binary.  Everything under [`app`], [`fsm`] and the leaf modules is
//! hardware-agnostic; [`adapters`] holds the concrete port implementations.

#![deny(unused_must_use)]

pub mod app;
pub mod collision;
pub mod config;
pub mod error;
pub mod fsm;
pub mod light;
pub mod progress;
pub mod random;
pub mod scheduler;
pub mod timers;

pub mod adapters;
pub mod control;
