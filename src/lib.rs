//! # Clock radio control core
//! Time keeping, alarm schedule and the ring/snooze/dismiss state machine of a radio-alarm appliance.
//!
//! The core is hardware free. A board-support binary implements [`tuner::Tuner`], [`input::Panel`] and
//! [`display::FrameSink`], feeds network requests into a [`queue::CommandQueue`] and drives
//! [`orchestrate::run`] from its executor. Everything the core owns lives in one
//! [`orchestrate::Orchestrator`]; there is no global mutable state.
//!
//! Logging goes through `defmt` (feature `defmt`, on target) or `log` (feature `log`, default).
// we are in an environment with constrained resources, so we do not use the standard library outside of tests.
#![cfg_attr(not(test), no_std)]

// must come first, the logging macros are used by all other modules
#[macro_use]
mod fmt;

pub mod alarm_schedule;
pub mod clock;
pub mod command;
pub mod config;
pub mod display;
pub mod error;
pub mod input;
pub mod orchestrate;
pub mod queue;
pub mod ring_cycle;
pub mod rollover;
pub mod snapshot;
pub mod station;
pub mod time_of_day;
pub mod tuner;

#[cfg(test)]
mod testing;

pub use crate::command::{Command, Origin, Request, StepDirection};
pub use crate::config::Config;
pub use crate::error::{Error, HardwareOp};
pub use crate::orchestrate::{Orchestrator, TickInputs};
pub use crate::snapshot::StatusSnapshot;
pub use crate::station::Station;
pub use crate::time_of_day::TimeOfDay;
