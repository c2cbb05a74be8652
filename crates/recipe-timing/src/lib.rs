//! `recipe-timing` - Static timing tables and live countdowns for batch recipes.
//!
//! The dynamic half of the timing engine. A [`RecipeSession`] couples the
//! static analysis of one recipe with a [`TimerService`] that turns
//! controller telemetry into `(step_left, total_left)` countdown pairs,
//! filtered so the numbers shown to an operator never climb while the
//! controller is sitting in the same step and iteration.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]

/// Scheduling clocks for the poll loop.
pub mod clock;
/// Engine configuration loading.
pub mod config;
/// Engine errors.
pub mod error;
/// Test harness for driving the engine deterministically.
pub mod harness;
/// Timer metrics collection.
pub mod metrics;
/// Periodic telemetry polling.
pub mod poller;
/// Session tying static analysis to the live timer.
pub mod session;
/// Static timing aggregation.
pub mod table;
/// Live countdown computation.
pub mod timer;

pub use error::EngineError;
pub use session::RecipeSession;
pub use table::TimingTable;
pub use timer::{TimeRemaining, TimerService, TimerTick};
