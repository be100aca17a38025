//! Process-wide tracing/logging setup.
//!
//! Services log through `tracing` macros only; installing a subscriber is the
//! binary's (or test harness's) job.

pub mod tracing;

pub use crate::tracing::{init, init_for_tests};
