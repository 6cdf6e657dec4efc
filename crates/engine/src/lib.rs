// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Phasor phase scheduler

mod attempt;
mod error;
mod run_state;
mod scheduler;

pub use attempt::{AttemptError, UnitFailure};
pub use error::{LoadError, SchedulerError};
pub use run_state::{PhaseReport, RunReport, RunState, RunStatus};
pub use scheduler::PhaseScheduler;
