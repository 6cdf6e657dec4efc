// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the phase scheduler

use phasor_core::{OptionsError, UnitId};
use thiserror::Error;

/// Errors that end (or refuse to start) a load run
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LoadError {
    #[error("a load run is already in progress")]
    AlreadyRunning,
    #[error("no phases defined; call define_phases before load")]
    NoPhases,
    #[error("critical phase {phase} aborted: unit {unit} failed: {message}")]
    PhaseAborted {
        phase: String,
        unit: UnitId,
        message: String,
    },
}

/// Errors from reconfiguring a scheduler
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SchedulerError {
    #[error("cannot {0} while a load run is in progress")]
    Running(&'static str),
    #[error("invalid options: {0}")]
    Options(#[from] OptionsError),
}
