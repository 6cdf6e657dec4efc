// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-run bookkeeping and the reports a run leaves behind

use phasor_core::UnitId;
use std::collections::HashMap;
use std::time::Duration;
use tokio::time::Instant;

/// Scheduler lifecycle: `Idle → Running(phase) → Completed | Aborted`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Idle,
    Running { phase_index: usize },
    Completed,
    Aborted,
}

impl RunStatus {
    pub fn is_running(&self) -> bool {
        matches!(self, RunStatus::Running { .. })
    }
}

/// State owned by exactly one run
#[derive(Debug, Clone)]
pub struct RunState {
    pub current_phase_index: usize,
    /// Distinct units that loaded, in completion order
    pub loaded_units: Vec<UnitId>,
    /// Distinct units that exhausted their retries, in completion order
    pub failed_units: Vec<UnitId>,
    /// Attempts started per unit during this run
    pub attempts: HashMap<UnitId, u32>,
    pub start_time: Instant,
    /// Successful unit slots so far; a unit listed in two phases counts twice
    loaded_slots: usize,
}

impl RunState {
    pub fn new(start_time: Instant) -> Self {
        Self {
            current_phase_index: 0,
            loaded_units: Vec::new(),
            failed_units: Vec::new(),
            attempts: HashMap::new(),
            start_time,
            loaded_slots: 0,
        }
    }

    /// Count a new attempt for `unit`, returning its 1-based attempt number
    pub fn record_attempt(&mut self, unit: &UnitId) -> u32 {
        let count = self.attempts.entry(unit.clone()).or_insert(0);
        *count += 1;
        *count
    }

    /// Record a successful unit slot; returns the progress count
    pub fn record_success(&mut self, unit: &UnitId) -> usize {
        if !self.loaded_units.contains(unit) {
            self.loaded_units.push(unit.clone());
        }
        self.loaded_slots += 1;
        self.loaded_slots
    }

    pub fn record_failure(&mut self, unit: &UnitId) {
        if !self.failed_units.contains(unit) {
            self.failed_units.push(unit.clone());
        }
    }

    pub fn is_loaded(&self, unit: &UnitId) -> bool {
        self.loaded_units.contains(unit)
    }

    pub fn attempts_for(&self, unit: &UnitId) -> u32 {
        self.attempts.get(unit).copied().unwrap_or(0)
    }

    pub fn loaded_slots(&self) -> usize {
        self.loaded_slots
    }
}

/// Outcome of one phase
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseReport {
    pub name: String,
    pub critical: bool,
    pub elapsed: Duration,
    pub succeeded: Vec<UnitId>,
    pub failed: Vec<UnitId>,
}

/// Summary of a finished run, completed or aborted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub status: RunStatus,
    pub total_time: Duration,
    pub loaded_units: Vec<UnitId>,
    pub failed_units: Vec<UnitId>,
    pub phases: Vec<PhaseReport>,
}

impl RunReport {
    pub fn is_complete(&self) -> bool {
        self.status == RunStatus::Completed
    }

    /// True when the page shell should offer a retry
    pub fn has_failures(&self) -> bool {
        !self.failed_units.is_empty() || self.status == RunStatus::Aborted
    }
}

#[cfg(test)]
#[path = "run_state_tests.rs"]
mod tests;
