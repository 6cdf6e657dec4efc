// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake unit loader for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{UnitLoadError, UnitLoader};
use async_trait::async_trait;
use phasor_core::UnitId;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Recorded loader call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnitCall {
    Started { unit: UnitId },
    Finished { unit: UnitId, ok: bool },
}

#[derive(Debug, Clone, Copy)]
enum Failure {
    /// Fail this many more attempts, then succeed
    Times(u32),
    Always,
}

#[derive(Default)]
struct FakeState {
    calls: Vec<UnitCall>,
    failures: HashMap<UnitId, Failure>,
    delays: HashMap<UnitId, Duration>,
    in_flight: usize,
    peak_in_flight: usize,
}

/// Scriptable loader: units succeed unless told to fail, optionally after a delay
#[derive(Clone, Default)]
pub struct FakeUnitLoader {
    state: Arc<Mutex<FakeState>>,
}

/// Keeps the in-flight count right when an attempt is dropped mid-delay
struct InFlight<'a> {
    state: &'a Mutex<FakeState>,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state.in_flight = state.in_flight.saturating_sub(1);
    }
}

impl FakeUnitLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the next `times` attempts of `unit`
    pub fn fail_times(&self, unit: impl Into<UnitId>, times: u32) -> &Self {
        self.lock()
            .failures
            .insert(unit.into(), Failure::Times(times));
        self
    }

    /// Fail every attempt of `unit`
    pub fn always_fail(&self, unit: impl Into<UnitId>) -> &Self {
        self.lock().failures.insert(unit.into(), Failure::Always);
        self
    }

    /// Make every attempt of `unit` take `delay` (tokio time)
    pub fn delay(&self, unit: impl Into<UnitId>, delay: Duration) -> &Self {
        self.lock().delays.insert(unit.into(), delay);
        self
    }

    /// All recorded calls
    pub fn calls(&self) -> Vec<UnitCall> {
        self.lock().calls.clone()
    }

    /// Units in the order their attempts started, one entry per attempt
    pub fn started(&self) -> Vec<UnitId> {
        self.lock()
            .calls
            .iter()
            .filter_map(|call| match call {
                UnitCall::Started { unit } => Some(unit.clone()),
                UnitCall::Finished { .. } => None,
            })
            .collect()
    }

    /// Number of attempts made for `unit`
    pub fn attempts(&self, unit: &str) -> usize {
        self.started()
            .iter()
            .filter(|started| started.as_str() == unit)
            .count()
    }

    /// Highest number of attempts that were in flight at once
    pub fn peak_in_flight(&self) -> usize {
        self.lock().peak_in_flight
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FakeState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl UnitLoader for FakeUnitLoader {
    async fn load(&self, unit: &UnitId) -> Result<(), UnitLoadError> {
        let delay = {
            let mut state = self.lock();
            state.calls.push(UnitCall::Started { unit: unit.clone() });
            state.in_flight += 1;
            state.peak_in_flight = state.peak_in_flight.max(state.in_flight);
            state.delays.get(unit).copied()
        };
        let _in_flight = InFlight { state: &self.state };

        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let mut state = self.lock();
        let result = match state.failures.get_mut(unit) {
            Some(Failure::Always) => Err(UnitLoadError::Failed(format!("{unit} is scripted to fail"))),
            Some(Failure::Times(remaining)) if *remaining > 0 => {
                *remaining -= 1;
                Err(UnitLoadError::Failed(format!("{unit} failed (scripted)")))
            }
            _ => Ok(()),
        };
        state.calls.push(UnitCall::Finished {
            unit: unit.clone(),
            ok: result.is_ok(),
        });
        result
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
