// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Phase scheduler
//!
//! Runs an ordered list of phases. Units within a phase are joined on the
//! caller's task (concurrently or one by one), retried with backoff, and
//! reported through the event bus. A permanently failed unit in a critical
//! phase aborts the run once that phase has settled.

use crate::attempt::{load_with_retry, UnitOutcome};
use crate::error::{LoadError, SchedulerError};
use crate::run_state::{PhaseReport, RunReport, RunState, RunStatus};
use futures::future::join_all;
use phasor_adapters::UnitLoader;
use phasor_core::{
    phase, EventBus, EventKind, EventReceiver, LoaderEvent, LoaderOptions, OptionsPatch, Phase,
    SubscriberId, Subscription, UnitId,
};
use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::time::Instant;
use tracing::Instrument;

struct Inner {
    phases: Vec<Phase>,
    options: LoaderOptions,
    status: RunStatus,
    /// Units loaded by any run on this scheduler
    loaded: HashSet<UnitId>,
    last_report: Option<RunReport>,
}

/// Puts the scheduler back to `Idle` if a run is dropped before it finishes
struct RunGuard<'a> {
    inner: &'a Mutex<Inner>,
}

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        if inner.status.is_running() {
            inner.status = RunStatus::Idle;
        }
    }
}

/// Executes phases of load units against a [`UnitLoader`]
pub struct PhaseScheduler<L: UnitLoader> {
    loader: L,
    events: EventBus,
    inner: Arc<Mutex<Inner>>,
}

impl<L: UnitLoader> PhaseScheduler<L> {
    pub fn new(loader: L) -> Self {
        Self {
            loader,
            events: EventBus::new(),
            inner: Arc::new(Mutex::new(Inner {
                phases: Vec::new(),
                options: LoaderOptions::default(),
                status: RunStatus::Idle,
                loaded: HashSet::new(),
                last_report: None,
            })),
        }
    }

    /// Publish to an existing bus instead of a private one
    pub fn with_events(mut self, events: EventBus) -> Self {
        self.events = events;
        self
    }

    pub fn define_phases(&self, phases: Vec<Phase>) -> Result<(), SchedulerError> {
        let mut inner = self.lock();
        if inner.status.is_running() {
            return Err(SchedulerError::Running("define phases"));
        }
        tracing::debug!(phases = phases.len(), "phases defined");
        inner.phases = phases;
        Ok(())
    }

    /// Apply an options patch on top of the current options
    pub fn configure(&self, patch: &OptionsPatch) -> Result<(), SchedulerError> {
        let mut inner = self.lock();
        if inner.status.is_running() {
            return Err(SchedulerError::Running("configure"));
        }
        inner.options = patch.apply(&inner.options)?;
        Ok(())
    }

    pub fn options(&self) -> LoaderOptions {
        self.lock().options.clone()
    }

    pub fn status(&self) -> RunStatus {
        self.lock().status
    }

    pub fn last_report(&self) -> Option<RunReport> {
        self.lock().last_report.clone()
    }

    /// Forget which units earlier runs loaded
    pub fn clear_cache(&self) {
        self.lock().loaded.clear();
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn on<F>(&self, kind: EventKind, handler: F) -> SubscriberId
    where
        F: Fn(&LoaderEvent) + Send + Sync + 'static,
    {
        self.events.on(kind, handler)
    }

    pub fn off(&self, id: &SubscriberId) -> bool {
        self.events.off(id)
    }

    pub fn subscribe(&self, subscription: Subscription) -> EventReceiver {
        self.events.subscribe(subscription)
    }

    /// Run every defined phase in order
    pub async fn load(&self) -> Result<RunReport, LoadError> {
        let (phases, options) = {
            let mut inner = self.lock();
            if inner.status.is_running() {
                return Err(LoadError::AlreadyRunning);
            }
            if inner.phases.is_empty() {
                return Err(LoadError::NoPhases);
            }
            inner.status = RunStatus::Running { phase_index: 0 };
            (inner.phases.clone(), inner.options.clone())
        };
        let _guard = RunGuard { inner: &self.inner };

        let span = tracing::info_span!("load", phases = phases.len());
        self.run(phases, options).instrument(span).await
    }

    async fn run(&self, phases: Vec<Phase>, options: LoaderOptions) -> Result<RunReport, LoadError> {
        let total = phase::total_units(&phases);
        let state = Mutex::new(RunState::new(Instant::now()));
        let mut reports = Vec::with_capacity(phases.len());

        tracing::info!(total_units = total, "load started");

        for (index, current) in phases.iter().enumerate() {
            self.lock().status = RunStatus::Running { phase_index: index };
            lock_state(&state).current_phase_index = index;

            let report = self.run_phase(current, &options, &state, total).await;

            if current.critical {
                if let Some((unit, message)) = report.first_failure {
                    tracing::error!(phase = %current.name, unit = %unit, "critical phase aborted");
                    reports.push(report.report);
                    self.finish(RunStatus::Aborted, &state, reports);
                    self.events.publish(&LoaderEvent::Error {
                        phase: current.name.clone(),
                        unit: unit.clone(),
                        message: message.clone(),
                    });
                    return Err(LoadError::PhaseAborted {
                        phase: current.name.clone(),
                        unit,
                        message,
                    });
                }
            }

            tracing::info!(
                phase = %current.name,
                elapsed_ms = report.report.elapsed.as_millis() as u64,
                failed = report.report.failed.len(),
                "phase complete"
            );
            self.events.publish(&LoaderEvent::PhaseComplete {
                phase: current.name.clone(),
                time: report.report.elapsed,
                succeeded: report.report.succeeded.clone(),
                failed: report.report.failed.clone(),
            });
            reports.push(report.report);
        }

        let report = self.finish(RunStatus::Completed, &state, reports);
        tracing::info!(
            total_time_ms = report.total_time.as_millis() as u64,
            loaded = report.loaded_units.len(),
            failed = report.failed_units.len(),
            "load complete"
        );
        self.events.publish(&LoaderEvent::AllComplete {
            total_time: report.total_time,
            loaded_units: report.loaded_units.clone(),
            failed_units: report.failed_units.clone(),
        });
        Ok(report)
    }

    async fn run_phase(
        &self,
        current: &Phase,
        options: &LoaderOptions,
        state: &Mutex<RunState>,
        total: usize,
    ) -> PhaseOutcome {
        let started = Instant::now();
        tracing::info!(phase = %current.name, critical = current.critical, units = current.units.len(), "phase started");

        let outcomes = if options.concurrency_within_phase {
            self.run_concurrent(&current.units, options, state, total)
                .await
        } else {
            let mut outcomes = Vec::with_capacity(current.units.len());
            for unit in &current.units {
                outcomes.push(self.run_unit(unit, options, state, total).await);
            }
            outcomes
        };

        let mut succeeded = Vec::new();
        let mut failed = Vec::new();
        let mut first_failure = None;
        for (unit, outcome) in current.units.iter().zip(outcomes) {
            match outcome {
                UnitOutcome::Failed(failure) => {
                    failed.push(unit.clone());
                    if first_failure.is_none() {
                        first_failure = Some((failure.unit, failure.error.to_string()));
                    }
                }
                UnitOutcome::Loaded { .. } | UnitOutcome::Cached => succeeded.push(unit.clone()),
            }
        }

        PhaseOutcome {
            report: PhaseReport {
                name: current.name.clone(),
                critical: current.critical,
                elapsed: started.elapsed(),
                succeeded,
                failed,
            },
            first_failure,
        }
    }

    /// Join the phase's units. Without cache busting a unit listed more than
    /// once runs once and its repeats settle with the same outcome.
    async fn run_concurrent(
        &self,
        units: &[UnitId],
        options: &LoaderOptions,
        state: &Mutex<RunState>,
        total: usize,
    ) -> Vec<UnitOutcome> {
        let mut first_seen: HashMap<&UnitId, usize> = HashMap::new();
        let repeat_of: Vec<Option<usize>> = units
            .iter()
            .enumerate()
            .map(|(index, unit)| {
                if options.cache_bust {
                    return None;
                }
                match first_seen.entry(unit) {
                    Entry::Occupied(first) => Some(*first.get()),
                    Entry::Vacant(slot) => {
                        slot.insert(index);
                        None
                    }
                }
            })
            .collect();

        let mut executed = join_all(
            units
                .iter()
                .zip(&repeat_of)
                .filter(|(_, repeat)| repeat.is_none())
                .map(|(unit, _)| self.run_unit(unit, options, state, total)),
        )
        .await
        .into_iter();

        let mut outcomes: Vec<UnitOutcome> = Vec::with_capacity(units.len());
        for (unit, repeat) in units.iter().zip(&repeat_of) {
            let outcome = match repeat {
                Some(first) => {
                    let shared = match &outcomes[*first] {
                        UnitOutcome::Failed(failure) => UnitOutcome::Failed(failure.clone()),
                        UnitOutcome::Loaded { .. } | UnitOutcome::Cached => UnitOutcome::Cached,
                    };
                    self.settle(unit, shared, state, total)
                }
                None => match executed.next() {
                    Some(outcome) => outcome,
                    None => break,
                },
            };
            outcomes.push(outcome);
        }
        outcomes
    }

    async fn run_unit(
        &self,
        unit: &UnitId,
        options: &LoaderOptions,
        state: &Mutex<RunState>,
        total: usize,
    ) -> UnitOutcome {
        let outcome = if !options.cache_bust && self.already_loaded(unit, state) {
            tracing::debug!(unit = %unit, "unit already loaded, skipping");
            UnitOutcome::Cached
        } else {
            load_with_retry(&self.loader, unit, options, state).await
        };
        self.settle(unit, outcome, state, total)
    }

    /// Record a terminated unit slot and report progress
    fn settle(
        &self,
        unit: &UnitId,
        outcome: UnitOutcome,
        state: &Mutex<RunState>,
        total: usize,
    ) -> UnitOutcome {
        let loaded = {
            let mut state = lock_state(state);
            if outcome.is_success() {
                self.lock().loaded.insert(unit.clone());
                state.record_success(unit)
            } else {
                state.record_failure(unit);
                state.loaded_slots()
            }
        };
        self.events
            .publish(&LoaderEvent::Progress { loaded, total });
        outcome
    }

    fn already_loaded(&self, unit: &UnitId, state: &Mutex<RunState>) -> bool {
        if lock_state(state).is_loaded(unit) {
            return true;
        }
        self.lock().loaded.contains(unit)
    }

    fn finish(&self, status: RunStatus, state: &Mutex<RunState>, phases: Vec<PhaseReport>) -> RunReport {
        let state = lock_state(state);
        let report = RunReport {
            status,
            total_time: state.start_time.elapsed(),
            loaded_units: state.loaded_units.clone(),
            failed_units: state.failed_units.clone(),
            phases,
        };
        let mut inner = self.lock();
        inner.status = status;
        inner.last_report = Some(report.clone());
        report
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

struct PhaseOutcome {
    report: PhaseReport,
    first_failure: Option<(UnitId, String)>,
}

fn lock_state(state: &Mutex<RunState>) -> MutexGuard<'_, RunState> {
    state.lock().unwrap_or_else(|e| e.into_inner())
}

#[cfg(test)]
#[path = "scheduler_tests.rs"]
mod tests;
