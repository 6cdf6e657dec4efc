// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Unit execution with bounded retries
//!
//! Every retry re-executes the unit from scratch. Attempts are spaced by the
//! configured backoff; an attempt that overruns `unit_timeout` counts as failed.

use crate::run_state::RunState;
use phasor_adapters::{UnitLoadError, UnitLoader};
use phasor_core::{LoaderOptions, UnitId};
use std::sync::Mutex;
use std::time::Duration;
use thiserror::Error;

/// Why a single attempt failed
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AttemptError {
    #[error(transparent)]
    Load(#[from] UnitLoadError),
    #[error("attempt timed out after {0:?}")]
    TimedOut(Duration),
}

/// A unit that exhausted its retries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitFailure {
    pub unit: UnitId,
    pub attempts: u32,
    pub error: AttemptError,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum UnitOutcome {
    Loaded { attempts: u32 },
    /// Already loaded and the cache was not busted
    Cached,
    Failed(UnitFailure),
}

impl UnitOutcome {
    pub(crate) fn is_success(&self) -> bool {
        !matches!(self, UnitOutcome::Failed(_))
    }
}

async fn attempt_once<L: UnitLoader>(
    loader: &L,
    unit: &UnitId,
    limit: Option<Duration>,
) -> Result<(), AttemptError> {
    let Some(limit) = limit else {
        return Ok(loader.load(unit).await?);
    };
    match tokio::time::timeout(limit, loader.load(unit)).await {
        Ok(result) => Ok(result?),
        Err(_) => Err(AttemptError::TimedOut(limit)),
    }
}

/// Load `unit`, retrying up to `options.max_retries` times
pub(crate) async fn load_with_retry<L: UnitLoader>(
    loader: &L,
    unit: &UnitId,
    options: &LoaderOptions,
    state: &Mutex<RunState>,
) -> UnitOutcome {
    let max_attempts = options.max_attempts();
    let mut attempt = 0u32;

    loop {
        attempt += 1;
        state
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .record_attempt(unit);

        let error = match attempt_once(loader, unit, options.unit_timeout).await {
            Ok(()) => return UnitOutcome::Loaded { attempts: attempt },
            Err(error) => error,
        };

        if attempt >= max_attempts {
            tracing::error!(unit = %unit, attempts = attempt, error = %error, "unit failed permanently");
            return UnitOutcome::Failed(UnitFailure {
                unit: unit.clone(),
                attempts: attempt,
                error,
            });
        }

        let delay = options.backoff.delay(attempt - 1);
        tracing::warn!(
            unit = %unit,
            attempt,
            max_attempts,
            delay_ms = delay.as_millis() as u64,
            error = %error,
            "unit attempt failed, retrying"
        );
        tokio::time::sleep(delay).await;
    }
}

#[cfg(test)]
#[path = "attempt_tests.rs"]
mod tests;
