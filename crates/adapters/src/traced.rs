// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced adapter wrapper for consistent observability

use crate::unit::{UnitLoadError, UnitLoader};
use async_trait::async_trait;
use phasor_core::UnitId;
use tracing::Instrument;

/// Wrapper that adds tracing to any UnitLoader
#[derive(Clone)]
pub struct TracedUnitLoader<L> {
    inner: L,
}

impl<L> TracedUnitLoader<L> {
    pub fn new(inner: L) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &L {
        &self.inner
    }
}

#[async_trait]
impl<L: UnitLoader> UnitLoader for TracedUnitLoader<L> {
    async fn load(&self, unit: &UnitId) -> Result<(), UnitLoadError> {
        let span = tracing::info_span!("unit.load", unit = %unit);

        async {
            tracing::debug!("starting");

            let start = std::time::Instant::now();
            let result = self.inner.load(unit).await;
            let elapsed = start.elapsed();

            match &result {
                Ok(()) => tracing::info!(elapsed_ms = elapsed.as_millis() as u64, "loaded"),
                Err(e) => tracing::warn!(
                    elapsed_ms = elapsed.as_millis() as u64,
                    error = %e,
                    "load attempt failed"
                ),
            }

            result
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
