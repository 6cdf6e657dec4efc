// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! No-op unit loader for dry runs.

use super::{UnitLoadError, UnitLoader};
use async_trait::async_trait;
use phasor_core::UnitId;

/// Loader that succeeds immediately for every unit.
///
/// Used by `phasor run --dry-run` to exercise a plan without side effects.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoOpUnitLoader;

impl NoOpUnitLoader {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl UnitLoader for NoOpUnitLoader {
    async fn load(&self, _unit: &UnitId) -> Result<(), UnitLoadError> {
        Ok(())
    }
}
