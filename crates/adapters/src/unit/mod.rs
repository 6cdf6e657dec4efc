// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Unit loading adapters

mod noop;
mod shell;

pub use noop::NoOpUnitLoader;
pub use shell::ShellUnitLoader;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeUnitLoader, UnitCall};

use async_trait::async_trait;
use phasor_core::UnitId;
use thiserror::Error;

/// Errors from a single load attempt
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UnitLoadError {
    #[error("load failed: {0}")]
    Failed(String),
    #[error("command exited with status {code}: {stderr}")]
    CommandFailed { code: i32, stderr: String },
    #[error("failed to start command: {0}")]
    Spawn(String),
}

/// Executes one unit of load work. Each call is a full attempt from scratch.
#[async_trait]
pub trait UnitLoader: Clone + Send + Sync + 'static {
    async fn load(&self, unit: &UnitId) -> Result<(), UnitLoadError>;
}
