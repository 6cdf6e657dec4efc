// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Loader options
//!
//! `OptionsPatch` is the loose, partial form accepted by `configure()` and by
//! the `[options]` table of a manifest file. Unknown keys are ignored so newer
//! files keep working with older loaders. Applying a patch validates it into
//! a typed `LoaderOptions`.

use crate::backoff::Backoff;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

/// Errors from validating loader options
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OptionsError {
    #[error("max_retries must be >= 0, got {0}")]
    NegativeRetries(i64),
    #[error("unit_timeout_ms must be > 0, got {0}")]
    NonPositiveTimeout(i64),
    #[error("backoff cap ({cap:?}) is below backoff base ({base:?})")]
    BackoffCapBelowBase { base: Duration, cap: Duration },
    #[error("invalid options file: {0}")]
    Toml(String),
}

/// Validated scheduler configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderOptions {
    /// Run the units of one phase concurrently
    pub concurrency_within_phase: bool,
    /// Retries after the first failed attempt
    pub max_retries: u32,
    /// Bound on a single attempt
    pub unit_timeout: Option<Duration>,
    /// Re-execute units that already loaded instead of short-circuiting.
    /// When off, a unit listed twice in one concurrent phase also runs once
    /// and every listing shares its outcome.
    pub cache_bust: bool,
    pub backoff: Backoff,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self {
            concurrency_within_phase: true,
            max_retries: 3,
            unit_timeout: None,
            cache_bust: false,
            backoff: Backoff::default(),
        }
    }
}

impl LoaderOptions {
    /// Total attempts a unit gets, first try included
    pub fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }
}

/// Partial options; only the fields that are set override the current values
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct OptionsPatch {
    pub concurrency_within_phase: Option<bool>,
    pub max_retries: Option<i64>,
    pub unit_timeout_ms: Option<i64>,
    pub cache_bust: Option<bool>,
    pub backoff_base_ms: Option<u64>,
    pub backoff_cap_ms: Option<u64>,
}

#[derive(Deserialize)]
struct OptionsFile {
    #[serde(default)]
    options: OptionsPatch,
}

impl OptionsPatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the `[options]` table of a TOML document; other tables are ignored
    pub fn from_toml(content: &str) -> Result<Self, OptionsError> {
        let file: OptionsFile =
            toml::from_str(content).map_err(|e| OptionsError::Toml(e.to_string()))?;
        Ok(file.options)
    }

    pub fn concurrency_within_phase(mut self, enabled: bool) -> Self {
        self.concurrency_within_phase = Some(enabled);
        self
    }

    pub fn max_retries(mut self, retries: i64) -> Self {
        self.max_retries = Some(retries);
        self
    }

    pub fn unit_timeout_ms(mut self, timeout_ms: i64) -> Self {
        self.unit_timeout_ms = Some(timeout_ms);
        self
    }

    pub fn cache_bust(mut self, enabled: bool) -> Self {
        self.cache_bust = Some(enabled);
        self
    }

    pub fn backoff(mut self, base_ms: u64, cap_ms: u64) -> Self {
        self.backoff_base_ms = Some(base_ms);
        self.backoff_cap_ms = Some(cap_ms);
        self
    }

    /// Layer `other` on top of this patch; fields set in `other` win
    pub fn merge(self, other: OptionsPatch) -> Self {
        Self {
            concurrency_within_phase: other
                .concurrency_within_phase
                .or(self.concurrency_within_phase),
            max_retries: other.max_retries.or(self.max_retries),
            unit_timeout_ms: other.unit_timeout_ms.or(self.unit_timeout_ms),
            cache_bust: other.cache_bust.or(self.cache_bust),
            backoff_base_ms: other.backoff_base_ms.or(self.backoff_base_ms),
            backoff_cap_ms: other.backoff_cap_ms.or(self.backoff_cap_ms),
        }
    }

    /// Validate this patch against `base`, producing the new options
    pub fn apply(&self, base: &LoaderOptions) -> Result<LoaderOptions, OptionsError> {
        let mut options = base.clone();

        if let Some(enabled) = self.concurrency_within_phase {
            options.concurrency_within_phase = enabled;
        }
        if let Some(retries) = self.max_retries {
            options.max_retries =
                u32::try_from(retries).map_err(|_| OptionsError::NegativeRetries(retries))?;
        }
        if let Some(timeout_ms) = self.unit_timeout_ms {
            let millis = u64::try_from(timeout_ms)
                .ok()
                .filter(|ms| *ms > 0)
                .ok_or(OptionsError::NonPositiveTimeout(timeout_ms))?;
            options.unit_timeout = Some(Duration::from_millis(millis));
        }
        if let Some(enabled) = self.cache_bust {
            options.cache_bust = enabled;
        }
        if let Some(base_ms) = self.backoff_base_ms {
            options.backoff.base = Duration::from_millis(base_ms);
        }
        if let Some(cap_ms) = self.backoff_cap_ms {
            options.backoff.cap = Duration::from_millis(cap_ms);
        }
        if options.backoff.cap < options.backoff.base {
            return Err(OptionsError::BackoffCapBelowBase {
                base: options.backoff.base,
                cap: options.backoff.cap,
            });
        }

        Ok(options)
    }
}

#[cfg(test)]
#[path = "options_tests.rs"]
mod tests;
