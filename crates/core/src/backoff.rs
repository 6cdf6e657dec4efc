// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Capped exponential backoff
//!
//! One policy drives both unit retries in the scheduler and predicate polling
//! in the waiter coordinator, so the two always agree on spacing.

use std::time::Duration;

/// Exponential backoff: `delay(n) = min(base * 2^n, cap)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Backoff {
    pub base: Duration,
    pub cap: Duration,
}

impl Backoff {
    pub const DEFAULT_BASE: Duration = Duration::from_millis(50);
    pub const DEFAULT_CAP: Duration = Duration::from_millis(2000);

    pub const fn new(base: Duration, cap: Duration) -> Self {
        Self { base, cap }
    }

    /// Delay before retry `attempt` (0-indexed)
    pub fn delay(&self, attempt: u32) -> Duration {
        let Some(factor) = 1u32.checked_shl(attempt) else {
            return self.cap;
        };
        self.base
            .checked_mul(factor)
            .map_or(self.cap, |delay| delay.min(self.cap))
    }

    /// The first `attempts` delays of the schedule
    pub fn schedule(&self, attempts: u32) -> impl Iterator<Item = Duration> + '_ {
        (0..attempts).map(move |attempt| self.delay(attempt))
    }
}

impl Default for Backoff {
    fn default() -> Self {
        Self::new(Self::DEFAULT_BASE, Self::DEFAULT_CAP)
    }
}

#[cfg(test)]
#[path = "backoff_tests.rs"]
mod tests;
