// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Waiter coordinator
//!
//! Callers wait on names with a hard deadline. Two waiter flavours share the
//! coordinator: explicit waiters resolved by `ReadinessRegistry::register`,
//! and predicate waiters that poll a check on the backoff schedule for
//! dependencies that never register themselves.

use super::registry::{Enqueued, ReadinessRegistry};
use super::Service;
use crate::backoff::Backoff;
use std::time::Duration;
use thiserror::Error;
use tokio::time::Instant;

/// Why a wait did not produce an instance
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WaitError {
    #[error("timed out after {elapsed:?} waiting for {name}")]
    Timeout { name: String, elapsed: Duration },
    #[error("wait for {name} cancelled: coordinator was torn down")]
    Cancelled { name: String },
}

impl WaitError {
    pub fn name(&self) -> &str {
        match self {
            WaitError::Timeout { name, .. } | WaitError::Cancelled { name } => name,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, WaitError::Timeout { .. })
    }
}

/// Stand-in deadline for timeouts too large to add to an `Instant`, about 30 years
const FAR_FUTURE: Duration = Duration::from_secs(86400 * 365 * 30);

/// `start + timeout`, clamped so huge timeouts mean "effectively forever"
fn deadline_after(start: Instant, timeout: Duration) -> Instant {
    start
        .checked_add(timeout)
        .unwrap_or_else(|| start + FAR_FUTURE)
}

/// Removes a queued waiter unless the wait resolved normally. Covers callers
/// that drop the wait future early.
struct PendingGuard<'a, T: Clone + Send + 'static> {
    registry: &'a ReadinessRegistry<T>,
    name: &'a str,
    id: u64,
    armed: bool,
}

impl<T: Clone + Send + 'static> PendingGuard<'_, T> {
    fn disarm(&mut self) {
        self.armed = false;
    }
}

impl<T: Clone + Send + 'static> Drop for PendingGuard<'_, T> {
    fn drop(&mut self) {
        if self.armed {
            self.registry.remove_waiter(self.name, self.id);
        }
    }
}

/// Deadline-bound waits over a shared `ReadinessRegistry`
pub struct WaiterCoordinator<T = Service> {
    registry: ReadinessRegistry<T>,
    backoff: Backoff,
}

impl<T> Clone for WaiterCoordinator<T> {
    fn clone(&self) -> Self {
        Self {
            registry: self.registry.clone(),
            backoff: self.backoff,
        }
    }
}

impl<T: Clone + Send + 'static> WaiterCoordinator<T> {
    pub fn new(registry: ReadinessRegistry<T>) -> Self {
        Self {
            registry,
            backoff: Backoff::default(),
        }
    }

    /// Polling schedule for predicate waiters
    pub fn with_backoff(mut self, backoff: Backoff) -> Self {
        self.backoff = backoff;
        self
    }

    pub fn registry(&self) -> &ReadinessRegistry<T> {
        &self.registry
    }

    /// Wait until `name` is registered or `timeout` elapses.
    ///
    /// A name that is already ready resolves on first poll without arming a
    /// timer. Otherwise registration and the deadline race; whichever lands
    /// first decides the outcome and the other side's bookkeeping is removed.
    pub async fn wait_for(&self, name: &str, timeout: Duration) -> Result<T, WaitError> {
        let start = Instant::now();
        let deadline = deadline_after(start, timeout);

        let (id, mut rx) = match self.registry.ready_or_enqueue(name, deadline) {
            Enqueued::Ready(instance) => return Ok(instance),
            Enqueued::Pending { id, rx } => (id, rx),
        };
        let mut guard = PendingGuard {
            registry: &self.registry,
            name,
            id,
            armed: true,
        };
        tracing::debug!(name, timeout_ms = timeout.as_millis() as u64, "waiting");

        let outcome = tokio::time::timeout_at(deadline, &mut rx).await;
        guard.disarm();

        match outcome {
            Ok(Ok(resolution)) => resolution,
            Ok(Err(_)) => Err(WaitError::Cancelled {
                name: name.to_string(),
            }),
            Err(_) => {
                if self.registry.remove_waiter(name, id) {
                    let elapsed = start.elapsed();
                    tracing::warn!(
                        name,
                        elapsed_ms = elapsed.as_millis() as u64,
                        "wait timed out"
                    );
                    return Err(WaitError::Timeout {
                        name: name.to_string(),
                        elapsed,
                    });
                }
                // Resolved after the deadline fired but before cleanup ran;
                // the resolution is already in the channel and wins
                rx.try_recv().unwrap_or_else(|_| {
                    Err(WaitError::Cancelled {
                        name: name.to_string(),
                    })
                })
            }
        }
    }

    /// Wait for every name, each with its own `timeout`.
    ///
    /// Fails on the first failing name; the remaining waits are dropped and
    /// their waiters removed. Names that did register stay registered.
    pub async fn wait_for_all<S: AsRef<str>>(
        &self,
        names: &[S],
        timeout: Duration,
    ) -> Result<Vec<T>, WaitError> {
        futures::future::try_join_all(
            names
                .iter()
                .map(|name| self.wait_for(name.as_ref(), timeout)),
        )
        .await
    }

    /// Poll `predicate` on the backoff schedule until it holds, `name` gets
    /// registered, or `timeout` elapses. For dependencies that never call
    /// `register` themselves.
    pub async fn wait_until<F>(
        &self,
        name: &str,
        mut predicate: F,
        timeout: Duration,
    ) -> Result<(), WaitError>
    where
        F: FnMut() -> bool,
    {
        let start = Instant::now();
        let deadline = deadline_after(start, timeout);
        let epoch = self.registry.epoch();
        let mut attempt = 0u32;

        loop {
            // Created before the epoch check so a teardown in between still wakes us
            let teardown = self.registry.teardown_signal().notified();

            if self.registry.epoch() != epoch {
                return Err(WaitError::Cancelled {
                    name: name.to_string(),
                });
            }
            if self.registry.is_ready(name) || predicate() {
                tracing::debug!(name, attempts = attempt + 1, "predicate satisfied");
                return Ok(());
            }

            let now = Instant::now();
            if now >= deadline {
                let elapsed = now - start;
                tracing::warn!(
                    name,
                    elapsed_ms = elapsed.as_millis() as u64,
                    "predicate wait timed out"
                );
                return Err(WaitError::Timeout {
                    name: name.to_string(),
                    elapsed,
                });
            }

            let wake = (now + self.backoff.delay(attempt)).min(deadline);
            attempt = attempt.saturating_add(1);

            tokio::select! {
                _ = tokio::time::sleep_until(wake) => {}
                _ = teardown => {
                    return Err(WaitError::Cancelled {
                        name: name.to_string(),
                    });
                }
            }
        }
    }

    /// Reject every outstanding waiter with `Cancelled`. Registrations stay.
    pub fn cancel_all(&self) -> usize {
        let cancelled = self.registry.cancel_pending(false);
        tracing::info!(cancelled, "cancelled pending waiters");
        cancelled
    }

    /// Tear down for a fresh page load: cancel every waiter and forget every
    /// registration.
    pub fn reset(&self) -> usize {
        let cancelled = self.registry.cancel_pending(true);
        tracing::info!(cancelled, "readiness reset");
        cancelled
    }
}

#[cfg(test)]
#[path = "waiter_tests.rs"]
mod tests;
