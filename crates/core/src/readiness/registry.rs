// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Readiness registry
//!
//! Registration is monotonic: a name is written once and never overwritten.
//! Registering a name also resolves every waiter queued on it, oldest first.

use super::waiter::WaitError;
use super::Service;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;
use tokio::sync::{oneshot, Notify};
use tokio::time::Instant;

/// Errors from registering a service
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegisterError {
    #[error("service already registered: {name}")]
    Conflict { name: String },
}

/// A registered service; immutable once stored
#[derive(Debug, Clone)]
pub struct ServiceEntry<T> {
    pub name: String,
    pub instance: T,
    pub ready_at: Instant,
}

pub(crate) type Resolution<T> = Result<T, WaitError>;

pub(crate) struct PendingWaiter<T> {
    id: u64,
    deadline: Instant,
    tx: oneshot::Sender<Resolution<T>>,
}

/// Outcome of an atomic readiness check
pub(crate) enum Enqueued<T> {
    Ready(T),
    Pending {
        id: u64,
        rx: oneshot::Receiver<Resolution<T>>,
    },
}

struct RegistryState<T> {
    entries: HashMap<String, ServiceEntry<T>>,
    pending: HashMap<String, VecDeque<PendingWaiter<T>>>,
    next_waiter_id: u64,
    /// Bumped on every teardown so pollers can tell they were cancelled
    epoch: u64,
}

struct Shared<T> {
    state: Mutex<RegistryState<T>>,
    teardown: Notify,
}

/// Name → instance map plus the waiters queued on names not yet ready.
///
/// Cheap to clone; clones share state. Construct one per page load and pass
/// it to whatever needs readiness lookups.
pub struct ReadinessRegistry<T = Service> {
    shared: Arc<Shared<T>>,
}

impl<T> Clone for ReadinessRegistry<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T: Clone + Send + 'static> Default for ReadinessRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + Send + 'static> ReadinessRegistry<T> {
    pub fn new() -> Self {
        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(RegistryState {
                    entries: HashMap::new(),
                    pending: HashMap::new(),
                    next_waiter_id: 0,
                    epoch: 0,
                }),
                teardown: Notify::new(),
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, RegistryState<T>> {
        self.shared
            .state
            .lock()
            .unwrap_or_else(|e| e.into_inner())
    }

    /// Mark `name` ready with `instance` and resolve its waiters in FIFO order.
    ///
    /// A second registration of the same name is a logged no-op; the first
    /// instance stays.
    pub fn register(&self, name: impl Into<String>, instance: T) -> Result<(), RegisterError> {
        let name = name.into();
        let mut state = self.lock();

        if state.entries.contains_key(&name) {
            drop(state);
            tracing::warn!(name = %name, "duplicate registration ignored");
            return Err(RegisterError::Conflict { name });
        }

        state.entries.insert(
            name.clone(),
            ServiceEntry {
                name: name.clone(),
                instance: instance.clone(),
                ready_at: Instant::now(),
            },
        );

        // Resolve while still holding the lock so a timing-out waiter that
        // finds itself gone from the queue is guaranteed a value in its channel
        let waiters = state.pending.remove(&name).unwrap_or_default();
        let resolved = waiters.len();
        for waiter in waiters {
            let _ = waiter.tx.send(Ok(instance.clone()));
        }
        drop(state);

        tracing::info!(name = %name, waiters = resolved, "service ready");
        Ok(())
    }

    pub fn is_ready(&self, name: &str) -> bool {
        self.lock().entries.contains_key(name)
    }

    /// The registered instance, or `None` if `name` is not ready yet
    pub fn get(&self, name: &str) -> Option<T> {
        self.lock()
            .entries
            .get(name)
            .map(|entry| entry.instance.clone())
    }

    pub fn entry(&self, name: &str) -> Option<ServiceEntry<T>> {
        self.lock().entries.get(name).cloned()
    }

    /// Ready names, sorted
    pub fn ready_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.lock().entries.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().entries.is_empty()
    }

    /// Waiters currently queued on `name`
    pub fn pending_count(&self, name: &str) -> usize {
        self.lock().pending.get(name).map_or(0, VecDeque::len)
    }

    /// Waiters currently queued across all names
    pub fn total_pending(&self) -> usize {
        self.lock().pending.values().map(VecDeque::len).sum()
    }

    /// Earliest deadline among queued waiters
    pub fn next_deadline(&self) -> Option<Instant> {
        self.lock()
            .pending
            .values()
            .flat_map(|queue| queue.iter().map(|waiter| waiter.deadline))
            .min()
    }

    /// Return the instance if ready, otherwise queue a waiter, atomically
    pub(crate) fn ready_or_enqueue(
        &self,
        name: &str,
        deadline: Instant,
    ) -> Enqueued<T> {
        let mut state = self.lock();
        if let Some(entry) = state.entries.get(name) {
            return Enqueued::Ready(entry.instance.clone());
        }

        let id = state.next_waiter_id;
        state.next_waiter_id += 1;
        let (tx, rx) = oneshot::channel();
        state
            .pending
            .entry(name.to_string())
            .or_default()
            .push_back(PendingWaiter { id, deadline, tx });
        Enqueued::Pending { id, rx }
    }

    /// Drop a queued waiter. False if it was already resolved or cancelled.
    pub(crate) fn remove_waiter(&self, name: &str, id: u64) -> bool {
        let mut state = self.lock();
        let Some(queue) = state.pending.get_mut(name) else {
            return false;
        };
        let before = queue.len();
        queue.retain(|waiter| waiter.id != id);
        let removed = queue.len() != before;
        if queue.is_empty() {
            state.pending.remove(name);
        }
        removed
    }

    /// Reject every queued waiter with `Cancelled`; returns how many were rejected
    pub(crate) fn cancel_pending(&self, clear_entries: bool) -> usize {
        let mut state = self.lock();
        let pending = std::mem::take(&mut state.pending);
        state.epoch += 1;
        if clear_entries {
            state.entries.clear();
        }

        let mut cancelled = 0;
        for (name, queue) in pending {
            for waiter in queue {
                cancelled += 1;
                let _ = waiter.tx.send(Err(WaitError::Cancelled { name: name.clone() }));
            }
        }
        drop(state);

        self.shared.teardown.notify_waiters();
        cancelled
    }

    pub(crate) fn epoch(&self) -> u64 {
        self.lock().epoch
    }

    pub(crate) fn teardown_signal(&self) -> &Notify {
        &self.shared.teardown
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
