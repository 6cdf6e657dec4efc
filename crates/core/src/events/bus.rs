// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Event bus for loader observers
//!
//! Two ways to listen: `on(kind, handler)` runs a callback synchronously at
//! publish time, in registration order; `subscribe(subscription)` hands back
//! a channel fed with every event whose name matches one of its patterns.

use super::event::{EventKind, LoaderEvent};
use super::subscription::{SubscriberId, Subscription};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tokio::sync::mpsc;

/// Sender for event delivery
pub type EventSender = mpsc::UnboundedSender<LoaderEvent>;
/// Receiver for event delivery
pub type EventReceiver = mpsc::UnboundedReceiver<LoaderEvent>;

type Handler = Arc<dyn Fn(&LoaderEvent) + Send + Sync>;

struct HandlerEntry {
    id: SubscriberId,
    kind: EventKind,
    handler: Handler,
}

/// Routes loader events to handlers and subscribers. Clones share listeners.
#[derive(Clone, Default)]
pub struct EventBus {
    subscribers: Arc<RwLock<HashMap<SubscriberId, (Subscription, EventSender)>>>,
    handlers: Arc<RwLock<Vec<HandlerEntry>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback for one event kind
    pub fn on<F>(&self, kind: EventKind, handler: F) -> SubscriberId
    where
        F: Fn(&LoaderEvent) + Send + Sync + 'static,
    {
        let id = SubscriberId::generate();
        let mut handlers = self.handlers.write().unwrap_or_else(|e| e.into_inner());
        handlers.push(HandlerEntry {
            id: id.clone(),
            kind,
            handler: Arc::new(handler),
        });
        id
    }

    /// Subscribe a channel to events matching the given patterns
    pub fn subscribe(&self, subscription: Subscription) -> EventReceiver {
        let (tx, rx) = mpsc::unbounded_channel();
        let id = subscription.id.clone();

        let mut subs = self.subscribers.write().unwrap_or_else(|e| e.into_inner());
        subs.insert(id, (subscription, tx));

        rx
    }

    /// Detach a handler or channel subscriber. Returns false if unknown.
    pub fn off(&self, id: &SubscriberId) -> bool {
        let removed_handler = {
            let mut handlers = self.handlers.write().unwrap_or_else(|e| e.into_inner());
            let before = handlers.len();
            handlers.retain(|entry| &entry.id != id);
            handlers.len() != before
        };
        let removed_sub = self
            .subscribers
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .remove(id)
            .is_some();
        removed_handler || removed_sub
    }

    /// Deliver an event to every matching handler, then every matching channel
    pub fn publish(&self, event: &LoaderEvent) {
        let kind = event.kind();

        // Snapshot so handlers may call on/off without deadlocking
        let matching: Vec<Handler> = self
            .handlers
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .filter(|entry| entry.kind == kind)
            .map(|entry| Arc::clone(&entry.handler))
            .collect();
        for handler in matching {
            handler(event);
        }

        let subs = self.subscribers.read().unwrap_or_else(|e| e.into_inner());
        for (subscription, tx) in subs.values() {
            if subscription.matches(kind.name()) {
                let _ = tx.send(event.clone());
            }
        }
    }

    /// Count of callbacks plus channel subscribers
    pub fn listener_count(&self) -> usize {
        let handlers = self.handlers.read().unwrap_or_else(|e| e.into_inner()).len();
        let subs = self
            .subscribers
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .len();
        handlers + subs
    }
}

#[cfg(test)]
#[path = "bus_tests.rs"]
mod tests;
