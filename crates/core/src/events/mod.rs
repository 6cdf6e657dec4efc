// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Loader events and their dispatch
//!
//! This module provides:
//! - `LoaderEvent` - Typed payloads for progress, phase completion, run completion, and errors
//! - `EventBus` - Callback handlers per event kind plus pattern-matched channel subscribers
//! - `EventPattern` - Pattern matching for channel subscriptions

mod bus;
mod event;
mod subscription;

pub use bus::{EventBus, EventReceiver, EventSender};
pub use event::{EventKind, LoaderEvent};
pub use subscription::{EventPattern, SubscriberId, Subscription};
