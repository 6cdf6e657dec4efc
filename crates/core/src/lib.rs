// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! phasor-core: building blocks for phased application start-up
//!
//! This crate provides:
//! - Load units, phases, and the backoff policy shared by retries and polling
//! - Loader options and manifest parsing, plus the page planner
//! - Typed loader events and the event bus that dispatches them
//! - The readiness registry and the waiter coordinator built on it

pub mod backoff;
pub mod events;
pub mod manifest;
pub mod options;
pub mod phase;
pub mod planner;
pub mod readiness;

// Re-exports
pub use backoff::Backoff;
pub use events::{
    EventBus, EventKind, EventPattern, EventReceiver, LoaderEvent, SubscriberId, Subscription,
};
pub use manifest::{Manifest, ManifestError, ManifestProvider, PageManifest};
pub use options::{LoaderOptions, OptionsError, OptionsPatch};
pub use phase::{Phase, UnitId};
pub use planner::{plan_page, PagePlan};
pub use readiness::{
    ReadinessRegistry, RegisterError, Service, ServiceEntry, WaitError, WaiterCoordinator,
};
