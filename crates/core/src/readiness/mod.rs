// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Service readiness
//!
//! This module provides:
//! - **ReadinessRegistry** - Write-once map from service name to instance
//! - **WaiterCoordinator** - Deadline-bound waits on names, explicit or predicate-driven
//!
//! The registry and its pending waiters share one lock, so "is it ready?" and
//! "queue me until it is" happen atomically: a registration can never slip in
//! between the check and the enqueue.

mod registry;
mod waiter;

pub use registry::{ReadinessRegistry, RegisterError, ServiceEntry};
pub use waiter::{WaitError, WaiterCoordinator};

use std::any::Any;
use std::sync::Arc;

/// Default instance type: any shareable value
pub type Service = Arc<dyn Any + Send + Sync>;
