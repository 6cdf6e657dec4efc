// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Typed loader events

use crate::phase::UnitId;
use serde::{Serialize, Serializer};
use std::fmt;
use std::time::Duration;

/// The four kinds of event a scheduler run emits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Progress,
    PhaseComplete,
    AllComplete,
    Error,
}

impl EventKind {
    pub const ALL: [EventKind; 4] = [
        EventKind::Progress,
        EventKind::PhaseComplete,
        EventKind::AllComplete,
        EventKind::Error,
    ];

    /// Colon-separated event name used for pattern subscriptions
    pub fn name(self) -> &'static str {
        match self {
            EventKind::Progress => "loader:progress",
            EventKind::PhaseComplete => "loader:phase:complete",
            EventKind::AllComplete => "loader:complete",
            EventKind::Error => "loader:error",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An event emitted by a scheduler run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum LoaderEvent {
    /// A unit terminated; `loaded` counts successes so far
    Progress { loaded: usize, total: usize },
    PhaseComplete {
        phase: String,
        #[serde(rename = "time_ms", serialize_with = "as_millis")]
        time: Duration,
        succeeded: Vec<UnitId>,
        failed: Vec<UnitId>,
    },
    AllComplete {
        #[serde(rename = "total_time_ms", serialize_with = "as_millis")]
        total_time: Duration,
        loaded_units: Vec<UnitId>,
        failed_units: Vec<UnitId>,
    },
    /// A critical phase aborted the run
    Error {
        phase: String,
        unit: UnitId,
        message: String,
    },
}

impl LoaderEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            LoaderEvent::Progress { .. } => EventKind::Progress,
            LoaderEvent::PhaseComplete { .. } => EventKind::PhaseComplete,
            LoaderEvent::AllComplete { .. } => EventKind::AllComplete,
            LoaderEvent::Error { .. } => EventKind::Error,
        }
    }

    pub fn name(&self) -> &'static str {
        self.kind().name()
    }
}

fn as_millis<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    let millis = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX);
    serializer.serialize_u64(millis)
}
