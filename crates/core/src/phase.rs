// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Load units and the phases that group them

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of one unit of load work (a resource path or task name)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnitId(pub String);

impl UnitId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UnitId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for UnitId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// An ordered group of units that must all terminate before the next phase starts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phase {
    pub name: String,
    /// A permanent unit failure in a critical phase aborts the run
    pub critical: bool,
    pub units: Vec<UnitId>,
}

impl Phase {
    pub fn new<I, U>(name: impl Into<String>, critical: bool, units: I) -> Self
    where
        I: IntoIterator<Item = U>,
        U: Into<UnitId>,
    {
        Self {
            name: name.into(),
            critical,
            units: units.into_iter().map(Into::into).collect(),
        }
    }

    /// Phase whose failures abort the run
    pub fn critical<I, U>(name: impl Into<String>, units: I) -> Self
    where
        I: IntoIterator<Item = U>,
        U: Into<UnitId>,
    {
        Self::new(name, true, units)
    }

    /// Phase whose failures are recorded but never halt the run
    pub fn optional<I, U>(name: impl Into<String>, units: I) -> Self
    where
        I: IntoIterator<Item = U>,
        U: Into<UnitId>,
    {
        Self::new(name, false, units)
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

/// Total number of units across a phase list
pub fn total_units(phases: &[Phase]) -> usize {
    phases.iter().map(|phase| phase.units.len()).sum()
}
