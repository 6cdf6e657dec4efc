// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Page manifests
//!
//! A manifest is the static table of what each logical page needs loaded.
//! The loader only ever looks pages up; it never mutates the table.

use crate::phase::UnitId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

/// Errors from reading manifests or looking pages up
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("failed to read manifest {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("unknown page: {0}")]
    UnknownPage(String),
}

/// Requirements of one logical page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageManifest {
    /// Unit that boots the page itself; loaded last
    pub app_entry: UnitId,
    /// Units the page cannot run without, in load order
    #[serde(default)]
    pub units: Vec<UnitId>,
    /// Nice-to-have units whose failure is tolerated
    #[serde(default)]
    pub optional: Vec<UnitId>,
    #[serde(default)]
    pub requires_auth: bool,
}

/// Lookup interface over a manifest table
pub trait ManifestProvider {
    fn lookup(&self, page: &str) -> Option<&PageManifest>;

    /// Units every page loads first
    fn shared_units(&self) -> &[UnitId] {
        &[]
    }

    /// Units loaded only for pages that require auth
    fn auth_units(&self) -> &[UnitId] {
        &[]
    }
}

/// The TOML-backed manifest table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub core: Vec<UnitId>,
    #[serde(default)]
    pub auth: Vec<UnitId>,
    #[serde(default)]
    pub pages: BTreeMap<String, PageManifest>,
}

impl Manifest {
    /// Parse a manifest from TOML content
    pub fn from_toml(content: &str) -> Result<Self, ManifestError> {
        Ok(toml::from_str(content)?)
    }

    /// Read and parse a manifest file
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let content = std::fs::read_to_string(path).map_err(|source| ManifestError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&content)
    }

    pub fn page_names(&self) -> impl Iterator<Item = &str> {
        self.pages.keys().map(String::as_str)
    }
}

impl ManifestProvider for Manifest {
    fn lookup(&self, page: &str) -> Option<&PageManifest> {
        self.pages.get(page)
    }

    fn shared_units(&self) -> &[UnitId] {
        &self.core
    }

    fn auth_units(&self) -> &[UnitId] {
        &self.auth
    }
}

#[cfg(test)]
#[path = "manifest_tests.rs"]
mod tests;
