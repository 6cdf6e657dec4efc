// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Turns a manifest page into an ordered phase list
//!
//! Phase order is fixed: `core`, `auth` (auth pages only), `page`, `optional`,
//! then `app`. Empty phases are dropped. Only `optional` is non-critical.

use crate::manifest::{ManifestError, ManifestProvider};
use crate::phase::{total_units, Phase};

pub const CORE_PHASE: &str = "core";
pub const AUTH_PHASE: &str = "auth";
pub const PAGE_PHASE: &str = "page";
pub const OPTIONAL_PHASE: &str = "optional";
pub const APP_PHASE: &str = "app";

/// The phases a page needs, ready for the scheduler
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagePlan {
    pub page: String,
    pub requires_auth: bool,
    pub phases: Vec<Phase>,
}

impl PagePlan {
    pub fn total_units(&self) -> usize {
        total_units(&self.phases)
    }
}

/// Build the phase plan for `page`
pub fn plan_page(provider: &impl ManifestProvider, page: &str) -> Result<PagePlan, ManifestError> {
    let entry = provider
        .lookup(page)
        .ok_or_else(|| ManifestError::UnknownPage(page.to_string()))?;

    let mut phases = vec![Phase::critical(CORE_PHASE, provider.shared_units().to_vec())];
    if entry.requires_auth {
        phases.push(Phase::critical(AUTH_PHASE, provider.auth_units().to_vec()));
    }
    phases.push(Phase::critical(PAGE_PHASE, entry.units.clone()));
    phases.push(Phase::optional(OPTIONAL_PHASE, entry.optional.clone()));
    phases.push(Phase::critical(APP_PHASE, [entry.app_entry.clone()]));
    phases.retain(|phase| !phase.is_empty());

    tracing::debug!(
        page,
        phases = phases.len(),
        units = total_units(&phases),
        "planned page"
    );

    Ok(PagePlan {
        page: page.to_string(),
        requires_auth: entry.requires_auth,
        phases,
    })
}

#[cfg(test)]
#[path = "planner_tests.rs"]
mod tests;
