// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI command implementations

pub mod plan;
pub mod run;

use crate::error::CliError;
use phasor_core::{plan_page, Manifest, ManifestError, OptionsPatch, PagePlan};
use std::path::Path;

/// A page plan plus the `[options]` table of the manifest it came from
pub struct LoadedPlan {
    pub plan: PagePlan,
    pub options: OptionsPatch,
}

/// Read the manifest at `path` and plan `page` from it
pub fn load_plan(path: &Path, page: &str) -> anyhow::Result<LoadedPlan> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        CliError::new(format!("cannot read manifest {}", path.display()))
            .with_suggestion("pass the manifest with --manifest <path>")
            .with_source(e)
    })?;
    let manifest = Manifest::from_toml(&content).map_err(|e| {
        CliError::new(format!("invalid manifest {}", path.display())).with_source(e)
    })?;
    let options = OptionsPatch::from_toml(&content)?;

    match plan_page(&manifest, page) {
        Ok(plan) => Ok(LoadedPlan { plan, options }),
        Err(ManifestError::UnknownPage(_)) => {
            let pages: Vec<&str> = manifest.page_names().collect();
            let mut err = CliError::new(format!("unknown page: {page}"));
            if pages.is_empty() {
                err = err.with_context("the manifest defines no [pages.*] tables");
            } else {
                err = err.with_suggestion(format!("known pages: {}", pages.join(", ")));
            }
            Err(err.into())
        }
        Err(e) => Err(e.into()),
    }
}
