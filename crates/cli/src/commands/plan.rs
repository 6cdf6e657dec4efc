// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `phasor plan <page>` - Show the phases a page would load

use crate::output::{self, OutputFormat, PlanView};
use anyhow::Result;
use clap::Args;
use std::path::Path;

#[derive(Args)]
pub struct PlanArgs {
    /// Page to plan (a [pages.<name>] table in the manifest)
    pub page: String,

    #[arg(short = 'o', long = "output", value_enum, default_value_t)]
    pub output: OutputFormat,
}

pub fn plan(args: PlanArgs, manifest: &Path) -> Result<()> {
    let loaded = super::load_plan(manifest, &args.page)?;
    output::print(&PlanView::from(&loaded.plan), args.output);
    Ok(())
}
