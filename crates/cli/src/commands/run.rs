// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `phasor run <page>` - Load every unit a page needs, phase by phase

use crate::error::CliError;
use crate::output::{self, OutputFormat, RunView};
use anyhow::Result;
use clap::Args;
use phasor_adapters::{NoOpUnitLoader, ShellUnitLoader, TracedUnitLoader, UnitLoader};
use phasor_core::{EventKind, LoaderEvent, OptionsPatch, PagePlan};
use phasor_engine::{LoadError, PhaseScheduler};
use std::path::Path;

#[derive(Args)]
pub struct RunArgs {
    /// Page to load (a [pages.<name>] table in the manifest)
    pub page: String,

    /// Shell command that loads one unit; `{unit}` is replaced with its id
    #[arg(short = 'c', long, required_unless_present = "dry_run")]
    pub command: Option<String>,

    /// Succeed every unit without running anything
    #[arg(long)]
    pub dry_run: bool,

    /// Retries per unit after the first failed attempt
    #[arg(long)]
    pub max_retries: Option<i64>,

    /// Bound on a single attempt, in milliseconds
    #[arg(long)]
    pub unit_timeout_ms: Option<i64>,

    #[arg(long)]
    pub backoff_base_ms: Option<u64>,

    #[arg(long)]
    pub backoff_cap_ms: Option<u64>,

    /// Run the units of a phase one at a time
    #[arg(long)]
    pub sequential: bool,

    /// Re-run units even if they already loaded earlier in the run
    #[arg(long)]
    pub cache_bust: bool,

    /// Print every loader event as a JSON line while running
    #[arg(long)]
    pub events: bool,

    #[arg(short = 'o', long = "output", value_enum, default_value_t)]
    pub output: OutputFormat,
}

impl RunArgs {
    /// Options given on the command line; these win over the manifest's
    pub fn options(&self) -> OptionsPatch {
        OptionsPatch {
            concurrency_within_phase: self.sequential.then_some(false),
            max_retries: self.max_retries,
            unit_timeout_ms: self.unit_timeout_ms,
            cache_bust: self.cache_bust.then_some(true),
            backoff_base_ms: self.backoff_base_ms,
            backoff_cap_ms: self.backoff_cap_ms,
        }
    }
}

pub async fn run(args: RunArgs, manifest: &Path) -> Result<()> {
    let loaded = super::load_plan(manifest, &args.page)?;
    let options = loaded.options.merge(args.options());

    if args.dry_run {
        let loader = TracedUnitLoader::new(NoOpUnitLoader::new());
        return execute(loader, loaded.plan, &options, &args).await;
    }

    let template = args.command.clone().ok_or_else(|| {
        CliError::new("no unit command given")
            .with_suggestion("pass --command '<shell command using {unit}>'")
            .with_suggestion("or use --dry-run to walk the plan")
    })?;
    let mut shell = ShellUnitLoader::new(template);
    if let Some(dir) = manifest.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        shell = shell.with_cwd(dir);
    }
    execute(TracedUnitLoader::new(shell), loaded.plan, &options, &args).await
}

async fn execute<L: UnitLoader>(
    loader: L,
    plan: PagePlan,
    options: &OptionsPatch,
    args: &RunArgs,
) -> Result<()> {
    let scheduler = PhaseScheduler::new(loader);
    scheduler.configure(options)?;
    scheduler.define_phases(plan.phases)?;

    if args.events {
        for kind in EventKind::ALL {
            scheduler.on(kind, |event| {
                if let Ok(line) = serde_json::to_string(event) {
                    println!("{line}");
                }
            });
        }
    } else if args.output == OutputFormat::Text {
        scheduler.on(EventKind::PhaseComplete, |event| {
            if let LoaderEvent::PhaseComplete {
                phase,
                time,
                succeeded,
                failed,
            } = event
            {
                println!(
                    "phase {phase}: {} loaded, {} failed ({}ms)",
                    succeeded.len(),
                    failed.len(),
                    time.as_millis()
                );
            }
        });
    }

    let result = scheduler.load().await;
    if let Some(report) = scheduler.last_report() {
        output::print(&RunView::new(&plan.page, &report), args.output);
    }

    match result {
        Ok(_) => Ok(()),
        Err(LoadError::PhaseAborted {
            phase,
            unit,
            message,
        }) => Err(CliError::phase_aborted(&phase, unit.as_str(), &message).into()),
        Err(e) => Err(e.into()),
    }
}
