// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Output formatting for CLI commands

use clap::ValueEnum;
use phasor_core::{PagePlan, UnitId};
use phasor_engine::{RunReport, RunStatus};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Print output in the specified format
pub fn print<T: Serialize + fmt::Display>(value: &T, format: OutputFormat) {
    match format {
        OutputFormat::Text => println!("{}", value),
        OutputFormat::Json => {
            if let Ok(json) = serde_json::to_string_pretty(value) {
                println!("{}", json);
            }
        }
    }
}

fn join(units: &[UnitId]) -> String {
    units
        .iter()
        .map(UnitId::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Debug, Serialize)]
pub struct PhaseView {
    pub name: String,
    pub critical: bool,
    pub units: Vec<UnitId>,
}

/// Phases planned for one page
#[derive(Debug, Serialize)]
pub struct PlanView {
    pub page: String,
    pub requires_auth: bool,
    pub total_units: usize,
    pub phases: Vec<PhaseView>,
}

impl From<&PagePlan> for PlanView {
    fn from(plan: &PagePlan) -> Self {
        Self {
            page: plan.page.clone(),
            requires_auth: plan.requires_auth,
            total_units: plan.total_units(),
            phases: plan
                .phases
                .iter()
                .map(|phase| PhaseView {
                    name: phase.name.clone(),
                    critical: phase.critical,
                    units: phase.units.clone(),
                })
                .collect(),
        }
    }
}

impl fmt::Display for PlanView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Page: {} ({} units)", self.page, self.total_units)?;
        for (index, phase) in self.phases.iter().enumerate() {
            let kind = if phase.critical { "critical" } else { "optional" };
            write!(f, "\n  {}. {:<10} {:<9} {}", index + 1, phase.name, kind, join(&phase.units))?;
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct PhaseOutcomeView {
    pub name: String,
    pub elapsed_ms: u64,
    pub succeeded: Vec<UnitId>,
    pub failed: Vec<UnitId>,
}

/// Summary of a finished run
#[derive(Debug, Serialize)]
pub struct RunView {
    pub page: String,
    pub status: &'static str,
    pub total_time_ms: u64,
    pub loaded_units: Vec<UnitId>,
    pub failed_units: Vec<UnitId>,
    pub phases: Vec<PhaseOutcomeView>,
}

impl RunView {
    pub fn new(page: &str, report: &RunReport) -> Self {
        Self {
            page: page.to_string(),
            status: match report.status {
                RunStatus::Completed => "completed",
                RunStatus::Aborted => "aborted",
                RunStatus::Running { .. } => "running",
                RunStatus::Idle => "idle",
            },
            total_time_ms: report.total_time.as_millis() as u64,
            loaded_units: report.loaded_units.clone(),
            failed_units: report.failed_units.clone(),
            phases: report
                .phases
                .iter()
                .map(|phase| PhaseOutcomeView {
                    name: phase.name.clone(),
                    elapsed_ms: phase.elapsed.as_millis() as u64,
                    succeeded: phase.succeeded.clone(),
                    failed: phase.failed.clone(),
                })
                .collect(),
        }
    }
}

impl fmt::Display for RunView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Page {} {}: {} loaded, {} failed in {}ms",
            self.page,
            self.status,
            self.loaded_units.len(),
            self.failed_units.len(),
            self.total_time_ms
        )?;
        if !self.failed_units.is_empty() {
            write!(f, "\n  failed: {}", join(&self.failed_units))?;
        }
        Ok(())
    }
}
