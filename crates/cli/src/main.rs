// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! phasor - phased page loading from a manifest

mod commands;
mod error;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{plan, run};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "phasor",
    version,
    about = "Phasor - load a page's units in ordered, retried phases"
)]
struct Cli {
    /// Manifest describing pages and their units
    #[arg(short = 'm', long, global = true, default_value = "phasor.toml")]
    manifest: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the phases a page would load
    Plan(plan::PlanArgs),
    /// Load a page
    Run(run::RunArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging();

    match cli.command {
        Commands::Plan(args) => plan::plan(args, &cli.manifest),
        Commands::Run(args) => run::run(args, &cli.manifest).await,
    }
}

/// Log to stderr so stdout stays machine-readable; `RUST_LOG` overrides the level
fn setup_logging() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}
