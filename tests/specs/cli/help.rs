//! Help output specs

use crate::prelude::*;

#[test]
fn help_lists_subcommands() {
    Project::empty()
        .phasor()
        .args(&["--help"])
        .passes()
        .stdout_has("plan")
        .stdout_has("run")
        .stdout_has("--manifest");
}

#[test]
fn run_help_documents_retry_flags() {
    Project::empty()
        .phasor()
        .args(&["run", "--help"])
        .passes()
        .stdout_has("--max-retries")
        .stdout_has("--unit-timeout-ms")
        .stdout_has("--sequential")
        .stdout_has("--dry-run");
}
