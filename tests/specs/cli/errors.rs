//! Error reporting specs
//!
//! Bad input fails with a readable message and a non-zero exit.

use crate::prelude::*;

#[test]
fn missing_manifest_is_reported() {
    Project::empty()
        .phasor()
        .args(&["plan", "home"])
        .fails()
        .stderr_has("cannot read manifest phasor.toml");
}

#[test]
fn unknown_page_suggests_known_pages() {
    Project::with_manifest(DASHBOARD_MANIFEST)
        .phasor()
        .args(&["plan", "settings"])
        .fails()
        .stderr_has("unknown page: settings")
        .stderr_has("known pages: dashboard, home");
}

#[test]
fn invalid_manifest_is_reported() {
    Project::with_manifest("[pages.home]\nunits = 3\n")
        .phasor()
        .args(&["plan", "home"])
        .fails()
        .stderr_has("invalid manifest");
}

#[test]
fn run_requires_a_command_or_dry_run() {
    Project::with_manifest(DASHBOARD_MANIFEST)
        .phasor()
        .args(&["run", "home"])
        .fails()
        .stderr_has("--command");
}

#[test]
fn invalid_options_are_rejected() {
    Project::with_manifest(&format!("{DASHBOARD_MANIFEST}\n[options]\nunit_timeout_ms = 0\n"))
        .phasor()
        .args(&["run", "home", "--dry-run"])
        .fails()
        .stderr_has("unit_timeout_ms must be > 0");
}
