//! `phasor plan` specs

use crate::prelude::*;

#[test]
fn plan_shows_phases_in_load_order() {
    let project = Project::with_manifest(DASHBOARD_MANIFEST);

    let output = project.phasor().args(&["plan", "dashboard"]).passes();

    let stdout = output.stdout();
    let order: Vec<usize> = ["1. core", "2. auth", "3. page", "4. optional", "5. app"]
        .iter()
        .map(|line| stdout.find(line).unwrap())
        .collect();
    assert!(order.windows(2).all(|pair| pair[0] < pair[1]), "{stdout}");
}

#[test]
fn plan_skips_auth_and_empty_phases() {
    Project::with_manifest(DASHBOARD_MANIFEST)
        .phasor()
        .args(&["plan", "home"])
        .passes()
        .stdout_has("Page: home (3 units)")
        .stdout_lacks("auth")
        .stdout_lacks("optional");
}

#[test]
fn plan_as_json() {
    let project = Project::with_manifest(DASHBOARD_MANIFEST);

    let output = project
        .phasor()
        .args(&["plan", "dashboard", "-o", "json"])
        .passes()
        .stdout_has("\"requires_auth\": true")
        .stdout_has("\"total_units\": 6");

    assert!(output.stdout().contains("\"dashboard-app\""));
}

#[test]
fn manifest_flag_points_elsewhere() {
    let project = Project::empty();
    project.file("site/pages.toml", DASHBOARD_MANIFEST);

    project
        .phasor()
        .args(&["plan", "home", "--manifest", "site/pages.toml"])
        .passes()
        .stdout_has("hero");
}
