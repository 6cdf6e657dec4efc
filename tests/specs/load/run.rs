//! `phasor run` specs
//!
//! Units are loaded by a shell command that appends the unit id to a log,
//! so the specs can check what ran and in which order.

use crate::prelude::*;

const RECORD: &str = "echo {unit} >> loaded.log";

fn loaded(project: &Project) -> Vec<String> {
    project.read("loaded.log").lines().map(str::to_string).collect()
}

#[test]
fn dry_run_walks_every_phase() {
    Project::with_manifest(DASHBOARD_MANIFEST)
        .phasor()
        .args(&["run", "dashboard", "--dry-run"])
        .passes()
        .stdout_has("phase core: 1 loaded, 0 failed")
        .stdout_has("phase app: 1 loaded, 0 failed")
        .stdout_has("Page dashboard completed: 6 loaded, 0 failed");
}

#[test]
fn units_run_in_phase_order() {
    let project = Project::with_manifest(DASHBOARD_MANIFEST);

    project
        .phasor()
        .args(&["run", "dashboard", "--sequential", "-c", RECORD])
        .passes();

    assert_eq!(
        loaded(&project),
        vec!["core", "session", "charts", "table", "news", "dashboard-app"]
    );
}

#[test]
fn failing_critical_unit_aborts_the_load() {
    let project = Project::with_manifest(DASHBOARD_MANIFEST);

    project
        .phasor()
        .args(&[
            "run",
            "dashboard",
            "--max-retries",
            "1",
            "--backoff-base-ms",
            "1",
            "--backoff-cap-ms",
            "1",
            "-c",
            "test {unit} != session && echo {unit} >> loaded.log",
        ])
        .fails()
        .stdout_has("Page dashboard aborted")
        .stderr_has("load aborted in phase 'auth'")
        .stderr_has("unit 'session' failed");

    assert_eq!(loaded(&project), vec!["core"]);
}

#[test]
fn failing_optional_unit_is_reported_but_not_fatal() {
    let project = Project::with_manifest(DASHBOARD_MANIFEST);

    project
        .phasor()
        .args(&[
            "run",
            "dashboard",
            "--max-retries",
            "0",
            "-c",
            "test {unit} != news && echo {unit} >> loaded.log",
        ])
        .passes()
        .stdout_has("phase optional: 0 loaded, 1 failed")
        .stdout_has("failed: news");

    assert!(loaded(&project).contains(&"dashboard-app".to_string()));
}

#[test]
fn manifest_options_apply_and_flags_override_them() {
    let manifest = format!("{DASHBOARD_MANIFEST}\n[options]\nmax_retries = 0\n");
    let project = Project::with_manifest(&manifest);
    let flaky = "echo {unit} >> attempts.log; test {unit} != hero";

    project.phasor().args(&["run", "home", "-c", flaky]).fails();
    assert_eq!(project.read("attempts.log").matches("hero").count(), 1);

    project.file("attempts.log", "");
    project
        .phasor()
        .args(&[
            "run",
            "home",
            "--max-retries",
            "2",
            "--backoff-base-ms",
            "1",
            "--backoff-cap-ms",
            "1",
            "-c",
            flaky,
        ])
        .fails();
    assert_eq!(project.read("attempts.log").matches("hero").count(), 3);
}

#[test]
fn events_stream_as_json_lines() {
    let project = Project::with_manifest(DASHBOARD_MANIFEST);

    let output = project
        .phasor()
        .args(&["run", "home", "--dry-run", "--events", "-o", "json"])
        .passes();

    let stdout = output.stdout();
    let events: Vec<&str> = stdout
        .lines()
        .filter(|line| line.starts_with("{\"event\""))
        .collect();
    assert_eq!(events.len(), 3 + 3 + 1, "{stdout}");
    assert!(events[0].contains("\"event\":\"progress\""));
    assert!(events.last().unwrap().contains("\"event\":\"all_complete\""));
}
