// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::io::Write;

const SAMPLE_MANIFEST: &str = r#"
core = ["runtime/core.js", "runtime/events.js"]
auth = ["runtime/session.js"]

[options]
max_retries = 1

[pages.dashboard]
app_entry = "apps/dashboard.js"
units = ["lib/charts.js", "lib/table.js"]
optional = ["widgets/news.js"]
requires_auth = true

[pages.login]
app_entry = "apps/login.js"
"#;

#[test]
fn parses_pages_and_shared_units() {
    let manifest = Manifest::from_toml(SAMPLE_MANIFEST).unwrap();

    assert_eq!(manifest.shared_units().len(), 2);
    assert_eq!(manifest.auth_units(), &[UnitId::from("runtime/session.js")]);

    let dashboard = manifest.lookup("dashboard").unwrap();
    assert_eq!(dashboard.app_entry, UnitId::from("apps/dashboard.js"));
    assert_eq!(dashboard.units.len(), 2);
    assert_eq!(dashboard.optional, vec![UnitId::from("widgets/news.js")]);
    assert!(dashboard.requires_auth);
}

#[test]
fn page_fields_default_when_omitted() {
    let manifest = Manifest::from_toml(SAMPLE_MANIFEST).unwrap();
    let login = manifest.lookup("login").unwrap();

    assert!(login.units.is_empty());
    assert!(login.optional.is_empty());
    assert!(!login.requires_auth);
}

#[test]
fn unknown_page_lookup_is_none() {
    let manifest = Manifest::from_toml(SAMPLE_MANIFEST).unwrap();
    assert!(manifest.lookup("settings").is_none());
}

#[test]
fn page_names_are_sorted() {
    let manifest = Manifest::from_toml(SAMPLE_MANIFEST).unwrap();
    let names: Vec<_> = manifest.page_names().collect();
    assert_eq!(names, vec!["dashboard", "login"]);
}

#[test]
fn missing_app_entry_is_a_parse_error() {
    let result = Manifest::from_toml("[pages.broken]\nunits = [\"a.js\"]\n");
    assert!(matches!(result, Err(ManifestError::Toml(_))));
}

#[test]
fn load_reads_file_from_disk() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(SAMPLE_MANIFEST.as_bytes()).unwrap();

    let manifest = Manifest::load(file.path()).unwrap();
    assert!(manifest.lookup("dashboard").is_some());
}

#[test]
fn load_reports_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = Manifest::load(&dir.path().join("absent.toml"));
    assert!(matches!(result, Err(ManifestError::Io { .. })));
}
