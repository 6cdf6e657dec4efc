// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn render_substitutes_every_placeholder() {
    let loader = ShellUnitLoader::new("fetch {unit} && verify {unit}");
    assert_eq!(
        loader.render(&UnitId::from("lib/a.js")),
        "fetch lib/a.js && verify lib/a.js"
    );
}

#[tokio::test]
async fn zero_exit_loads_unit() {
    let loader = ShellUnitLoader::new("test -n '{unit}'");
    assert_eq!(loader.load(&UnitId::from("a.js")).await, Ok(()));
}

#[tokio::test]
async fn non_zero_exit_reports_code_and_stderr() {
    let loader = ShellUnitLoader::new("echo 'missing {unit}' >&2; exit 3");

    let err = loader.load(&UnitId::from("a.js")).await.unwrap_err();

    assert_eq!(
        err,
        UnitLoadError::CommandFailed {
            code: 3,
            stderr: "missing a.js".to_string()
        }
    );
}

#[tokio::test]
async fn runs_in_configured_directory() {
    let loader = ShellUnitLoader::new("test \"$(pwd)\" = {unit}").with_cwd("/");
    assert_eq!(loader.load(&UnitId::from("/")).await, Ok(()));
}
