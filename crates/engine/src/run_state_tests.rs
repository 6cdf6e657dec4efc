// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

fn state() -> RunState {
    RunState::new(Instant::now())
}

#[test]
fn attempts_are_counted_per_unit() {
    let mut state = state();
    let a = UnitId::from("a");
    let b = UnitId::from("b");

    assert_eq!(state.record_attempt(&a), 1);
    assert_eq!(state.record_attempt(&a), 2);
    assert_eq!(state.record_attempt(&b), 1);
    assert_eq!(state.attempts_for(&a), 2);
    assert_eq!(state.attempts_for(&UnitId::from("c")), 0);
}

#[test]
fn success_dedupes_units_but_counts_slots() {
    let mut state = state();
    let a = UnitId::from("a");

    assert_eq!(state.record_success(&a), 1);
    assert_eq!(state.record_success(&a), 2);

    assert_eq!(state.loaded_units, vec![a.clone()]);
    assert_eq!(state.loaded_slots(), 2);
    assert!(state.is_loaded(&a));
}

#[test]
fn failures_are_deduped_in_order() {
    let mut state = state();
    state.record_failure(&UnitId::from("b"));
    state.record_failure(&UnitId::from("a"));
    state.record_failure(&UnitId::from("b"));

    assert_eq!(
        state.failed_units,
        vec![UnitId::from("b"), UnitId::from("a")]
    );
}

#[test]
fn running_status_is_running() {
    assert!(RunStatus::Running { phase_index: 2 }.is_running());
    assert!(!RunStatus::Idle.is_running());
    assert!(!RunStatus::Completed.is_running());
    assert!(!RunStatus::Aborted.is_running());
}

#[test]
fn report_flags_failures() {
    let report = RunReport {
        status: RunStatus::Completed,
        total_time: Duration::ZERO,
        loaded_units: vec![UnitId::from("a")],
        failed_units: vec![UnitId::from("widget")],
        phases: vec![],
    };
    assert!(report.is_complete());
    assert!(report.has_failures());

    let aborted = RunReport {
        status: RunStatus::Aborted,
        failed_units: vec![],
        ..report
    };
    assert!(!aborted.is_complete());
    assert!(aborted.has_failures());
}
