// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use proptest::prelude::*;
use yare::parameterized;

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

#[parameterized(
    first = { 0, 50 },
    second = { 1, 100 },
    third = { 2, 200 },
    fourth = { 3, 400 },
    capped = { 6, 2000 },
    far_past_cap = { 40, 2000 },
)]
fn default_schedule(attempt: u32, expected_ms: u64) {
    assert_eq!(Backoff::default().delay(attempt), ms(expected_ms));
}

#[test]
fn schedule_yields_first_four_delays() {
    let delays: Vec<_> = Backoff::new(ms(50), ms(2000)).schedule(4).collect();
    assert_eq!(delays, vec![ms(50), ms(100), ms(200), ms(400)]);
}

#[test]
fn cap_below_base_always_returns_cap() {
    let backoff = Backoff::new(ms(500), ms(100));
    assert_eq!(backoff.delay(0), ms(100));
    assert_eq!(backoff.delay(5), ms(100));
}

#[test]
fn huge_base_saturates_to_cap() {
    let backoff = Backoff::new(Duration::MAX, ms(10));
    assert_eq!(backoff.delay(3), ms(10));
}

proptest! {
    #[test]
    fn delays_never_exceed_cap(base in 0u64..10_000, cap in 0u64..60_000, attempt in 0u32..64) {
        let backoff = Backoff::new(ms(base), ms(cap));
        prop_assert!(backoff.delay(attempt) <= ms(cap));
    }

    #[test]
    fn delays_are_monotonic(base in 1u64..10_000, cap in 1u64..60_000, attempt in 0u32..63) {
        let backoff = Backoff::new(ms(base), ms(cap));
        prop_assert!(backoff.delay(attempt) <= backoff.delay(attempt + 1));
    }
}
