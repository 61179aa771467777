// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Mira Project Contributors

use super::*;

#[test]
fn same_step_counter_always_produces_the_same_value() {
    assert_eq!(int_random(42), int_random(42));
    assert_eq!(random_at_most(42, 10), random_at_most(42, 10));
    assert_eq!(ranged_random(42, 3, 9), ranged_random(42, 3, 9));
}

#[test]
fn different_step_counters_usually_differ() {
    assert_ne!(int_random(1), int_random(2));
}

#[test]
fn random_at_most_stays_in_bounds() {
    for step in 0..200 {
        let value = random_at_most(step, 10);
        assert!((0..=10).contains(&value), "value {value} out of bounds for step {step}");
    }
}

#[test]
fn random_at_most_with_non_positive_bound_is_always_zero() {
    assert_eq!(random_at_most(5, 0), 0);
    assert_eq!(random_at_most(5, -3), 0);
}

#[test]
fn ranged_random_stays_within_the_given_bounds() {
    for step in 0..200 {
        let value = ranged_random(step, -5, 5);
        assert!((-5..=5).contains(&value), "value {value} out of bounds for step {step}");
    }
}

#[test]
fn ranged_random_tolerates_descending_bounds() {
    for step in 0..50 {
        let value = ranged_random(step, 9, 2);
        assert!((2..=9).contains(&value));
    }
}

#[test]
fn ranged_random_with_equal_bounds_returns_that_bound() {
    assert_eq!(ranged_random(7, 4, 4), 4);
}

#[test]
fn distinct_argument_counts_use_distinct_seed_streams() {
    assert_ne!(int_random(42) as i64, i64::from(random_at_most(42, i32::MAX)));
}
