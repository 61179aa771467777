// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Mira Project Contributors

use mira_core::Tag;

use super::*;
use crate::interpreter::Interpreter;

fn interp() -> Interpreter {
    Interpreter::new(1)
}

fn value(outcome: Outcome) -> Tag {
    match outcome {
        Outcome::Value(tag) => tag,
        Outcome::Exception(msg) => panic!("unexpected exception: {msg}"),
        _ => panic!("unexpected non-value outcome"),
    }
}

#[test]
fn addition_folds_over_all_arguments() {
    let mut i = interp();
    let out = call(Builtin::Add, &[Tag::integer(2), Tag::integer(3), Tag::integer(4)], &mut i);
    assert_eq!(value(out), Tag::integer(9));
}

#[test]
fn unary_subtract_negates() {
    let mut i = interp();
    let out = call(Builtin::Subtract, &[Tag::integer(5)], &mut i);
    assert_eq!(value(out), Tag::integer(-5));
}

#[test]
fn binary_subtract_folds_left() {
    let mut i = interp();
    let out = call(Builtin::Subtract, &[Tag::integer(10), Tag::integer(3), Tag::integer(2)], &mut i);
    assert_eq!(value(out), Tag::integer(5));
}

#[test]
fn unary_multiply_is_an_error() {
    let mut i = interp();
    let out = call(Builtin::Multiply, &[Tag::integer(5)], &mut i);
    assert!(matches!(out, Outcome::Exception(_)));
}

#[test]
fn unary_divide_is_an_error() {
    let mut i = interp();
    let out = call(Builtin::Divide, &[Tag::integer(5)], &mut i);
    assert!(matches!(out, Outcome::Exception(_)));
}

#[test]
fn division_by_zero_is_an_error() {
    let mut i = interp();
    let out = call(Builtin::Divide, &[Tag::integer(5), Tag::integer(0)], &mut i);
    assert!(matches!(out, Outcome::Exception(_)));
}

#[test]
fn division_truncates_toward_zero() {
    let mut i = interp();
    let out = call(Builtin::Divide, &[Tag::integer(7), Tag::integer(2)], &mut i);
    assert_eq!(value(out), Tag::integer(3));
}

#[test]
fn remainder_folds_left() {
    let mut i = interp();
    let out = call(Builtin::Remainder, &[Tag::integer(10), Tag::integer(3)], &mut i);
    assert_eq!(value(out), Tag::integer(1));
}

#[test]
fn no_arguments_is_an_error() {
    let mut i = interp();
    let out = call(Builtin::Add, &[], &mut i);
    assert!(matches!(out, Outcome::Exception(_)));
}
