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
fn assert_with_no_arguments_always_passes() {
    let mut i = interp();
    let out = call(Builtin::Assert, &[], &mut i);
    assert_eq!(value(out), Tag::void_return());
}

#[test]
fn assert_with_a_truthy_condition_passes() {
    let mut i = interp();
    let out = call(Builtin::Assert, &[Tag::integer(1)], &mut i);
    assert_eq!(value(out), Tag::void_return());
}

#[test]
fn assert_with_a_falsy_condition_raises_the_remaining_arguments_as_the_message() {
    let mut i = interp();
    let msg = crate::coercion::alloc_string_tag(&mut i.heap, "boom");
    let out = call(Builtin::Assert, &[Tag::integer(0), msg], &mut i);
    match out {
        Outcome::Exception(message) => assert_eq!(message, "boom"),
        _ => panic!("expected an exception"),
    }
}

#[test]
fn random_with_no_arguments_is_deterministic_given_the_same_step() {
    let mut a = interp();
    let mut b = interp();
    let out_a = value(call(Builtin::Random, &[], &mut a));
    let out_b = value(call(Builtin::Random, &[], &mut b));
    assert_eq!(out_a, out_b);
}

#[test]
fn random_with_one_argument_stays_within_bounds() {
    let mut i = interp();
    let out = value(call(Builtin::Random, &[Tag::integer(10)], &mut i));
    let n = out.decode_integer();
    assert!((0..=10).contains(&n));
}

#[test]
fn not_negates_truthiness() {
    let mut i = interp();
    let out = value(call(Builtin::Not, &[Tag::integer(0)], &mut i));
    assert_eq!(out, Tag::integer(1));
}

#[test]
fn or_short_circuits_on_the_first_truthy_argument() {
    let mut i = interp();
    let out = value(call(Builtin::Or, &[Tag::integer(0), Tag::integer(5)], &mut i));
    assert_eq!(out, Tag::integer(1));
}

#[test]
fn and_is_false_with_zero_arguments() {
    let mut i = interp();
    let out = value(call(Builtin::And, &[], &mut i));
    assert_eq!(out, Tag::integer(0));
}

#[test]
fn and_requires_every_argument_to_be_truthy() {
    let mut i = interp();
    let out = value(call(Builtin::And, &[Tag::integer(1), Tag::integer(0)], &mut i));
    assert_eq!(out, Tag::integer(0));
}

#[test]
fn call_dispatches_to_a_builtin_by_name() {
    let mut i = interp();
    let name = crate::coercion::alloc_string_tag(&mut i.heap, "+");
    let out = value(call(Builtin::Call, &[name, Tag::integer(2), Tag::integer(3)], &mut i));
    assert_eq!(out, Tag::integer(5));
}

#[test]
fn call_reports_an_undefined_function_by_name() {
    let mut i = interp();
    let name = crate::coercion::alloc_string_tag(&mut i.heap, "no-such-function");
    let out = call(Builtin::Call, &[name], &mut i);
    assert!(matches!(out, Outcome::Exception(_)));
}

#[test]
fn send_serializes_its_payload_as_an_outcome() {
    let mut i = interp();
    let target = crate::coercion::alloc_string_tag(&mut i.heap, "worker");
    let out = call(Builtin::Send, &[target, Tag::integer(42)], &mut i);
    match out {
        Outcome::Send { payload, .. } => assert!(!payload.is_empty()),
        _ => panic!("expected a send outcome"),
    }
}

#[test]
fn wait_suspends_when_no_message_has_arrived() {
    let mut i = interp();
    let target = crate::coercion::alloc_string_tag(&mut i.heap, "channel");
    let out = call(Builtin::Wait, &[target], &mut i);
    assert!(matches!(out, Outcome::Wait { .. }));
}

#[test]
fn wait_resolves_synchronously_once_a_message_is_already_queued() {
    let mut i = interp();
    let crushed = mira_core::crushed_name("channel");
    let mut bytes = Vec::new();
    mira_serde::encode(&i.heap, Tag::integer(7), &mut bytes).expect("scalar always encodes");
    i.mailbox.push_back((crushed, bytes));
    let target = crate::coercion::alloc_string_tag(&mut i.heap, "channel");
    let out = value(call(Builtin::Wait, &[target], &mut i));
    assert_eq!(out, Tag::integer(7));
}

#[test]
fn import_requests_a_spawn_with_the_given_path() {
    let mut i = interp();
    let path = crate::coercion::alloc_string_tag(&mut i.heap, "other.mira");
    let out = call(Builtin::Import, &[path], &mut i);
    match out {
        Outcome::Spawn { path } => assert_eq!(path, b"other.mira"),
        _ => panic!("expected a spawn outcome"),
    }
}
