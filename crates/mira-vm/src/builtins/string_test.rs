// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Mira Project Contributors

use mira_core::Tag;

use super::*;
use crate::coercion::to_string;
use crate::interpreter::Interpreter;

fn interp() -> Interpreter {
    Interpreter::new(1)
}

fn as_string(outcome: Outcome, interp: &Interpreter) -> String {
    match outcome {
        Outcome::Value(tag) => to_string(tag, &interp.heap, interp.chunk()),
        Outcome::Exception(msg) => panic!("unexpected exception: {msg}"),
        _ => panic!("unexpected non-value outcome"),
    }
}

#[test]
fn concat_joins_every_argument_as_a_string() {
    let mut i = interp();
    let a = alloc_string_tag(&mut i.heap, "foo");
    let b = alloc_string_tag(&mut i.heap, "bar");
    let out = call(Builtin::Concat, &[a, b], &mut i);
    assert_eq!(as_string(out, &i), "foobar");
}

#[test]
fn substring_with_two_args_takes_everything_from_the_offset() {
    let mut i = interp();
    let s = alloc_string_tag(&mut i.heap, "hello world");
    let out = call(Builtin::Substring, &[s, Tag::integer(6)], &mut i);
    assert_eq!(as_string(out, &i), "world");
}

#[test]
fn substring_with_three_args_takes_an_explicit_length() {
    let mut i = interp();
    let s = alloc_string_tag(&mut i.heap, "hello world");
    let out = call(Builtin::Substring, &[s, Tag::integer(0), Tag::integer(5)], &mut i);
    assert_eq!(as_string(out, &i), "hello");
}

#[test]
fn length_counts_bytes() {
    let mut i = interp();
    let s = alloc_string_tag(&mut i.heap, "hello");
    let out = call(Builtin::Length, &[s], &mut i);
    match out {
        Outcome::Value(tag) => assert_eq!(tag, Tag::integer(5)),
        _ => panic!("expected a value"),
    }
}

#[test]
fn replace_substitutes_every_occurrence() {
    let mut i = interp();
    let src = alloc_string_tag(&mut i.heap, "a-b-a");
    let old = alloc_string_tag(&mut i.heap, "a");
    let new = alloc_string_tag(&mut i.heap, "x");
    let out = call(Builtin::Replace, &[src, old, new], &mut i);
    assert_eq!(as_string(out, &i), "x-b-x");
}

#[test]
fn print_appends_a_newline_after_non_empty_output() {
    let mut i = interp();
    let s = alloc_string_tag(&mut i.heap, "hi");
    call(Builtin::Print, &[s], &mut i);
    assert_eq!(i.output, "hi\n");
}

#[test]
fn print_skips_the_newline_after_an_empty_final_argument() {
    let mut i = interp();
    let empty = alloc_string_tag(&mut i.heap, "");
    call(Builtin::Print, &[empty], &mut i);
    assert_eq!(i.output, "");
}

#[test]
fn read_key_waits_when_input_is_empty() {
    let mut i = interp();
    let out = call(Builtin::ReadKey, &[], &mut i);
    assert!(matches!(out, Outcome::MustWait));
}

#[test]
fn read_key_dequeues_one_byte() {
    let mut i = interp();
    i.input.push_back(b'X');
    i.input.push_back(b'Y');
    let out = call(Builtin::ReadKey, &[], &mut i);
    assert_eq!(as_string(out, &i), "X");
    assert_eq!(i.input.len(), 1);
}

#[test]
fn read_line_waits_until_a_newline_is_buffered() {
    let mut i = interp();
    i.input.push_back(b'h');
    i.input.push_back(b'i');
    let out = call(Builtin::ReadLine, &[], &mut i);
    assert!(matches!(out, Outcome::MustWait));
}

#[test]
fn read_line_dequeues_up_to_but_not_including_the_newline() {
    let mut i = interp();
    for b in b"hello\n" {
        i.input.push_back(*b);
    }
    let out = call(Builtin::ReadLine, &[], &mut i);
    assert_eq!(as_string(out, &i), "hello");
    assert_eq!(i.input.front(), Some(&b'\n'));
}
