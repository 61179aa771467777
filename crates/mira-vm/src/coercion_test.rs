// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Mira Project Contributors

use mira_arena::{Arena, ZONE_SIZE};
use mira_core::Kind;
use mira_serde::ObjectTable;

use super::*;

fn host() -> ObjectTable {
    ObjectTable::new(Arena::new(ZONE_SIZE as usize * 8))
}

#[test]
fn integers_are_truthy_unless_zero() {
    let h = host();
    assert!(to_boolean(Tag::integer(1), &h, None));
    assert!(!to_boolean(Tag::integer(0), &h, None));
}

#[test]
fn empty_and_false_strings_are_falsy() {
    let mut h = host();
    let empty = alloc_string_tag(&mut h, "");
    let word_false = alloc_string_tag(&mut h, "false");
    let zero = alloc_string_tag(&mut h, "0");
    let other = alloc_string_tag(&mut h, "no");
    assert!(!to_boolean(empty, &h, None));
    assert!(!to_boolean(word_false, &h, None));
    assert!(!to_boolean(zero, &h, None));
    assert!(to_boolean(other, &h, None));
}

#[test]
fn sentinel_kinds_are_always_falsy() {
    let h = host();
    assert!(!to_boolean(Tag::non_result(), &h, None));
    assert!(!to_boolean(Tag::void_return(), &h, None));
    assert!(!to_boolean(Tag::unit_return(), &h, None));
    assert!(!to_boolean(Tag::invalid(), &h, None));
}

#[test]
fn allocated_pointers_are_truthy() {
    let mut h = host();
    let handle = h.alloc_vector();
    let tag = Tag::encode_pointer(Kind::VectorPtr, handle);
    assert!(to_boolean(tag, &h, None));
}

#[test]
fn fraction_truncates_toward_zero_when_cast_to_integer() {
    let h = host();
    assert_eq!(to_integer(Tag::fraction(3.9), &h, None), 3);
    assert_eq!(to_integer(Tag::fraction(-3.9), &h, None), -3);
}

#[test]
fn unparsable_strings_coerce_to_zero() {
    let mut h = host();
    let tag = alloc_string_tag(&mut h, "not a number");
    assert_eq!(to_integer(tag, &h, None), 0);
    assert_eq!(to_double(tag, &h, None), 0.0);
}

#[test]
fn parsable_strings_coerce_to_their_numeric_value() {
    let mut h = host();
    let tag = alloc_string_tag(&mut h, "  42  ");
    assert_eq!(to_integer(tag, &h, None), 42);
    let tag = alloc_string_tag(&mut h, "3.5");
    assert!((to_double(tag, &h, None) - 3.5).abs() < 1e-9);
}

#[test]
fn integers_and_fractions_format_as_decimal_strings() {
    let h = host();
    assert_eq!(to_string(Tag::integer(-7), &h, None), "-7");
    assert_eq!(to_string(Tag::fraction(2.0), &h, None), "2");
}

#[test]
fn small_strings_round_trip_through_to_string() {
    let h = host();
    let tag = Tag::encode_short_str("hi");
    assert_eq!(to_string(tag, &h, None), "hi");
}

#[test]
fn sentinel_kinds_render_as_a_stable_marker() {
    let h = host();
    assert_eq!(to_string(Tag::non_result(), &h, None), "<not-a-result>");
    assert_eq!(to_string(Tag::void_return(), &h, None), "<void>");
    assert_eq!(to_string(Tag::unit_return(), &h, None), "<unit>");
    assert_eq!(to_string(Tag::invalid(), &h, None), "<invalid>");
}

#[test]
fn vectors_stringify_their_elements_recursively() {
    let mut h = host();
    let handle = h.alloc_vector();
    h.vector_push(handle, Tag::integer(1));
    h.vector_push(handle, Tag::integer(2));
    let tag = Tag::encode_pointer(Kind::VectorPtr, handle);
    assert_eq!(to_string(tag, &h, None), "[1 2]");
}

#[test]
fn casting_never_mutates_the_source_tag() {
    let h = host();
    let tag = Tag::integer(5);
    let before = tag;
    let _ = to_string(tag, &h, None);
    let _ = to_integer(tag, &h, None);
    assert_eq!(tag, before);
}
