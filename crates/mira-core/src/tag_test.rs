// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Mira Project Contributors

use proptest::prelude::*;

use super::*;

#[test]
fn control_tags_are_invalid_results() {
    assert!(!Tag::invalid().is_valid());
    assert!(!Tag::non_result().is_valid());
    assert!(!Tag::void_return().is_valid());
}

#[test]
fn unit_and_exception_are_valid_results() {
    assert!(Tag::unit_return().is_valid());
    assert!(Tag::runtime_error(42).is_valid());
}

#[test]
fn integer_round_trips() {
    for v in [0, 1, -1, i32::MIN, i32::MAX, 12345] {
        let t = Tag::integer(v);
        assert_eq!(t.kind(), Some(Kind::Integer));
        assert_eq!(t.decode_integer(), v);
        assert!(t.is_numeric());
        assert!(!t.is_allocated());
    }
}

#[test]
fn fraction_round_trips_within_fixed_point_precision() {
    for v in [0.0, 1.0, -1.0, 0.5, 3.25, -12.75] {
        let t = Tag::fraction(v);
        assert_eq!(t.kind(), Some(Kind::Fraction));
        assert!((t.decode_fraction() - v).abs() < 1.0 / 65536.0);
    }
}

#[test]
fn opcode_round_trips_two_word_form() {
    let t = Tag::encode_opcode(b'+', b'-', 0x1234, 0x5678);
    let (class, action, p1, p2, p3) = t.decode_opcode();
    assert_eq!(class, b'+');
    assert_eq!(action, b'-');
    assert_eq!(p1, 0x1234);
    assert_eq!(p2, 0x5678);
    assert_eq!(p3, 0);
}

#[test]
fn opcode_round_trips_long_form() {
    let t = Tag::encode_long_opcode(b'c', b'a', 0xdead_beef);
    let (class, action, p1, p3) = t.decode_long_opcode();
    assert_eq!(class, b'c');
    assert_eq!(action, b'a');
    assert_eq!(p1, 0xdead_beef);
    assert_eq!(p3, 0);
}

#[test]
fn opcode_round_trips_wide_long_form() {
    let t = Tag::encode_wide_long_opcode(b'f', b'n', 0x0000_0042, 7);
    let (class, action, p1, p3) = t.decode_long_opcode();
    assert_eq!(class, b'f');
    assert_eq!(action, b'n');
    assert_eq!(p1, 0x0000_0042);
    assert_eq!(p3, 7);
}

#[test]
fn variable_ref_round_trips_through_a_name() {
    let (t, hash) = Tag::encode_variable_ref_named("counter");
    assert_eq!(t.kind(), Some(Kind::VariableRef));
    assert_eq!(t.decode_variable_ref(), hash);
}

#[test]
fn pointer_round_trips_for_each_allocated_kind() {
    for kind in [Kind::HashMapPtr, Kind::VectorPtr, Kind::DynStringPtr] {
        let t = Tag::encode_pointer(kind, 0x1000);
        assert_eq!(t.kind(), Some(kind));
        assert!(t.is_allocated());
        assert_eq!(t.decode_pointer(), 0x1000);
    }
}

#[test]
fn vector_index_carries_both_target_and_index() {
    let t = Tag::vector_index(0xcafe, 7);
    assert_eq!(t.kind(), Some(Kind::VectorIndex));
    assert_eq!(t.decode_pointer(), 0xcafe);
    assert_eq!(t.params(), 7);
}

#[test]
fn short_str_round_trips_up_to_seven_bytes() {
    let t = Tag::encode_short_str("mira");
    assert_eq!(t.kind(), Some(Kind::SmallString));
    assert_eq!(t.decode_short_str().as_str(), "mira");

    let t7 = Tag::encode_short_str("abcdefg");
    assert_eq!(t7.decode_short_str().as_str(), "abcdefg");
}

#[test]
fn short_str_truncates_past_seven_bytes() {
    let t = Tag::encode_short_str("abcdefgh");
    assert_eq!(t.decode_short_str().as_str(), "abcdefg");
}

#[test]
fn must_wait_carries_the_resume_position() {
    let t = Tag::must_wait(99);
    assert_eq!(t.kind(), Some(Kind::MustWait));
    assert_eq!(t.payload(), 99);
}

#[test]
fn from_raw_masks_params_to_24_bits() {
    let t = Tag::from_raw(Kind::VariableRef as u8, 0xffff_ffff, 1);
    assert_eq!(t.params(), 0x00ff_ffff);
}

#[test]
fn debug_formats_without_panicking_for_every_control_tag() {
    let tags = [
        Tag::invalid(),
        Tag::void_return(),
        Tag::unit_return(),
        Tag::non_result(),
        Tag::runtime_error(1),
        Tag::end_of_sub_program(),
        Tag::end_of_program(),
        Tag::must_wait(0),
        Tag::integer(-5),
        Tag::fraction(1.5),
        Tag::encode_short_str("hi"),
        Tag::from_raw(9, 0, 0),
    ];
    for t in tags {
        let rendered = format!("{t:?}");
        assert!(!rendered.is_empty());
    }
}

proptest! {
    #[test]
    fn integer_identity_law(v in any::<i32>()) {
        let t = Tag::integer(v);
        prop_assert_eq!(t, t);
        prop_assert_eq!(t.decode_integer(), v);
    }

    #[test]
    fn pointer_identity_law(target in any::<u32>()) {
        let t = Tag::encode_pointer(Kind::VectorPtr, target);
        prop_assert_eq!(t.decode_pointer(), target);
        prop_assert_ne!(t, Tag::encode_pointer(Kind::HashMapPtr, target));
    }
}
