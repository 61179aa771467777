// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Mira Project Contributors

use super::*;

#[test]
fn numeric_kinds_carry_the_numeric_bit() {
    assert!(Kind::Integer.is_numeric());
    assert!(Kind::Fraction.is_numeric());
    assert!(!Kind::VariableRef.is_numeric());
    assert!(!Kind::HashMapPtr.is_numeric());
}

#[test]
fn allocated_kinds_carry_the_allocated_bit() {
    assert!(Kind::HashMapPtr.is_allocated());
    assert!(Kind::VectorPtr.is_allocated());
    assert!(Kind::DynStringPtr.is_allocated());
    assert!(!Kind::SmallString.is_allocated());
    assert!(!Kind::Integer.is_allocated());
}

#[test]
fn must_wait_sets_both_bits() {
    // MustWait = 250 = 0xfa, which happens to overlap both flag bits.
    // It still reads as neither numeric nor an arena handle in practice,
    // since the interpreter special-cases it before looking at either bit.
    assert!(Kind::MustWait.is_allocated());
    assert!(Kind::MustWait.is_numeric());
}

#[test]
fn from_u8_round_trips_every_known_kind() {
    let kinds = [
        Kind::Invalid,
        Kind::VariableRef,
        Kind::Opcode,
        Kind::EndOfProgram,
        Kind::EndOfSubProgram,
        Kind::NotAResult,
        Kind::Exception,
        Kind::Void,
        Kind::Unit,
        Kind::VectorIndex,
        Kind::DebugStringPtr,
        Kind::SmallString,
        Kind::StaticStringPtr,
        Kind::Integer,
        Kind::Fraction,
        Kind::HashMapPtr,
        Kind::VectorPtr,
        Kind::DynStringPtr,
        Kind::MustWait,
        Kind::Flag,
    ];

    for kind in kinds {
        assert_eq!(Kind::from_u8(kind as u8), Some(kind), "{kind:?}");
    }
}

#[test]
fn from_u8_rejects_unassigned_bytes() {
    assert_eq!(Kind::from_u8(9), None);
    assert_eq!(Kind::from_u8(100), None);
}
