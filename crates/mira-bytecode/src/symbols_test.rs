// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Mira Project Contributors

use super::*;

#[test]
fn parse_and_get_round_trip() {
    let mut table = SymbolTable::new();
    table.insert(0x1234, "foo".into());
    table.insert(0x5678, "bar".into());

    let bytes = table.to_bytes();
    let parsed = SymbolTable::parse(&bytes).unwrap();

    assert_eq!(parsed.get(0x1234), Some("foo"));
    assert_eq!(parsed.get(0x5678), Some("bar"));
}

#[test]
fn unknown_symbol_renders_with_hash() {
    let table = SymbolTable::new();
    assert_eq!(table.render(0x0000_00ab), "<unknown> 0x000000ab");
}

#[test]
fn known_symbol_renders_its_name() {
    let mut table = SymbolTable::new();
    table.insert(42, "answer".into());
    assert_eq!(table.render(42), "answer");
}

#[test]
fn parse_rejects_truncated_records() {
    let bytes = vec![0u8; 4];
    assert_eq!(SymbolTable::parse(&bytes).unwrap_err(), SymbolLoadError::Truncated);
}

#[test]
fn parse_rejects_invalid_utf8_bodies() {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(&1u32.to_be_bytes());
    bytes.extend_from_slice(&2u32.to_be_bytes());
    bytes.extend_from_slice(&[0xff, 0xfe]);
    assert_eq!(SymbolTable::parse(&bytes).unwrap_err(), SymbolLoadError::InvalidUtf8);
}
