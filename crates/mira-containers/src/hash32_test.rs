// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Mira Project Contributors

use super::*;

#[test]
fn u32_hashes_to_itself() {
    assert_eq!(42u32.hash32(), 42);
}

#[test]
fn i32_hashes_preserve_bit_pattern() {
    assert_eq!((-1i32).hash32(), u32::MAX);
}
