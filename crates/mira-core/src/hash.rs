// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Mira Project Contributors

#[cfg(test)]
mod hash_test;

/// Crushes a variable or function name down to the 32-bit hash stored in a
/// [`crate::Tag::encode_variable_ref`]. Two names collide only if this hash
/// does - the runtime never stores the original string alongside the
/// reference, only in an optional debug symbol table.
///
/// Never returns zero, since zero is reserved to mean "no cached hash" by
/// callers that memoise this on a mutable string.
#[must_use]
pub fn crushed_name(name: &str) -> u32 {
    let len = name.len() as u32;
    let mut hash = len;
    for &byte in name.as_bytes() {
        hash = hash.wrapping_add(u32::from(byte));
        hash ^= hash >> 16;
        hash = hash.wrapping_mul(0x7feb_352d);
        hash ^= hash >> 15;
        hash = hash.wrapping_mul(0x846c_a68b);
        hash ^= hash >> 16;
    }
    hash ^= len;
    hash ^= hash >> 16;
    hash = hash.wrapping_mul(0x7feb_352d);
    hash ^= hash >> 15;
    hash = hash.wrapping_mul(0x846c_a68b);
    hash ^= hash >> 16;
    hash = hash.wrapping_add(len);

    if hash == 0 {
        0x0080_0800
    } else {
        hash
    }
}

/// The synthetic crushed name used for the `i`-th positional parameter of a
/// call frame. Deliberately not a real string hash: positional parameters
/// have no source-level name to crush, so a scope instead reserves this
/// small family of values, one per argument position.
///
/// The low bit is always set, which keeps every positional name odd and
/// distinguishable (in practice, not by any enforced invariant) from the
/// even hashes [`crushed_name`] tends to produce for short identifiers.
#[must_use]
pub const fn position_name(index: u32) -> u32 {
    let h = (index << 16).wrapping_add(index);
    h | 0x8000_0001
}
