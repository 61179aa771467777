// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Mira Project Contributors

#[cfg(any(test, feature = "std"))]
use std::vec::Vec;

#[cfg(not(any(test, feature = "std")))]
use alloc::vec::Vec;

#[cfg(test)]
mod mut_string_test;

use mira_arena::Arena;

use crate::vector::Vector;

/// A mutable, arena-resident ASCII string, backed by a byte [`Vector`].
///
/// Every mutation invalidates the cached hash (set to `0`, which
/// [`crushed_name`](mira_core::crushed_name) never produces for real
/// content) so the next [`MutString::hash`] call recomputes it.
pub struct MutString {
    chars: Vector<u8>,
    hash: u32,
}

impl MutString {
    #[must_use]
    pub fn new() -> Self {
        Self { chars: Vector::new(), hash: 0 }
    }

    #[must_use]
    pub fn from_str(arena: &mut Arena, s: &str) -> Self {
        let mut chars = Vector::new();
        for b in s.bytes() {
            chars.push(arena, b);
        }
        Self { chars, hash: 0 }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Returns the byte at `index`; negative indices count from the end.
    #[must_use]
    pub fn char_at(&self, arena: &Arena, index: i64) -> Option<u8> {
        let len = self.chars.len() as i64;
        let idx = if index < 0 { index + len } else { index };
        if idx < 0 {
            return None;
        }
        self.chars.get(arena, idx as usize)
    }

    pub fn append_str(&mut self, arena: &mut Arena, s: &str) {
        for b in s.bytes() {
            self.chars.push(arena, b);
        }
        self.hash = 0;
    }

    pub fn append(&mut self, arena: &mut Arena, other: &MutString) {
        for i in 0..other.chars.len() {
            if let Some(b) = other.chars.get(arena, i) {
                self.chars.push(arena, b);
            }
        }
        self.hash = 0;
    }

    /// Upper-case ASCII letters are folded to lower case in place; other
    /// bytes are left untouched (7-bit ASCII only, matching the source
    /// this was ported from).
    pub fn to_lower(&mut self, arena: &mut Arena) {
        for i in 0..self.chars.len() {
            if let Some(b) = self.chars.get(arena, i) {
                if b.is_ascii_uppercase() {
                    self.chars.set(arena, i, b + 0x20);
                }
            }
        }
        self.hash = 0;
    }

    pub fn to_upper(&mut self, arena: &mut Arena) {
        for i in 0..self.chars.len() {
            if let Some(b) = self.chars.get(arena, i) {
                if b.is_ascii_lowercase() {
                    self.chars.set(arena, i, b - 0x20);
                }
            }
        }
        self.hash = 0;
    }

    #[must_use]
    pub fn starts_with(&self, arena: &Arena, needle: &str) -> bool {
        if needle.len() > self.chars.len() {
            return false;
        }
        needle.bytes().enumerate().all(|(i, nb)| self.chars.get(arena, i) == Some(nb))
    }

    #[must_use]
    pub fn ends_with(&self, arena: &Arena, needle: &str) -> bool {
        let len = self.chars.len();
        if needle.len() > len {
            return false;
        }
        let offset = len - needle.len();
        needle.bytes().enumerate().all(|(i, nb)| self.chars.get(arena, offset + i) == Some(nb))
    }

    #[must_use]
    pub fn equals(&self, arena: &Arena, other: &str) -> bool {
        self.chars.len() == other.len() && self.starts_with(arena, other)
    }

    /// Finds the first occurrence of `needle` at or after `start`.
    #[must_use]
    pub fn find(&self, arena: &Arena, needle: &str, start: usize) -> Option<usize> {
        if needle.is_empty() {
            return Some(start);
        }
        let hay_len = self.chars.len();
        let needle_len = needle.len();
        if needle_len > hay_len || start > hay_len - needle_len {
            return None;
        }
        for i in start..=(hay_len - needle_len) {
            if needle.bytes().enumerate().all(|(j, nb)| self.chars.get(arena, i + j) == Some(nb)) {
                return Some(i);
            }
        }
        None
    }

    /// Returns the cached hash, recomputing it first if content changed
    /// since the last call.
    pub fn hash(&mut self, arena: &Arena) -> u32 {
        if self.hash != 0 {
            return self.hash;
        }
        let mut buf = Vec::with_capacity(self.chars.len());
        for i in 0..self.chars.len() {
            if let Some(b) = self.chars.get(arena, i) {
                buf.push(b);
            }
        }
        let s = core::str::from_utf8(&buf).unwrap_or("");
        self.hash = mira_core::crushed_name(s);
        self.hash
    }

    pub fn clear(&mut self, arena: &mut Arena) {
        self.chars.clear(arena);
        self.hash = 0;
    }
}

impl Default for MutString {
    fn default() -> Self {
        Self::new()
    }
}
