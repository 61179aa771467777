// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Mira Project Contributors

//! The collaborator contract the (de)serializer needs from whatever is
//! holding the arena and its containers.
//!
//! Mira's container redesign (see `mira-containers`) keeps a `Vector` or
//! `ArenaHashMap`'s own bookkeeping in ordinary Rust memory - only element
//! bytes live in the arena. A [`mira_core::Tag`] pointer kind therefore
//! can't carry a raw arena offset as its payload the way the original's
//! fully arena-resident structures could; instead it carries an index into
//! a per-kind object table that the interpreter process owns. `ValueHost`
//! is that table's read/write contract, so this crate can encode and
//! decode values without depending on `mira-vm`'s concrete process type.

#[cfg(any(test, feature = "std"))]
use std::vec::Vec;

#[cfg(not(any(test, feature = "std")))]
use alloc::vec::Vec;

use mira_arena::Arena;
use mira_containers::{ArenaHashMap, MutString, Vector};
use mira_core::Tag;

#[cfg(test)]
mod host_test;

/// Read/write access to one process's arena and its live vectors, maps and
/// dynamic strings, addressed by the object-table index carried in each
/// allocated [`Tag`]'s payload.
pub trait ValueHost {
    fn arena(&self) -> &Arena;
    fn arena_mut(&mut self) -> &mut Arena;

    fn alloc_string(&mut self, contents: &str) -> u32;
    fn string_bytes(&self, handle: u32) -> Option<Vec<u8>>;

    fn alloc_vector(&mut self) -> u32;
    fn vector_len(&self, handle: u32) -> Option<usize>;
    fn vector_get(&self, handle: u32, index: usize) -> Option<Tag>;
    fn vector_push(&mut self, handle: u32, value: Tag) -> bool;

    fn alloc_map(&mut self) -> u32;
    /// Every `(crushed-key, value)` pair currently in the map. Original key
    /// text isn't retained - see the `mira-serde` design note on map key
    /// encoding.
    fn map_entries(&self, handle: u32) -> Vec<(u32, Tag)>;
    fn map_insert(&mut self, handle: u32, crushed_key: u32, value: Tag) -> bool;
}

/// A minimal, concrete [`ValueHost`] used by this crate's own tests and
/// available to any caller that just needs one arena and three object
/// tables without a full interpreter process around them.
pub struct ObjectTable {
    arena: Arena,
    strings: Vec<MutString>,
    vectors: Vec<Vector<Tag>>,
    maps: Vec<ArenaHashMap<u32, Tag>>,
}

impl ObjectTable {
    #[must_use]
    pub fn new(arena: Arena) -> Self {
        Self { arena, strings: Vec::new(), vectors: Vec::new(), maps: Vec::new() }
    }
}

impl ValueHost for ObjectTable {
    fn arena(&self) -> &Arena {
        &self.arena
    }

    fn arena_mut(&mut self) -> &mut Arena {
        &mut self.arena
    }

    fn alloc_string(&mut self, contents: &str) -> u32 {
        let s = MutString::from_str(&mut self.arena, contents);
        self.strings.push(s);
        #[allow(clippy::cast_possible_truncation)]
        let handle = (self.strings.len() - 1) as u32;
        handle
    }

    fn string_bytes(&self, handle: u32) -> Option<Vec<u8>> {
        let s = self.strings.get(handle as usize)?;
        let mut out = Vec::with_capacity(s.len());
        for i in 0..s.len() {
            out.push(s.char_at(&self.arena, i as i64)?);
        }
        Some(out)
    }

    fn alloc_vector(&mut self) -> u32 {
        self.vectors.push(Vector::new());
        #[allow(clippy::cast_possible_truncation)]
        let handle = (self.vectors.len() - 1) as u32;
        handle
    }

    fn vector_len(&self, handle: u32) -> Option<usize> {
        Some(self.vectors.get(handle as usize)?.len())
    }

    fn vector_get(&self, handle: u32, index: usize) -> Option<Tag> {
        self.vectors.get(handle as usize)?.get(&self.arena, index)
    }

    fn vector_push(&mut self, handle: u32, value: Tag) -> bool {
        let Some(v) = self.vectors.get_mut(handle as usize) else { return false };
        v.push(&mut self.arena, value)
    }

    fn alloc_map(&mut self) -> u32 {
        let m = ArenaHashMap::new(&mut self.arena, 16);
        self.maps.push(m);
        #[allow(clippy::cast_possible_truncation)]
        let handle = (self.maps.len() - 1) as u32;
        handle
    }

    fn map_entries(&self, handle: u32) -> Vec<(u32, Tag)> {
        self.maps.get(handle as usize).map_or_else(Vec::new, |m| m.entries(&self.arena))
    }

    fn map_insert(&mut self, handle: u32, crushed_key: u32, value: Tag) -> bool {
        let Some(m) = self.maps.get_mut(handle as usize) else { return false };
        m.put(&mut self.arena, crushed_key, value, true)
    }
}
