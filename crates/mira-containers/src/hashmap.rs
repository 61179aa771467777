// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Mira Project Contributors

#[cfg(any(test, feature = "std"))]
use std::vec::Vec;

#[cfg(not(any(test, feature = "std")))]
use alloc::vec::Vec;

#[cfg(test)]
mod hashmap_test;

use mira_arena::Arena;

use crate::hash32::Hash32;
use crate::vector::Vector;

/// Minimum bucket count for a new or shrunk map.
const MIN_BUCKET_SIZE: u32 = 64;
/// Load factor past which the bucket table grows.
const GROW_LOAD_FACTOR: f64 = 0.8;
/// A hash of zero marks an empty slot, so real hashes are nudged off zero.
const SAFE_HASH: u32 = 0x8000_0000;

fn safe_hash(raw: u32) -> u32 {
    if raw == 0 { SAFE_HASH } else { raw }
}

fn next_pow2(n: u32) -> u32 {
    n.next_power_of_two().max(1)
}

#[derive(Clone, Copy)]
struct Entry<K: Copy, V: Copy> {
    hash: u32,
    key: K,
    value: V,
}

/// A robin-hood open-addressed hash map with arena-resident buckets.
///
/// Entries are packed into their ideal bucket whenever possible; on
/// collision, whichever entry has probed furthest from its own ideal slot
/// keeps the slot and the other keeps looking (the usual robin-hood
/// balancing, which keeps worst-case probe length low without a free
/// list). The bucket table grows at 80% occupancy and can shrink back down
/// to a quarter full, bottoming out at [`MIN_BUCKET_SIZE`] buckets.
///
/// The bucket table is itself an arena-resident [`Vector`], so growing or
/// shrinking releases the old table's chunks back to the arena rather than
/// leaking them.
pub struct ArenaHashMap<K: Copy + PartialEq + Hash32, V: Copy> {
    buckets: Vector<Option<Entry<K, V>>>,
    count: u32,
    count_mod: u32,
    count_used: u32,
    grow_at: u32,
    shrink_at: u32,
}

impl<K: Copy + PartialEq + Hash32, V: Copy> ArenaHashMap<K, V> {
    /// Creates a map with at least `capacity_hint` buckets (rounded up to
    /// a power of two, never below [`MIN_BUCKET_SIZE`]).
    #[must_use]
    pub fn new(arena: &mut Arena, capacity_hint: usize) -> Self {
        let size = next_pow2((capacity_hint as u32).max(MIN_BUCKET_SIZE));
        let mut buckets = Vector::new();
        for _ in 0..size {
            buckets.push(arena, None);
        }
        Self {
            buckets,
            count: size,
            count_mod: size - 1,
            count_used: 0,
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            grow_at: (f64::from(size) * GROW_LOAD_FACTOR) as u32,
            shrink_at: size >> 2,
        }
    }

    #[must_use]
    pub fn len(&self) -> u32 {
        self.count_used
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count_used == 0
    }

    fn distance_to_init_index(&self, arena: &Arena, index_stored: u32) -> u32 {
        let Some(entry) = self.buckets.get(arena, index_stored as usize).flatten() else {
            return 0;
        };
        let index_init = entry.hash & self.count_mod;
        if index_init <= index_stored {
            index_stored - index_init
        } else {
            index_stored + (self.count - index_init)
        }
    }

    fn put_internal(&mut self, arena: &mut Arena, mut entry: Entry<K, V>, can_replace: bool, check_duplicates: bool) -> bool {
        let index_init = entry.hash & self.count_mod;
        let mut probe_current = 0u32;

        for i in 0..self.count {
            let index_current = (index_init + i) & self.count_mod;
            let Some(current) = self.buckets.get(arena, index_current as usize).flatten() else {
                self.count_used += 1;
                self.buckets.set(arena, index_current as usize, Some(entry));
                return true;
            };

            if check_duplicates && entry.hash == current.hash && entry.key == current.key {
                if !can_replace {
                    return false;
                }
                self.buckets.set(arena, index_current as usize, Some(entry));
                return true;
            }

            let probe_distance = self.distance_to_init_index(arena, index_current);
            if probe_current > probe_distance {
                probe_current = probe_distance;
                self.buckets.set(arena, index_current as usize, Some(entry));
                entry = current;
            }
            probe_current += 1;
        }
        false
    }

    fn grow_to(&mut self, arena: &mut Arena, new_size: u32) {
        let new_size = next_pow2(new_size.max(MIN_BUCKET_SIZE));
        let mut new_buckets = Vector::new();
        for _ in 0..new_size {
            new_buckets.push(arena, None);
        }

        let old_count = self.count;
        let mut old_buckets = core::mem::replace(&mut self.buckets, new_buckets);
        self.count = new_size;
        self.count_mod = new_size - 1;
        self.count_used = 0;
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        {
            self.grow_at = (f64::from(new_size) * GROW_LOAD_FACTOR) as u32;
        }
        self.shrink_at = new_size >> 2;

        for i in 0..old_count {
            if let Some(e) = old_buckets.get(arena, i as usize).flatten() {
                self.put_internal(arena, e, true, false);
            }
        }
        old_buckets.clear(arena);
    }

    /// Inserts `key` → `value`. If `key` is already present, replaces its
    /// value only when `can_replace` is true (matching a `Scope`'s
    /// "overwrite" vs. "define new" distinction).
    pub fn put(&mut self, arena: &mut Arena, key: K, value: V, can_replace: bool) -> bool {
        if self.count_used >= self.grow_at {
            self.grow_to(arena, self.count * 2);
        }
        let hash = safe_hash(key.hash32());
        self.put_internal(arena, Entry { hash, key, value }, can_replace, true)
    }

    #[must_use]
    pub fn get(&self, arena: &Arena, key: &K) -> Option<V> {
        let hash = safe_hash(key.hash32());
        let index_init = hash & self.count_mod;

        for i in 0..self.count {
            let idx = (index_init + i) & self.count_mod;
            let entry = self.buckets.get(arena, idx as usize).flatten()?;
            if entry.hash == hash && entry.key == *key {
                return Some(entry.value);
            }
        }
        None
    }

    #[must_use]
    pub fn contains_key(&self, arena: &Arena, key: &K) -> bool {
        self.get(arena, key).is_some()
    }

    /// Removes `key`, backward-shifting any entries that probed past it
    /// into the freed slot so later lookups stay correct.
    pub fn remove(&mut self, arena: &mut Arena, key: &K) -> bool {
        let hash = safe_hash(key.hash32());
        let index_init = hash & self.count_mod;

        let mut found = None;
        for i in 0..self.count {
            let idx = (index_init + i) & self.count_mod;
            match self.buckets.get(arena, idx as usize).flatten() {
                None => break,
                Some(e) if e.hash == hash && e.key == *key => {
                    found = Some(idx);
                    break;
                }
                Some(_) => {}
            }
        }

        let Some(mut idx) = found else {
            return false;
        };

        loop {
            let next = (idx + 1) & self.count_mod;
            match self.buckets.get(arena, next as usize).flatten() {
                None => {
                    self.buckets.set(arena, idx as usize, None);
                    break;
                }
                Some(e) => {
                    let init = e.hash & self.count_mod;
                    if init == next {
                        self.buckets.set(arena, idx as usize, None);
                        break;
                    }
                    self.buckets.set(arena, idx as usize, Some(e));
                    idx = next;
                }
            }
        }

        self.count_used -= 1;
        if self.count_used == self.shrink_at && self.count > MIN_BUCKET_SIZE {
            self.grow_to(arena, self.count / 2);
        }
        true
    }

    /// Releases the bucket table's chunks back to the arena. Must be
    /// called before a map is dropped, since `Vector` cannot reach the
    /// arena from its own `Drop` impl.
    pub fn clear(&mut self, arena: &mut Arena) {
        self.buckets.clear(arena);
        self.count_used = 0;
    }

    /// Every key/value pair in the map, in bucket order (unspecified
    /// relative to insertion order). Used by callers that need to walk the
    /// whole map, e.g. the serializer.
    #[must_use]
    pub fn entries(&self, arena: &Arena) -> Vec<(K, V)> {
        let mut out = Vec::with_capacity(self.count_used as usize);
        for i in 0..self.count {
            if let Some(entry) = self.buckets.get(arena, i as usize).flatten() {
                out.push((entry.key, entry.value));
            }
        }
        out
    }
}
