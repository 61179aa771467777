// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Mira Project Contributors

//! A stack of name→value frames with lexical lookup and shadowing.

#[cfg(test)]
mod scope_test;

use mira_arena::Arena;
use mira_containers::ArenaHashMap;
use mira_core::{position_name, Tag};

/// Bucket count a fresh frame starts with, matching `Scope.cpp`'s
/// `MapAllocateArena_Name_DataTag(64, ...)` call at every `push`.
const FRAME_CAPACITY_HINT: usize = 64;

/// Ordered stack of crushed-name → [`Tag`] maps. Lookup probes
/// innermost→outermost; assignment updates the nearest enclosing binding or
/// inserts into the innermost frame when none exists. Removal only ever
/// touches the innermost or global frame, to keep scope walks
/// unidirectional.
pub struct Scope {
    frames: Vec<ArenaHashMap<u32, Tag>>,
}

impl Scope {
    /// Creates a scope with a single, empty global frame.
    #[must_use]
    pub fn new(arena: &mut Arena) -> Self {
        let global = ArenaHashMap::new(arena, FRAME_CAPACITY_HINT);
        Self { frames: vec![global] }
    }

    /// Pushes a new frame, binding `params[i]` to the synthetic name for
    /// positional argument `i`.
    pub fn push(&mut self, arena: &mut Arena, params: &[Tag]) {
        let mut frame = ArenaHashMap::new(arena, FRAME_CAPACITY_HINT);
        for (i, value) in params.iter().enumerate() {
            #[allow(clippy::cast_possible_truncation)]
            let name = position_name(i as u32);
            frame.put(arena, name, *value, true);
        }
        self.frames.push(frame);
    }

    /// Removes the innermost frame. A no-op if only the global frame
    /// remains - the global frame is never dropped.
    pub fn drop_frame(&mut self, arena: &mut Arena) {
        if self.frames.len() < 2 {
            return;
        }
        if let Some(mut frame) = self.frames.pop() {
            frame.clear(arena);
        }
    }

    /// The nearest binding for `crushed_name`, or [`Tag::non_result`] if
    /// unbound in every frame.
    #[must_use]
    pub fn resolve(&self, arena: &Arena, crushed_name: u32) -> Tag {
        for frame in self.frames.iter().rev() {
            if let Some(value) = frame.get(arena, &crushed_name) {
                return value;
            }
        }
        Tag::non_result()
    }

    /// True if `crushed_name` resolves to a valid tag in any frame.
    #[must_use]
    pub fn can_resolve(&self, arena: &Arena, crushed_name: u32) -> bool {
        self.resolve(arena, crushed_name).is_valid()
    }

    /// Updates the nearest existing binding for `crushed_name`, or defines
    /// it in the innermost frame if no frame already has it.
    pub fn set(&mut self, arena: &mut Arena, crushed_name: u32, value: Tag) {
        for frame in self.frames.iter_mut().rev() {
            if frame.contains_key(arena, &crushed_name) {
                frame.put(arena, crushed_name, value, true);
                return;
            }
        }
        #[expect(clippy::unwrap_used, reason = "the global frame always exists")]
        let innermost = self.frames.last_mut().unwrap();
        innermost.put(arena, crushed_name, value, true);
    }

    /// True if `crushed_name` is bound in the innermost frame specifically
    /// (not just resolvable through an outer one).
    #[must_use]
    pub fn in_innermost(&self, arena: &Arena, crushed_name: u32) -> bool {
        self.frames.last().is_some_and(|frame| frame.contains_key(arena, &crushed_name))
    }

    /// Removes `crushed_name` from the global frame if present there,
    /// otherwise from the innermost frame. Removal never reaches into a
    /// frame between those two.
    pub fn remove(&mut self, arena: &mut Arena, crushed_name: u32) {
        #[expect(clippy::unwrap_used, reason = "the global frame always exists")]
        let global = self.frames.first_mut().unwrap();
        if global.remove(arena, &crushed_name) {
            return;
        }
        #[expect(clippy::unwrap_used, reason = "the global frame always exists")]
        let innermost = self.frames.last_mut().unwrap();
        innermost.remove(arena, &crushed_name);
    }

    /// Finds the nearest binding for `crushed_name` and reinterprets its
    /// payload as a 32-bit signed integer, adding `delta` in place. A no-op
    /// if the name is unbound anywhere - this mirrors `ScopeMutateNumber`'s
    /// original contract exactly: it never coerces non-integer bindings, it
    /// just reinterprets whatever bits are already there.
    pub fn mutate_number(&mut self, arena: &mut Arena, crushed_name: u32, delta: i8) {
        for frame in self.frames.iter_mut().rev() {
            if let Some(tag) = frame.get(arena, &crushed_name) {
                let new_value = tag.decode_integer().wrapping_add(i32::from(delta));
                frame.put(arena, crushed_name, Tag::integer(new_value), true);
                return;
            }
        }
    }

    #[must_use]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }
}
