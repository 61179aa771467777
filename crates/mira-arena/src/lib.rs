// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Mira Project Contributors

//! Zoned arena allocator backing every Mira container type.
//!
//! An [`Arena`] is a fixed-capacity byte buffer split into equal-size
//! zones. Allocation is a bump pointer within a zone; deallocation is
//! zone-granular reference counting, not per-object - freeing the last
//! reference into a zone resets the whole zone in one step. This trades
//! per-object GC precision for O(1) alloc/free with no fragmentation
//! bookkeeping beyond two small tables.
//!
//! [`ArenaStack`] manages the process-wide LIFO of arenas: pushing a new
//! scratch arena, popping it, and - when a value in the popped arena needs
//! to survive - shallow-copying it up to the parent arena first.

#![cfg_attr(not(any(test, feature = "std")), no_std)]

#[cfg(any(test, feature = "std"))]
extern crate std;

#[cfg(not(any(test, feature = "std")))]
extern crate alloc;

mod arena;
mod handle;
mod memory;
mod stack;

pub use arena::{Arena, ArenaStats, ZONE_SIZE};
pub use handle::ArenaHandle;
pub use memory::MemorySpace;
pub use stack::ArenaStack;
