// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Mira Project Contributors

//! Arena-resident container types built on [`mira_arena`].
//!
//! Every container here stores its element data as one or more chunks
//! inside a caller-supplied [`mira_arena::Arena`]; only small bookkeeping
//! (chunk handle lists, bucket counts, cached lengths) lives in ordinary
//! Rust memory. Callers thread the arena through each mutating call rather
//! than the container owning it, since a single arena is typically shared
//! by many containers (a `Scope`'s stack of `HashMap`s, for instance).

#![cfg_attr(not(any(test, feature = "std")), no_std)]

#[cfg(any(test, feature = "std"))]
extern crate std;

#[cfg(not(any(test, feature = "std")))]
extern crate alloc;

mod hash32;
mod heap;
mod hashmap;
mod mut_string;
mod tree;
mod vector;

pub use hash32::Hash32;
pub use heap::ArenaHeap;
pub use hashmap::ArenaHashMap;
pub use mut_string::MutString;
pub use tree::{DiagonalTree, NodeId, Tree};
pub use vector::Vector;
