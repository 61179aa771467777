// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Mira Project Contributors

//! Tagged 64-bit value representation shared by every Mira crate.
//!
//! A [`Tag`] is the runtime's universal operand: 8 bits of kind, 24 bits of
//! kind-dependent parameters, and a 32-bit payload. Whether the payload is an
//! inline value (an integer, a fixed-point fraction, up to seven packed
//! characters) or a handle into an [arena](https://docs.rs/mira-arena) is
//! determined entirely by the kind byte - see [`Kind::is_allocated`] and
//! [`Kind::is_numeric`].

#![cfg_attr(not(any(test, feature = "std")), no_std)]

mod hash;
mod kind;
mod tag;

pub use hash::{crushed_name, position_name};
pub use kind::{Kind, ALLOCATED_BIT, NUMERIC_BIT};
pub use tag::{heapless_str, Tag};
