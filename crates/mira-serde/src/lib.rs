// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Mira Project Contributors

//! Tag-graph (de)serialization: the wire format used for persisting a
//! process's values to a blob and for IPC event payloads.
//!
//! [`encode`]/[`decode`] handle the full format, allocating through a
//! [`ValueHost`] as needed. [`encode_stateless`] is the subset used for IPC
//! messages, which refuses anything that would need an arena to read back.

#![cfg_attr(not(any(test, feature = "std")), no_std)]

#[cfg(not(any(test, feature = "std")))]
extern crate alloc;

mod decode;
mod encode;
mod host;

pub use decode::{decode, DecodeError};
pub use encode::{encode, encode_stateless, EncodeError};
pub use host::{ObjectTable, ValueHost};
