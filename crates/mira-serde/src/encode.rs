// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Mira Project Contributors

//! Writes a [`Tag`] graph to bytes.

#[cfg(test)]
mod encode_test;

#[cfg(any(test, feature = "std"))]
use std::vec::Vec;

#[cfg(not(any(test, feature = "std")))]
use alloc::vec::Vec;

use core::fmt;

use mira_core::{Kind, Tag};

use crate::host::ValueHost;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodeError {
    /// An allocated tag's handle has no live entry in the object table.
    DanglingHandle,
    /// Stateless mode was asked to encode a container or dynamic string.
    StatefulValueInStatelessMode,
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DanglingHandle => write!(f, "tag references a handle with no live object table entry"),
            Self::StatefulValueInStatelessMode => {
                write!(f, "stateless encoding cannot represent containers or dynamic strings")
            }
        }
    }
}

#[cfg(any(test, feature = "std"))]
impl std::error::Error for EncodeError {}

/// Packs a scalar tag's raw 3-field representation: kind byte, then the
/// 24-bit params and 32-bit payload fields, both big-endian. Mirrors
/// `mira_bytecode::chunk::tag_raw_bytes`, reimplemented locally so this
/// crate's wire format doesn't depend on the bytecode crate's.
fn write_scalar_tag(tag: Tag, out: &mut Vec<u8>) {
    out.push(tag.kind_byte());
    let params = tag.params().to_be_bytes();
    out.extend_from_slice(&params[1..4]);
    out.extend_from_slice(&tag.payload().to_be_bytes());
}

/// Encodes `root` to `out`, allocating nothing - everything it needs is
/// already readable through `host`.
pub fn encode<H: ValueHost>(host: &H, root: Tag, out: &mut Vec<u8>) -> Result<(), EncodeError> {
    match root.kind() {
        Some(Kind::DynStringPtr) => {
            let handle = root.decode_pointer();
            let bytes = host.string_bytes(handle).ok_or(EncodeError::DanglingHandle)?;
            out.push(root.kind_byte());
            #[allow(clippy::cast_possible_truncation)]
            let len = bytes.len() as u32;
            out.extend_from_slice(&len.to_be_bytes());
            out.extend_from_slice(&bytes);
            Ok(())
        }
        Some(Kind::VectorPtr) => {
            let handle = root.decode_pointer();
            let len = host.vector_len(handle).ok_or(EncodeError::DanglingHandle)?;
            out.push(root.kind_byte());
            #[allow(clippy::cast_possible_truncation)]
            let count = len as u32;
            out.extend_from_slice(&count.to_be_bytes());
            for i in 0..len {
                let elem = host.vector_get(handle, i).ok_or(EncodeError::DanglingHandle)?;
                encode(host, elem, out)?;
            }
            Ok(())
        }
        Some(Kind::HashMapPtr) => {
            let handle = root.decode_pointer();
            let entries = host.map_entries(handle);
            out.push(root.kind_byte());
            #[allow(clippy::cast_possible_truncation)]
            let count = entries.len() as u32;
            out.extend_from_slice(&count.to_be_bytes());
            for (crushed_key, value) in entries {
                out.extend_from_slice(&4u32.to_be_bytes());
                out.extend_from_slice(&crushed_key.to_be_bytes());
                encode(host, value, out)?;
            }
            Ok(())
        }
        _ => {
            write_scalar_tag(root, out);
            Ok(())
        }
    }
}

/// Encodes `root` without an arena or object table - used for IPC event
/// payloads, which refuse any value that would need one (containers,
/// dynamic strings). Scalars, small strings, `Unit`/`Void`/`NotAResult`,
/// and other inline kinds all pass through unchanged.
pub fn encode_stateless(root: Tag, out: &mut Vec<u8>) -> Result<(), EncodeError> {
    match root.kind() {
        Some(Kind::DynStringPtr | Kind::VectorPtr | Kind::HashMapPtr) => {
            Err(EncodeError::StatefulValueInStatelessMode)
        }
        _ => {
            write_scalar_tag(root, out);
            Ok(())
        }
    }
}
