// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Mira Project Contributors

//! Turns a raw byte stream into a [`Chunk`].

#[cfg(test)]
mod loader_test;

#[cfg(any(test, feature = "std"))]
use std::vec::Vec;

#[cfg(not(any(test, feature = "std")))]
use alloc::vec::Vec;

use core::fmt;

use mira_core::Tag;

use crate::chunk::{tag_from_raw_bytes, Chunk};
use crate::opcode::Instruction;

/// Why a byte stream failed to load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadError {
    /// Length isn't a multiple of 8 bytes (one tag each).
    Truncated,
    /// Fewer than one tag; there's no header to read.
    Empty,
    /// The first tag isn't `('c','s', skip)` in either byte order.
    BadHeader,
    /// The header's `skip_in_tags` points past the end of the stream.
    HeaderSkipOutOfRange,
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Truncated => write!(f, "bytecode stream length is not a multiple of 8 bytes"),
            Self::Empty => write!(f, "bytecode stream is empty"),
            Self::BadHeader => write!(f, "first tag is not a string-table header"),
            Self::HeaderSkipOutOfRange => write!(f, "header skip distance points past the end of the stream"),
        }
    }
}

#[cfg(any(test, feature = "std"))]
impl std::error::Error for LoadError {}

/// Parses a byte stream into a [`Chunk`], collaborating with whatever
/// source provides the bytes (a file, a network socket, an embedded
/// `&'static [u8]`). The trait exists so `mira-cli` can load from a path
/// while tests load from an in-memory buffer without either depending on
/// the other's I/O machinery.
pub trait Loader {
    fn load(&self) -> Result<Chunk, LoadError>;
}

impl Loader for [u8] {
    fn load(&self) -> Result<Chunk, LoadError> {
        load_bytes(self)
    }
}

impl Loader for Vec<u8> {
    fn load(&self) -> Result<Chunk, LoadError> {
        load_bytes(self)
    }
}

/// Which byte order the stream's tag fields are stored in. Files are
/// written in network order; a host that loads its own freshly-serialized
/// output back (e.g. a round-trip test) may see host order instead, so the
/// header is checked under both before giving up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ByteOrder {
    Network,
    /// Little-endian, the only host order any realistic target here uses.
    /// A true big-endian host's "host order" already equals network order
    /// and is covered by [`Self::Network`].
    Host,
}

fn parse_tag(raw: &[u8], order: ByteOrder) -> Tag {
    debug_assert_eq!(raw.len(), 8);
    match order {
        ByteOrder::Network => tag_from_raw_bytes([raw[0], raw[1], raw[2], raw[3], raw[4], raw[5], raw[6], raw[7]]),
        ByteOrder::Host => {
            let params = u32::from_le_bytes([raw[1], raw[2], raw[3], 0]);
            let payload = u32::from_le_bytes([raw[4], raw[5], raw[6], raw[7]]);
            Tag::from_raw(raw[0], params, payload)
        }
    }
}

fn is_string_table_header(tag: Tag) -> bool {
    matches!(Instruction::decode(tag), Some(Instruction::StringTableSkip { .. }))
}

/// Parses `bytes` into a chunk, detecting network vs. host byte order from
/// the header before normalizing the rest of the stream the same way.
pub fn load_bytes(bytes: &[u8]) -> Result<Chunk, LoadError> {
    if bytes.is_empty() {
        return Err(LoadError::Empty);
    }
    if bytes.len() % 8 != 0 {
        return Err(LoadError::Truncated);
    }

    let first_raw = &bytes[0..8];
    let order = if is_string_table_header(parse_tag(first_raw, ByteOrder::Network)) {
        ByteOrder::Network
    } else if is_string_table_header(parse_tag(first_raw, ByteOrder::Host)) {
        ByteOrder::Host
    } else {
        return Err(LoadError::BadHeader);
    };

    let tags: Vec<Tag> = bytes.chunks_exact(8).map(|chunk| parse_tag(chunk, order)).collect();

    let header = tags[0];
    let Some(Instruction::StringTableSkip { skip_in_tags }) = Instruction::decode(header) else {
        return Err(LoadError::BadHeader);
    };
    let code_start = skip_in_tags as usize;
    if code_start > tags.len() {
        return Err(LoadError::HeaderSkipOutOfRange);
    }

    Ok(Chunk::from_parts(tags, code_start))
}
