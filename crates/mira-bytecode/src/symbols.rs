// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Mira Project Contributors

//! Symbol files: the optional `{crushed-name → original name}` table that
//! lets disassembly and error messages show source names instead of bare
//! hashes.

#[cfg(test)]
mod symbols_test;

#[cfg(any(test, feature = "std"))]
use std::{collections::BTreeMap, string::String, vec::Vec};

#[cfg(not(any(test, feature = "std")))]
use alloc::{collections::BTreeMap, string::String, vec::Vec};

use core::fmt;

/// A loaded symbol table: crushed name hash to original source name.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    names: BTreeMap<u32, String>,
}

/// Why a symbol file failed to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolLoadError {
    /// A record header or body ran past the end of the buffer.
    Truncated,
    /// A record's declared length didn't decode as valid UTF-8.
    InvalidUtf8,
}

impl fmt::Display for SymbolLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Truncated => write!(f, "symbol file record runs past end of buffer"),
            Self::InvalidUtf8 => write!(f, "symbol file record is not valid UTF-8"),
        }
    }
}

#[cfg(any(test, feature = "std"))]
impl std::error::Error for SymbolLoadError {}

impl SymbolTable {
    #[must_use]
    pub fn new() -> Self {
        Self { names: BTreeMap::new() }
    }

    pub fn insert(&mut self, crushed_name: u32, name: String) {
        self.names.insert(crushed_name, name);
    }

    #[must_use]
    pub fn get(&self, crushed_name: u32) -> Option<&str> {
        self.names.get(&crushed_name).map(String::as_str)
    }

    /// Renders a name for display, falling back to the `<unknown> 0xXXXX`
    /// form used throughout disassembly and error output when the hash has
    /// no entry.
    #[must_use]
    pub fn render(&self, crushed_name: u32) -> String {
        match self.get(crushed_name) {
            Some(name) => name.into(),
            None => alloc_format(crushed_name),
        }
    }

    /// Parses a sequence of `{u32 crushed-name, u32 string-length, bytes}`
    /// records, all fields network byte order.
    pub fn parse(bytes: &[u8]) -> Result<Self, SymbolLoadError> {
        let mut table = Self::new();
        let mut pos = 0usize;
        while pos < bytes.len() {
            let header = bytes.get(pos..pos + 8).ok_or(SymbolLoadError::Truncated)?;
            let crushed_name = u32::from_be_bytes([header[0], header[1], header[2], header[3]]);
            let len = u32::from_be_bytes([header[4], header[5], header[6], header[7]]) as usize;
            pos += 8;
            let body = bytes.get(pos..pos + len).ok_or(SymbolLoadError::Truncated)?;
            let name = core::str::from_utf8(body).map_err(|_| SymbolLoadError::InvalidUtf8)?;
            table.insert(crushed_name, name.into());
            pos += len;
        }
        Ok(table)
    }

    /// Serializes this table back to the same record format [`Self::parse`]
    /// reads.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::new();
        for (crushed_name, name) in &self.names {
            out.extend_from_slice(&crushed_name.to_be_bytes());
            #[allow(clippy::cast_possible_truncation)]
            let len = name.len() as u32;
            out.extend_from_slice(&len.to_be_bytes());
            out.extend_from_slice(name.as_bytes());
        }
        out
    }
}

fn alloc_format(crushed_name: u32) -> String {
    use core::fmt::Write as _;
    let mut out = String::new();
    let _ = write!(out, "<unknown> 0x{crushed_name:08x}");
    out
}
