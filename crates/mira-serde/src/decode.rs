// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Mira Project Contributors

//! Reads a [`Tag`] graph back out of bytes written by [`crate::encode`].

#[cfg(test)]
mod decode_test;

#[cfg(any(test, feature = "std"))]
use std::{string::String, vec::Vec};

#[cfg(not(any(test, feature = "std")))]
use alloc::{string::String, vec::Vec};

use core::fmt;

use mira_core::{Kind, Tag};

use crate::host::ValueHost;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    Truncated,
    InvalidUtf8,
    /// A map entry's key length wasn't 4 - the only width this format's
    /// crushed-hash keys ever take.
    BadMapKeyLength,
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Truncated => write!(f, "byte stream ended before a value was fully read"),
            Self::InvalidUtf8 => write!(f, "dynamic string body is not valid UTF-8"),
            Self::BadMapKeyLength => write!(f, "map entry key length was not 4 bytes"),
        }
    }
}

#[cfg(any(test, feature = "std"))]
impl std::error::Error for DecodeError {}

struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn take(&mut self, n: usize) -> Result<&'a [u8], DecodeError> {
        let end = self.pos.checked_add(n).ok_or(DecodeError::Truncated)?;
        let slice = self.bytes.get(self.pos..end).ok_or(DecodeError::Truncated)?;
        self.pos = end;
        Ok(slice)
    }

    fn take_u8(&mut self) -> Result<u8, DecodeError> {
        Ok(self.take(1)?[0])
    }

    fn take_u32(&mut self) -> Result<u32, DecodeError> {
        let b = self.take(4)?;
        Ok(u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
    }
}

/// Reads one value from `bytes`, allocating strings/vectors/maps through
/// `host` as needed, and returns the root tag plus the number of bytes
/// consumed.
pub fn decode<H: ValueHost>(host: &mut H, bytes: &[u8]) -> Result<(Tag, usize), DecodeError> {
    let mut cursor = Cursor { bytes, pos: 0 };
    let tag = read_value(host, &mut cursor)?;
    Ok((tag, cursor.pos))
}

fn read_value<H: ValueHost>(host: &mut H, cursor: &mut Cursor<'_>) -> Result<Tag, DecodeError> {
    let kind_byte = cursor.take_u8()?;
    match Kind::from_u8(kind_byte) {
        Some(Kind::DynStringPtr) => {
            let len = cursor.take_u32()? as usize;
            let raw = cursor.take(len)?;
            let text = String::from_utf8(raw.to_vec()).map_err(|_| DecodeError::InvalidUtf8)?;
            let handle = host.alloc_string(&text);
            Ok(Tag::encode_pointer(Kind::DynStringPtr, handle))
        }
        Some(Kind::VectorPtr) => {
            let count = cursor.take_u32()?;
            let handle = host.alloc_vector();
            for _ in 0..count {
                let elem = read_value(host, cursor)?;
                host.vector_push(handle, elem);
            }
            Ok(Tag::encode_pointer(Kind::VectorPtr, handle))
        }
        Some(Kind::HashMapPtr) => {
            let count = cursor.take_u32()?;
            let handle = host.alloc_map();
            for _ in 0..count {
                let keylen = cursor.take_u32()?;
                if keylen != 4 {
                    return Err(DecodeError::BadMapKeyLength);
                }
                let crushed_key = cursor.take_u32()?;
                let value = read_value(host, cursor)?;
                host.map_insert(handle, crushed_key, value);
            }
            Ok(Tag::encode_pointer(Kind::HashMapPtr, handle))
        }
        _ => {
            let params_hi = cursor.take(3)?;
            let params = (u32::from(params_hi[0]) << 16) | (u32::from(params_hi[1]) << 8) | u32::from(params_hi[2]);
            let payload = cursor.take_u32()?;
            Ok(Tag::from_raw(kind_byte, params, payload))
        }
    }
}
