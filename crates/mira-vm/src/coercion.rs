// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Mira Project Contributors

//! Total, side-effect-free conversions between tag kinds.
//!
//! None of these ever fail outright - every dead end (an unparsable
//! string, a pointer with no further structure) has a defined fallback
//! value instead of an error, per the error-handling design: type
//! coercion never throws.

#[cfg(test)]
mod coercion_test;

use mira_bytecode::Chunk;
use mira_core::{Kind, Tag};
use mira_serde::ValueHost;

/// `true` iff Mira would treat `tag` as truthy.
///
/// Numeric values are truthy when non-zero; strings are truthy unless
/// empty or literally `"false"`/`"0"`; `Unit`/`Void`/`NotAResult`/`Invalid`
/// are always falsy; every other allocated pointer is truthy.
#[must_use]
pub fn to_boolean<H: ValueHost>(tag: Tag, host: &H, chunk: Option<&Chunk>) -> bool {
    match tag.kind() {
        Some(Kind::Integer) => tag.decode_integer() != 0,
        Some(Kind::Fraction) => tag.decode_fraction() != 0.0,
        Some(Kind::SmallString | Kind::StaticStringPtr | Kind::DynStringPtr) => {
            let s = to_string(tag, host, chunk);
            !s.is_empty() && s != "false" && s != "0"
        }
        Some(Kind::Unit | Kind::Void | Kind::NotAResult | Kind::Invalid) => false,
        Some(k) if k.is_allocated() => true,
        _ => false,
    }
}

/// A Rust `bool` recast as Mira's integer convention (`0`/`1`).
#[must_use]
pub const fn bool_to_integer(value: bool) -> i32 {
    if value { 1 } else { 0 }
}

/// Converts `tag` to a signed 32-bit integer.
///
/// Integers pass through unchanged; fractions truncate toward zero;
/// strings are parsed as decimal integers, falling back to `0` if they
/// don't parse; every pointer kind collapses to `0`.
#[must_use]
pub fn to_integer<H: ValueHost>(tag: Tag, host: &H, chunk: Option<&Chunk>) -> i32 {
    match tag.kind() {
        Some(Kind::Integer) => tag.decode_integer(),
        #[allow(clippy::cast_possible_truncation)]
        Some(Kind::Fraction) => tag.decode_fraction().trunc() as i32,
        Some(Kind::SmallString | Kind::StaticStringPtr | Kind::DynStringPtr) => {
            to_string(tag, host, chunk).trim().parse::<i32>().unwrap_or(0)
        }
        _ => 0,
    }
}

/// Converts `tag` to a double-precision float.
///
/// Integers widen exactly; fractions dequantize to their real value;
/// strings are parsed as decimals, falling back to `0.0` if they don't
/// parse; every other kind is `0.0`.
#[must_use]
pub fn to_double<H: ValueHost>(tag: Tag, host: &H, chunk: Option<&Chunk>) -> f64 {
    match tag.kind() {
        Some(Kind::Integer) => f64::from(tag.decode_integer()),
        Some(Kind::Fraction) => tag.decode_fraction(),
        Some(Kind::SmallString | Kind::StaticStringPtr | Kind::DynStringPtr) => {
            to_string(tag, host, chunk).trim().parse::<f64>().unwrap_or(0.0)
        }
        _ => 0.0,
    }
}

/// Converts `tag` to its human-readable string form.
///
/// Integers and fractions format as decimal; small and static strings
/// unpack directly; dynamic strings read through the host's object
/// table; vectors and maps stringify by recursively stringifying their
/// elements; `NotAResult`/`Void`/`Unit`/`Invalid` render as a stable
/// marker rather than an empty string, so a log line never silently
/// loses the fact that a coercion bottomed out.
#[must_use]
pub fn to_string<H: ValueHost>(tag: Tag, host: &H, chunk: Option<&Chunk>) -> String {
    match tag.kind() {
        Some(Kind::Integer) => tag.decode_integer().to_string(),
        Some(Kind::Fraction) => format_fraction(tag.decode_fraction()),
        Some(Kind::SmallString) => tag.decode_short_str().as_str().to_string(),
        Some(Kind::StaticStringPtr) => chunk
            .and_then(|c| c.string_at(tag.payload() as usize))
            .unwrap_or_else(|| "<unknown static string>".to_string()),
        Some(Kind::DynStringPtr) => host
            .string_bytes(tag.decode_pointer())
            .and_then(|bytes| String::from_utf8(bytes).ok())
            .unwrap_or_else(|| "<dangling string>".to_string()),
        Some(Kind::VectorPtr) => stringify_vector(tag, host, chunk),
        Some(Kind::HashMapPtr) => stringify_map(tag, host, chunk),
        Some(Kind::NotAResult) => "<not-a-result>".to_string(),
        Some(Kind::Void) => "<void>".to_string(),
        Some(Kind::Unit) => "<unit>".to_string(),
        _ => "<invalid>".to_string(),
    }
}

fn format_fraction(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        #[allow(clippy::cast_possible_truncation)]
        return (value as i64).to_string();
    }
    format!("{value}")
}

fn stringify_vector<H: ValueHost>(tag: Tag, host: &H, chunk: Option<&Chunk>) -> String {
    let handle = tag.decode_pointer();
    let Some(len) = host.vector_len(handle) else {
        return "<dangling vector>".to_string();
    };
    let mut parts = Vec::with_capacity(len);
    for i in 0..len {
        let element = host.vector_get(handle, i).unwrap_or_else(Tag::non_result);
        parts.push(to_string(element, host, chunk));
    }
    format!("[{}]", parts.join(" "))
}

fn stringify_map<H: ValueHost>(tag: Tag, host: &H, chunk: Option<&Chunk>) -> String {
    let handle = tag.decode_pointer();
    let mut entries = host.map_entries(handle);
    entries.sort_by_key(|(key, _)| *key);
    let parts: Vec<String> = entries
        .into_iter()
        .map(|(key, value)| format!("{key:#x}: {}", to_string(value, host, chunk)))
        .collect();
    format!("{{{}}}", parts.join(", "))
}

/// Allocates `text` as a dynamic string in `host`'s arena and returns a
/// `DynStringPtr` tag pointing at it. Casting never mutates the source
/// tag - this is the only coercion helper that allocates, used when a
/// builtin (e.g. `concat`, integer-to-string `print` arguments) needs a
/// fresh string rather than an existing one.
pub fn alloc_string_tag<H: ValueHost>(host: &mut H, text: &str) -> Tag {
    let handle = host.alloc_string(text);
    Tag::encode_pointer(Kind::DynStringPtr, handle)
}
