// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Mira Project Contributors

//! `concat`, `substring`, `length`, `replace`, `print`, `readkey`,
//! `readline`.
//!
//! Grounded in `TagCodeInterpreter.cpp`'s `FuncDef::Concat`/`Substring`/
//! `Length`/`Replace`/`Print`/`ReadKey`/`ReadLine` cases.

#[cfg(test)]
mod string_test;

use mira_core::Tag;

use super::{Builtin, Outcome};
use crate::coercion::{alloc_string_tag, to_integer, to_string};
use crate::interpreter::Interpreter;

pub fn call(builtin: Builtin, args: &[Tag], interp: &mut Interpreter) -> Outcome {
    match builtin {
        Builtin::Concat => concat(args, interp),
        Builtin::Substring => substring(args, interp),
        Builtin::Length => length(args, interp),
        Builtin::Replace => replace(args, interp),
        Builtin::Print => print(args, interp),
        Builtin::ReadKey => read_key(interp),
        Builtin::ReadLine => read_line(interp),
        _ => unreachable!("string::call only receives string builtins"),
    }
}

fn concat(args: &[Tag], interp: &mut Interpreter) -> Outcome {
    let mut out = String::new();
    for tag in args {
        out.push_str(&to_string(*tag, &interp.heap, interp.chunk()));
    }
    Outcome::Value(alloc_string_tag(&mut interp.heap, &out))
}

#[allow(clippy::cast_sign_loss)]
fn substring(args: &[Tag], interp: &mut Interpreter) -> Outcome {
    let chunk = interp.chunk();
    match args {
        [s, start] => {
            let text = to_string(*s, &interp.heap, chunk);
            let start = to_integer(*start, &interp.heap, chunk).max(0) as usize;
            let out = text.as_bytes().get(start.min(text.len())..).unwrap_or(&[]);
            let out = String::from_utf8_lossy(out).into_owned();
            Outcome::Value(alloc_string_tag(&mut interp.heap, &out))
        }
        [s, start, len] => {
            let text = to_string(*s, &interp.heap, chunk);
            let start = to_integer(*start, &interp.heap, chunk).max(0) as usize;
            let len = to_integer(*len, &interp.heap, chunk).max(0) as usize;
            let start = start.min(text.len());
            let end = (start + len).min(text.len());
            let out = String::from_utf8_lossy(&text.as_bytes()[start..end]).into_owned();
            Outcome::Value(alloc_string_tag(&mut interp.heap, &out))
        }
        _ => Outcome::Exception("'substring' should be called with 2 or 3 parameters".to_string()),
    }
}

fn length(args: &[Tag], interp: &mut Interpreter) -> Outcome {
    let Some(s) = args.first() else {
        return Outcome::Exception("'length' should be called with 1 parameter".to_string());
    };
    let text = to_string(*s, &interp.heap, interp.chunk());
    #[allow(clippy::cast_possible_wrap)]
    let len = text.len() as i32;
    Outcome::Value(Tag::integer(len))
}

fn replace(args: &[Tag], interp: &mut Interpreter) -> Outcome {
    let [src, old, new] = args else {
        return Outcome::Exception("'replace' should be called with 3 parameters".to_string());
    };
    let chunk = interp.chunk();
    let src = to_string(*src, &interp.heap, chunk);
    let old = to_string(*old, &interp.heap, chunk);
    let new = to_string(*new, &interp.heap, chunk);
    let out = src.replace(&old, &new);
    Outcome::Value(alloc_string_tag(&mut interp.heap, &out))
}

fn print(args: &[Tag], interp: &mut Interpreter) -> Outcome {
    let mut empty_end = args.is_empty();
    for tag in args {
        let text = to_string(*tag, &interp.heap, interp.chunk());
        empty_end = text.is_empty();
        interp.output.push_str(&text);
    }
    if !empty_end {
        interp.output.push('\n');
    }
    Outcome::Value(Tag::void_return())
}

fn read_key(interp: &mut Interpreter) -> Outcome {
    let Some(byte) = interp.input.pop_front() else {
        return Outcome::MustWait;
    };
    let s = String::from_utf8_lossy(&[byte]).into_owned();
    Outcome::Value(alloc_string_tag(&mut interp.heap, &s))
}

fn read_line(interp: &mut Interpreter) -> Outcome {
    let Some(newline_at) = interp.input.iter().position(|&b| b == b'\n') else {
        return Outcome::MustWait;
    };
    let line: Vec<u8> = interp.input.drain(..newline_at).collect();
    let s = String::from_utf8_lossy(&line).into_owned();
    Outcome::Value(alloc_string_tag(&mut interp.heap, &s))
}
