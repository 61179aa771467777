// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Mira Project Contributors

//! `assert`, `random`, `not`, `or`, `and`, `call`, `eval`, and the
//! IPC-facing `send`/`wait`/`import`.
//!
//! `assert`/`random`/`not`/`or`/`and` are grounded in
//! `TagCodeInterpreter.cpp`'s `FuncDef::Assert`/`Random`/`LogicNot`/
//! `LogicOr`/`LogicAnd` cases. `call` is grounded in that same file's
//! `FuncDef::Call` case - present only as a commented-out sketch there,
//! since the original never finished it, but the sketch's shape (decode a
//! string, crush it, dispatch the same way a compiled call would) is
//! followed here. `eval`'s sibling sketch compiles source text with a
//! tokenizer this runtime doesn't have; Mira has no such front end, so
//! `eval` instead loads its argument as bytecode bytes and runs them
//! against the calling interpreter's own live scope and heap. `send`/
//! `wait`/`import` have no original counterpart at all - the source
//! predates Mira's multi-process model - and are grounded directly in the
//! scheduler's IPC contract instead.

#[cfg(test)]
mod control_test;

use mira_core::{crushed_name, Kind, Tag};
use mira_serde::ValueHost;

use super::{Builtin, Outcome};
use crate::coercion::{bool_to_integer, to_boolean, to_integer, to_string};
use crate::interpreter::Interpreter;
use crate::random::{int_random, random_at_most, ranged_random};

pub fn call(builtin: Builtin, args: &[Tag], interp: &mut Interpreter) -> Outcome {
    match builtin {
        Builtin::Assert => assert(args, interp),
        Builtin::Random => random(args, interp),
        Builtin::Not => not(args, interp),
        Builtin::Or => or(args, interp),
        Builtin::And => and(args, interp),
        Builtin::Call => call_by_name(args, interp),
        Builtin::Eval => eval(args, interp),
        Builtin::Send => send(args, interp),
        Builtin::Wait => wait(args, interp),
        Builtin::Import => import(args, interp),
        _ => unreachable!("control::call only receives control builtins"),
    }
}

/// With no parameters, asserting nothing always passes. Otherwise the
/// first argument must be truthy, or the remaining arguments are
/// concatenated into the exception message.
fn assert(args: &[Tag], interp: &mut Interpreter) -> Outcome {
    let Some((condition, rest)) = args.split_first() else {
        return Outcome::Value(Tag::void_return());
    };
    if to_boolean(*condition, &interp.heap, interp.chunk()) {
        return Outcome::Value(Tag::void_return());
    }
    let mut message = String::new();
    for tag in rest {
        message.push_str(&to_string(*tag, &interp.heap, interp.chunk()));
    }
    Outcome::Exception(message)
}

fn random(args: &[Tag], interp: &mut Interpreter) -> Outcome {
    let step = interp.step_counter();
    let value = match args {
        [] => int_random(step),
        [max] => random_at_most(step, to_integer(*max, &interp.heap, interp.chunk())),
        [low, high] => ranged_random(
            step,
            to_integer(*low, &interp.heap, interp.chunk()),
            to_integer(*high, &interp.heap, interp.chunk()),
        ),
        _ => return Outcome::Exception("'random' takes at most two arguments".to_string()),
    };
    Outcome::Value(Tag::integer(value))
}

fn not(args: &[Tag], interp: &mut Interpreter) -> Outcome {
    let [value] = args else {
        return Outcome::Exception("'not' should be called with one argument".to_string());
    };
    let result = !to_boolean(*value, &interp.heap, interp.chunk());
    Outcome::Value(Tag::integer(bool_to_integer(result)))
}

fn or(args: &[Tag], interp: &mut Interpreter) -> Outcome {
    let result = args.iter().any(|tag| to_boolean(*tag, &interp.heap, interp.chunk()));
    Outcome::Value(Tag::integer(bool_to_integer(result)))
}

fn and(args: &[Tag], interp: &mut Interpreter) -> Outcome {
    let result = !args.is_empty() && args.iter().all(|tag| to_boolean(*tag, &interp.heap, interp.chunk()));
    Outcome::Value(Tag::integer(bool_to_integer(result)))
}

/// Dispatches a function named by its first argument (a string) against
/// the rest of the arguments, exactly as a compiled `fc` would: a builtin
/// name resolves to that builtin, otherwise the name is looked up in the
/// interpreter's own function table.
fn call_by_name(args: &[Tag], interp: &mut Interpreter) -> Outcome {
    let Some((name_tag, rest)) = args.split_first() else {
        return Outcome::Exception("'call' should be called with a function name and its arguments".to_string());
    };
    let name = to_string(*name_tag, &interp.heap, interp.chunk());
    let crushed = crushed_name(&name);
    if let Some(builtin) = super::resolve(crushed) {
        return super::call(builtin, rest, interp);
    }
    let Some(entry_pc) = interp.function_entry(crushed) else {
        return Outcome::Exception(format!("tried to call a function by name, but '{name}' is undefined"));
    };
    match interp.invoke(entry_pc, rest) {
        Ok(tag) => Outcome::Value(tag),
        Err(message) => Outcome::Exception(message),
    }
}

/// Loads `args[0]` as a bytecode stream and runs it against this
/// interpreter's live scope, heap and function table - any `fd` it defines
/// is visible to the caller afterward, since there is no separate table to
/// merge back.
fn eval(args: &[Tag], interp: &mut Interpreter) -> Outcome {
    let [source] = args else {
        return Outcome::Exception("'eval' should be called with one argument".to_string());
    };
    let bytes = raw_bytes(*source, interp);
    let chunk = match mira_bytecode::load_bytes(&bytes) {
        Ok(chunk) => chunk,
        Err(error) => return Outcome::Exception(format!("'eval' could not load its argument: {error}")),
    };
    match interp.eval_chunk(chunk) {
        Ok(tag) => Outcome::Value(tag),
        Err(message) => Outcome::Exception(message),
    }
}

fn send(args: &[Tag], interp: &mut Interpreter) -> Outcome {
    let [target, payload] = args else {
        return Outcome::Exception("'send' should be called with a target and a payload".to_string());
    };
    let mut bytes = Vec::new();
    if let Err(error) = mira_serde::encode(&interp.heap, *payload, &mut bytes) {
        return Outcome::Exception(format!("'send' could not serialize its payload: {error}"));
    }
    Outcome::Send { target: *target, payload: bytes }
}

/// Checks the mailbox for an already-arrived message first, so a `wait`
/// that follows a `send` the scheduler already delivered resolves without
/// ever suspending.
fn wait(args: &[Tag], interp: &mut Interpreter) -> Outcome {
    let [target] = args else {
        return Outcome::Exception("'wait' should be called with one target name".to_string());
    };
    let name = to_string(*target, &interp.heap, interp.chunk());
    let crushed = crushed_name(&name);
    if let Some(position) = interp.mailbox.iter().position(|(from, _)| *from == crushed) {
        let Some((_, bytes)) = interp.mailbox.remove(position) else {
            unreachable!("position was just found in the same deque");
        };
        return match mira_serde::decode(&mut interp.heap, &bytes) {
            Ok((tag, _)) => Outcome::Value(tag),
            Err(error) => Outcome::Exception(format!("'wait' could not decode its message: {error}")),
        };
    }
    Outcome::Wait { target_name: crushed }
}

fn import(args: &[Tag], interp: &mut Interpreter) -> Outcome {
    let [path] = args else {
        return Outcome::Exception("'import' should be called with one path".to_string());
    };
    Outcome::Spawn { path: raw_bytes(*path, interp) }
}

/// Reads `tag` as raw bytes rather than decoding it as UTF-8 text, since
/// `eval` and `import` both need the literal byte stream a string tag
/// carries (bytecode, a file path) rather than its display form.
fn raw_bytes(tag: Tag, interp: &Interpreter) -> Vec<u8> {
    match tag.kind() {
        Some(Kind::SmallString) => tag.decode_short_str().as_str().as_bytes().to_vec(),
        Some(Kind::StaticStringPtr) => interp
            .chunk()
            .and_then(|c| c.string_at(tag.payload() as usize))
            .map(String::into_bytes)
            .unwrap_or_default(),
        Some(Kind::DynStringPtr) => interp.heap.string_bytes(tag.decode_pointer()).unwrap_or_default(),
        _ => Vec::new(),
    }
}
