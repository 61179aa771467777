// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Mira Project Contributors

//! The fixed built-in function table, grounded in
//! `original_source/MecsNative/TagCodeInterpreter.cpp`'s
//! `AddBuiltInFunctionSymbols`/`EvaluateBuiltInFunction` pair, plus the
//! IPC builtins (`send`/`wait`/`import`) that have no original-source
//! counterpart since the source predates Mira's multi-process model.

pub mod arithmetic;
pub mod comparison;
pub mod control;
pub mod string;

use std::collections::HashMap;
use std::sync::LazyLock;

use mira_core::{crushed_name, Tag};

use crate::interpreter::Interpreter;

/// Every built-in the interpreter recognizes by crushed name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    Equal,
    GreaterThan,
    LessThan,
    NotEqual,
    Add,
    Subtract,
    Multiply,
    Divide,
    Remainder,
    Concat,
    Substring,
    Length,
    Replace,
    Print,
    ReadKey,
    ReadLine,
    Assert,
    Random,
    Not,
    Or,
    And,
    Call,
    Eval,
    Send,
    Wait,
    Import,
    UnitEmpty,
}

static BUILTIN_TABLE: LazyLock<HashMap<u32, Builtin>> = LazyLock::new(|| {
    let mut table = HashMap::new();
    let mut add = |name: &str, builtin: Builtin| {
        table.insert(crushed_name(name), builtin);
    };
    add("=", Builtin::Equal);
    add("equals", Builtin::Equal);
    add(">", Builtin::GreaterThan);
    add("<", Builtin::LessThan);
    add("<>", Builtin::NotEqual);
    add("not-equal", Builtin::NotEqual);
    add("+", Builtin::Add);
    add("-", Builtin::Subtract);
    add("*", Builtin::Multiply);
    add("/", Builtin::Divide);
    add("%", Builtin::Remainder);
    add("concat", Builtin::Concat);
    add("substring", Builtin::Substring);
    add("length", Builtin::Length);
    add("replace", Builtin::Replace);
    add("print", Builtin::Print);
    add("readkey", Builtin::ReadKey);
    add("readline", Builtin::ReadLine);
    add("assert", Builtin::Assert);
    add("random", Builtin::Random);
    add("not", Builtin::Not);
    add("or", Builtin::Or);
    add("and", Builtin::And);
    add("call", Builtin::Call);
    add("eval", Builtin::Eval);
    add("send", Builtin::Send);
    add("wait", Builtin::Wait);
    add("import", Builtin::Import);
    add("()", Builtin::UnitEmpty);
    table
});

/// Looks up the builtin named by `crushed_name`, if any.
#[must_use]
pub fn resolve(name: u32) -> Option<Builtin> {
    BUILTIN_TABLE.get(&name).copied()
}

/// What a builtin call does to the interpreter beyond computing a value.
pub enum Outcome {
    /// Push this value onto the value stack, unless it is
    /// [`Tag::void_return`].
    Value(Tag),
    /// The call needs more input; rewind PC and enter `Waiting`.
    MustWait,
    /// Broadcast `target`/`payload` via the scheduler, then continue.
    Send { target: Tag, payload: Vec<u8> },
    /// Block until a message arrives for `target_name`.
    Wait { target_name: u32 },
    /// Request the scheduler load another program.
    Spawn { path: Vec<u8> },
    /// A fatal application error; freeze at the faulting PC.
    Exception(String),
}

/// Dispatches one call to `builtin` with already-popped, positional
/// `args`, against the live interpreter state.
pub fn call(builtin: Builtin, args: &[Tag], interp: &mut Interpreter) -> Outcome {
    match builtin {
        Builtin::Equal | Builtin::GreaterThan | Builtin::LessThan | Builtin::NotEqual => {
            comparison::call(builtin, args, interp)
        }
        Builtin::Add | Builtin::Subtract | Builtin::Multiply | Builtin::Divide | Builtin::Remainder => {
            arithmetic::call(builtin, args, interp)
        }
        Builtin::Concat | Builtin::Substring | Builtin::Length | Builtin::Replace | Builtin::Print
        | Builtin::ReadKey | Builtin::ReadLine => string::call(builtin, args, interp),
        Builtin::Assert
        | Builtin::Random
        | Builtin::Not
        | Builtin::Or
        | Builtin::And
        | Builtin::Call
        | Builtin::Eval
        | Builtin::Send
        | Builtin::Wait
        | Builtin::Import => control::call(builtin, args, interp),
        Builtin::UnitEmpty => Outcome::Value(Tag::unit_return()),
    }
}
