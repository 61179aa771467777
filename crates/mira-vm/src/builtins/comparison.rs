// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Mira Project Contributors

//! The `=`/`>`/`<`/`<>` comparison folds, shared between the builtin
//! functions of the same name and the `C` compound compare-jump opcode.
//!
//! Grounded in `TagCodeInterpreter.cpp`'s `ListEquals`/`FoldGreaterThan`/
//! `FoldLessThan`.

#[cfg(test)]
mod comparison_test;

use mira_core::{Kind, Tag};

use super::{Builtin, Outcome};
use crate::coercion::to_double;
use crate::interpreter::Interpreter;

const EPSILON: f64 = 1e-10;

fn is_numeric(kind: Kind) -> bool {
    matches!(kind, Kind::Integer | Kind::Fraction)
}

fn is_stringlike(kind: Kind) -> bool {
    matches!(kind, Kind::SmallString | Kind::StaticStringPtr | Kind::DynStringPtr)
}

/// Type-specific pairwise equality used by `=`/`<>` and `Cop =`/`Cop <>`.
#[must_use]
pub fn tags_equal(a: Tag, b: Tag, interp: &Interpreter) -> bool {
    let (Some(ka), Some(kb)) = (a.kind(), b.kind()) else { return false };
    match (ka, kb) {
        _ if is_numeric(ka) && is_numeric(kb) => {
            (to_double(a, &interp.heap, interp.chunk()) - to_double(b, &interp.heap, interp.chunk())).abs() <= EPSILON
        }
        _ if is_stringlike(ka) && is_stringlike(kb) => {
            crate::coercion::to_string(a, &interp.heap, interp.chunk())
                == crate::coercion::to_string(b, &interp.heap, interp.chunk())
        }
        (Kind::VectorPtr, Kind::VectorPtr) | (Kind::HashMapPtr, Kind::HashMapPtr) => a.payload() == b.payload(),
        _ => false,
    }
}

/// `true` iff any of `values[1..]` is equal to `values[0]`.
#[must_use]
pub fn list_equals(values: &[Tag], interp: &Interpreter) -> bool {
    let Some((first, rest)) = values.split_first() else { return false };
    rest.iter().any(|v| tags_equal(*first, v, interp))
}

/// `true` iff `values`, read as doubles, is a strictly descending
/// sequence.
#[must_use]
pub fn fold_greater_than(values: &[Tag], interp: &Interpreter) -> bool {
    monotonic(values, interp, |prev, current| prev > current)
}

/// `true` iff `values`, read as doubles, is a strictly ascending
/// sequence.
#[must_use]
pub fn fold_less_than(values: &[Tag], interp: &Interpreter) -> bool {
    monotonic(values, interp, |prev, current| prev < current)
}

fn monotonic(values: &[Tag], interp: &Interpreter, relation: impl Fn(f64, f64) -> bool) -> bool {
    let mut iter = values.iter();
    let Some(first) = iter.next() else { return true };
    let mut prev = to_double(*first, &interp.heap, interp.chunk());
    for tag in iter {
        let current = to_double(*tag, &interp.heap, interp.chunk());
        if !relation(prev, current) {
            return false;
        }
        prev = current;
    }
    true
}

pub fn call(builtin: Builtin, args: &[Tag], interp: &mut Interpreter) -> Outcome {
    if args.len() < 2 {
        let name = match builtin {
            Builtin::Equal => "equals ( = )",
            Builtin::GreaterThan => "greater than ( > )",
            Builtin::LessThan => "less than ( < )",
            Builtin::NotEqual => "not-equal ( <> )",
            _ => unreachable!("comparison::call only receives comparison builtins"),
        };
        return Outcome::Exception(format!("{name} must have at least two things to compare"));
    }
    let result = match builtin {
        Builtin::Equal => list_equals(args, interp),
        Builtin::NotEqual => !list_equals(args, interp),
        Builtin::GreaterThan => fold_greater_than(args, interp),
        Builtin::LessThan => fold_less_than(args, interp),
        _ => unreachable!("comparison::call only receives comparison builtins"),
    };
    Outcome::Value(Tag::integer(crate::coercion::bool_to_integer(result)))
}
