// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Mira Project Contributors

//! `+`, `-`, `*`, `/`, `%`: left-folds over integer-coerced arguments.
//!
//! Grounded in `TagCodeInterpreter.cpp`'s `ChainSum`/`ChainDifference`/
//! `ChainProduct`/`ChainDivide`/`ChainRemainder`, adjusted for the single-
//! argument cases the distilled specification calls out explicitly
//! (negate for `-`, error for `*` and `/`) rather than the original's
//! silent single-element passthrough.

#[cfg(test)]
mod arithmetic_test;

use mira_core::Tag;

use super::{Builtin, Outcome};
use crate::coercion::to_integer;
use crate::interpreter::Interpreter;

pub fn call(builtin: Builtin, args: &[Tag], interp: &mut Interpreter) -> Outcome {
    if args.is_empty() {
        return Outcome::Exception(arity_message(builtin));
    }
    let ints: Vec<i32> = args.iter().map(|t| to_integer(*t, &interp.heap, interp.chunk())).collect();

    let result = match builtin {
        Builtin::Add => ints.iter().copied().fold(0i64, |acc, v| acc + i64::from(v)),
        Builtin::Subtract if ints.len() == 1 => -i64::from(ints[0]),
        Builtin::Subtract => {
            ints[1..].iter().fold(i64::from(ints[0]), |acc, &v| acc - i64::from(v))
        }
        Builtin::Multiply if ints.len() == 1 => {
            return Outcome::Exception("'*' needs at least two arguments".to_string());
        }
        Builtin::Multiply => ints[1..].iter().fold(i64::from(ints[0]), |acc, &v| acc * i64::from(v)),
        Builtin::Divide if ints.len() == 1 => {
            return Outcome::Exception("'/' needs at least two arguments".to_string());
        }
        Builtin::Divide => {
            let mut acc = f64::from(ints[0]);
            for &v in &ints[1..] {
                if v == 0 {
                    return Outcome::Exception("division by zero".to_string());
                }
                acc /= f64::from(v);
            }
            #[allow(clippy::cast_possible_truncation)]
            {
                acc.trunc() as i64
            }
        }
        Builtin::Remainder if ints.len() == 1 => {
            return Outcome::Exception("'%' needs at least two arguments".to_string());
        }
        Builtin::Remainder => {
            let mut acc = ints[0];
            for &v in &ints[1..] {
                if v == 0 {
                    return Outcome::Exception("modulo by zero".to_string());
                }
                acc %= v;
            }
            i64::from(acc)
        }
        _ => unreachable!("arithmetic::call only receives arithmetic builtins"),
    };

    #[allow(clippy::cast_possible_truncation)]
    let narrowed = result as i32;
    Outcome::Value(Tag::integer(narrowed))
}

fn arity_message(builtin: Builtin) -> String {
    let name = match builtin {
        Builtin::Add => "+",
        Builtin::Subtract => "-",
        Builtin::Multiply => "*",
        Builtin::Divide => "/",
        Builtin::Remainder => "%",
        _ => unreachable!("arithmetic::call only receives arithmetic builtins"),
    };
    format!("'{name}' needs at least one argument")
}
