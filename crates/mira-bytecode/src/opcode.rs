// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Mira Project Contributors

//! Opcode classes and the decoded [`Instruction`] shape.
//!
//! A Mira opcode is a [`Tag`] of [`Kind::Opcode`](mira_core::Kind::Opcode):
//! one class byte, one action byte (or, for `i`, a signed delta), and up to
//! 32 bits of payload plus an optional extra byte. The class/action letters
//! below are load-bearing, not cosmetic - a loader or interpreter that sees
//! an unrecognised class must treat the unit as invalid bytecode.

#[cfg(test)]
mod opcode_test;

use mira_core::Tag;

/// `f` - function call/define.
pub const CLASS_FUNCTION: u8 = b'f';
/// `c` - flow control (string-table skip, compare-jump, jump, return).
pub const CLASS_CONTROL: u8 = b'c';
/// `C` - compound (n-ary) compare-jump.
pub const CLASS_COMPOUND_COMPARE: u8 = b'C';
/// `m` - memory (scope get/set/isset/unset).
pub const CLASS_MEMORY: u8 = b'm';
/// `i` - increment.
pub const CLASS_INCREMENT: u8 = b'i';
/// `s` - reserved, never valid at runtime.
pub const CLASS_RESERVED: u8 = b's';

pub const ACTION_CALL: u8 = b'c';
pub const ACTION_DEFINE: u8 = b'd';

pub const ACTION_STRING_TABLE_SKIP: u8 = b's';
pub const ACTION_COMPARE_JUMP: u8 = b'c';
pub const ACTION_JUMP: u8 = b'j';
pub const ACTION_RETURN: u8 = b'r';
pub const ACTION_INVALID_RETURN: u8 = b't';

pub const ACTION_GET: u8 = b'g';
pub const ACTION_SET: u8 = b's';
pub const ACTION_IS_SET: u8 = b'h';
pub const ACTION_UNSET: u8 = b'u';

/// A comparison operator, as carried by the `C` opcode's action byte and by
/// the `=`/`<`/`>`/`<>` builtins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmpOp {
    Equal,
    NotEqual,
    Less,
    Greater,
}

impl CmpOp {
    #[must_use]
    pub const fn from_byte(b: u8) -> Option<Self> {
        Some(match b {
            b'=' => Self::Equal,
            b'!' => Self::NotEqual,
            b'<' => Self::Less,
            b'>' => Self::Greater,
            _ => return None,
        })
    }

    #[must_use]
    pub const fn to_byte(self) -> u8 {
        match self {
            Self::Equal => b'=',
            Self::NotEqual => b'!',
            Self::Less => b'<',
            Self::Greater => b'>',
        }
    }
}

/// One decoded scope-memory operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemOp {
    Get,
    /// `index_count` peels that many prior indexing tags off the stack
    /// before the assignment, for indexed assignment forms.
    Set { index_count: u8 },
    IsSet,
    Unset,
}

/// A fully decoded instruction. Anything not matching one of these shapes
/// (including any tag whose class byte isn't one of the six above) is
/// invalid bytecode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// `OP('c','s', jump)` - bytecode unit header.
    StringTableSkip { skip_in_tags: u32 },
    /// `fc` - call `name` with `arg_count` arguments already on the stack.
    Call { crushed_name: u32, arg_count: u8 },
    /// `fd` - register a function; body follows at `PC + 3`, skipped by
    /// advancing the program counter by `skip_in_tags` from this opcode.
    Define { skip_in_tags: u32 },
    /// `cc` - pop one value; jump by `distance` if it is falsy.
    CompareJump { distance: i32 },
    /// `Cop` - pop `arg_count` values, fold with `op`; jump by `distance`
    /// if the fold is false.
    CompoundCompareJump { op: CmpOp, arg_count: u8, distance: i32 },
    /// `cj` - unconditional jump.
    Jump { distance: i32 },
    /// `cr` - pop the return stack into PC, pop the scope frame.
    Return,
    /// `ct` - invalid-return sentinel; always an error if executed.
    InvalidReturn,
    /// `mg`/`ms`/`mh`/`mu` - scope memory operation on the variable named
    /// by `crushed_name`.
    Memory { op: MemOp, crushed_name: u32 },
    /// `i` - add `delta` to the Integer-shaped variable named by
    /// `crushed_name`.
    Increment { delta: i8, crushed_name: u32 },
    /// `s` - reserved, decoded only so the disassembler can report it.
    Reserved,
}

impl Instruction {
    /// Decodes `tag` as an instruction, or `None` if its class/action pair
    /// doesn't name one of the shapes above.
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub fn decode(tag: Tag) -> Option<Self> {
        let (class, action, payload, p3) = tag.decode_long_opcode();
        match class {
            CLASS_CONTROL => match action {
                ACTION_STRING_TABLE_SKIP => Some(Self::StringTableSkip { skip_in_tags: payload }),
                ACTION_COMPARE_JUMP => Some(Self::CompareJump { distance: payload as i32 }),
                ACTION_JUMP => Some(Self::Jump { distance: payload as i32 }),
                ACTION_RETURN => Some(Self::Return),
                ACTION_INVALID_RETURN => Some(Self::InvalidReturn),
                _ => None,
            },
            CLASS_FUNCTION => match action {
                ACTION_CALL => Some(Self::Call { crushed_name: payload, arg_count: p3 }),
                ACTION_DEFINE => Some(Self::Define { skip_in_tags: payload }),
                _ => None,
            },
            CLASS_COMPOUND_COMPARE => {
                let op = CmpOp::from_byte(action)?;
                Some(Self::CompoundCompareJump { op, arg_count: p3, distance: payload as i32 })
            }
            CLASS_MEMORY => {
                let op = match action {
                    ACTION_GET => MemOp::Get,
                    ACTION_SET => MemOp::Set { index_count: p3 },
                    ACTION_IS_SET => MemOp::IsSet,
                    ACTION_UNSET => MemOp::Unset,
                    _ => return None,
                };
                Some(Self::Memory { op, crushed_name: payload })
            }
            CLASS_RESERVED => Some(Self::Reserved),
            CLASS_INCREMENT => {
                #[allow(clippy::cast_possible_wrap)]
                let delta = action as i8;
                Some(Self::Increment { delta, crushed_name: payload })
            }
            _ => None,
        }
    }

    /// Encodes this instruction back into a [`Tag`].
    #[must_use]
    #[allow(clippy::cast_sign_loss)]
    pub fn encode(self) -> Tag {
        match self {
            Self::StringTableSkip { skip_in_tags } => {
                Tag::encode_long_opcode(CLASS_CONTROL, ACTION_STRING_TABLE_SKIP, skip_in_tags)
            }
            Self::Call { crushed_name, arg_count } => {
                Tag::encode_wide_long_opcode(CLASS_FUNCTION, ACTION_CALL, crushed_name, arg_count)
            }
            Self::Define { skip_in_tags } => Tag::encode_long_opcode(CLASS_FUNCTION, ACTION_DEFINE, skip_in_tags),
            Self::CompareJump { distance } => {
                Tag::encode_long_opcode(CLASS_CONTROL, ACTION_COMPARE_JUMP, distance as u32)
            }
            Self::CompoundCompareJump { op, arg_count, distance } => {
                Tag::encode_wide_long_opcode(CLASS_COMPOUND_COMPARE, op.to_byte(), distance as u32, arg_count)
            }
            Self::Jump { distance } => Tag::encode_long_opcode(CLASS_CONTROL, ACTION_JUMP, distance as u32),
            Self::Return => Tag::encode_opcode(CLASS_CONTROL, ACTION_RETURN, 0, 0),
            Self::InvalidReturn => Tag::encode_opcode(CLASS_CONTROL, ACTION_INVALID_RETURN, 0, 0),
            Self::Memory { op, crushed_name } => {
                let (action, index_count) = match op {
                    MemOp::Get => (ACTION_GET, 0),
                    MemOp::Set { index_count } => (ACTION_SET, index_count),
                    MemOp::IsSet => (ACTION_IS_SET, 0),
                    MemOp::Unset => (ACTION_UNSET, 0),
                };
                Tag::encode_wide_long_opcode(CLASS_MEMORY, action, crushed_name, index_count)
            }
            Self::Increment { delta, crushed_name } => {
                Tag::encode_long_opcode(CLASS_INCREMENT, delta as u8, crushed_name)
            }
            Self::Reserved => Tag::encode_opcode(CLASS_RESERVED, 0, 0, 0),
        }
    }
}
