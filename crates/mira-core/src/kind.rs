// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Mira Project Contributors

#[cfg(test)]
mod kind_test;

/// High bit of [`Kind`] that marks a tag's payload as an arena handle rather
/// than an inline value. Such tags must be dereferenced through an arena
/// before their contents can be read, and their lifetime is governed by
/// zone refcounts.
pub const ALLOCATED_BIT: u8 = 0x80;

/// Bit of [`Kind`] that marks a tag as holding a number (integer or
/// fraction). Arithmetic builtins dispatch on this bit rather than
/// matching every numeric variant individually.
pub const NUMERIC_BIT: u8 = 0x40;

/// The kind byte of a [`Tag`](crate::Tag).
///
/// Values 0-10 are core bytecode/control markers, 11-63 are inline
/// non-numeric values, 64-126 are numeric, and 128-249 are allocated
/// (arena-resident). The ranges are not enforced by the type itself -
/// `Kind` is a closed enum over the concrete variants the runtime uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Kind {
    /// Uninitialised or sentinel tag. Never a valid result.
    Invalid = 0,
    /// Payload is a crushed name hash identifying a variable or function.
    VariableRef = 1,
    /// Payload and params together encode a bytecode instruction.
    Opcode = 2,
    /// Marks the end of a whole program; the interpreter halts.
    EndOfProgram = 3,
    /// Marks the end of a sub-program; the interpreter tears down one call
    /// frame and continues.
    EndOfSubProgram = 4,
    /// "Not a Result" - propagates through calculations like a poison value.
    NotAResult = 5,
    /// Unrecoverable runtime error. Payload is the faulting bytecode
    /// location.
    Exception = 6,
    /// No value was returned.
    Void = 7,
    /// No value, but present as part of a larger return.
    Unit = 8,
    /// Payload is a pointer into a vector; params is the index within it.
    VectorIndex = 12,
    /// Payload is an arena handle to a debug/symbol string, ignored by
    /// ordinary evaluation.
    DebugStringPtr = 20,
    /// Params and payload together hold up to seven packed characters -
    /// no allocation required.
    SmallString = 21,
    /// Payload is an offset into the bytecode's static string table.
    StaticStringPtr = 22,
    /// Payload is a signed 32-bit integer. Params unused.
    Integer = NUMERIC_BIT + 1,
    /// Payload is the low 32 bits and params the high 24 bits of a 56-bit
    /// fixed-point fraction (see [`crate::Tag::fraction`]).
    Fraction = NUMERIC_BIT + 2,
    /// Payload is an arena handle to a hash map.
    HashMapPtr = ALLOCATED_BIT + 1,
    /// Payload is an arena handle to a vector.
    VectorPtr = ALLOCATED_BIT + 2,
    /// Payload is an arena handle to a dynamic, mutable string.
    DynStringPtr = ALLOCATED_BIT + StaticStringPtr as u8,
    /// The interpreter must suspend until more input arrives. Payload is
    /// the program counter to resume at.
    MustWait = 250,
    /// Internal testing marker, never produced by ordinary evaluation.
    Flag = 0xff,
}

impl Kind {
    /// Reconstructs a `Kind` from its raw byte, if it names one of the
    /// variants this runtime understands.
    #[must_use]
    pub const fn from_u8(byte: u8) -> Option<Self> {
        Some(match byte {
            0 => Self::Invalid,
            1 => Self::VariableRef,
            2 => Self::Opcode,
            3 => Self::EndOfProgram,
            4 => Self::EndOfSubProgram,
            5 => Self::NotAResult,
            6 => Self::Exception,
            7 => Self::Void,
            8 => Self::Unit,
            12 => Self::VectorIndex,
            20 => Self::DebugStringPtr,
            21 => Self::SmallString,
            22 => Self::StaticStringPtr,
            x if x == Self::Integer as u8 => Self::Integer,
            x if x == Self::Fraction as u8 => Self::Fraction,
            x if x == Self::HashMapPtr as u8 => Self::HashMapPtr,
            x if x == Self::VectorPtr as u8 => Self::VectorPtr,
            x if x == Self::DynStringPtr as u8 => Self::DynStringPtr,
            250 => Self::MustWait,
            0xff => Self::Flag,
            _ => return None,
        })
    }

    /// True if a tag of this kind holds an arena handle rather than an
    /// inline value.
    #[must_use]
    pub const fn is_allocated(self) -> bool {
        (self as u8) & ALLOCATED_BIT != 0
    }

    /// True if a tag of this kind holds a number.
    #[must_use]
    pub const fn is_numeric(self) -> bool {
        (self as u8) & NUMERIC_BIT != 0
    }

    /// A short, human-readable name, used by disassembly and error
    /// messages.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Invalid => "invalid",
            Self::VariableRef => "variable-ref",
            Self::Opcode => "opcode",
            Self::EndOfProgram => "end-of-program",
            Self::EndOfSubProgram => "end-of-sub-program",
            Self::NotAResult => "not-a-result",
            Self::Exception => "exception",
            Self::Void => "void",
            Self::Unit => "unit",
            Self::VectorIndex => "vector-index",
            Self::DebugStringPtr => "debug-string-ptr",
            Self::SmallString => "small-string",
            Self::StaticStringPtr => "static-string-ptr",
            Self::Integer => "integer",
            Self::Fraction => "fraction",
            Self::HashMapPtr => "hash-map-ptr",
            Self::VectorPtr => "vector-ptr",
            Self::DynStringPtr => "dyn-string-ptr",
            Self::MustWait => "must-wait",
            Self::Flag => "flag",
        }
    }
}
