// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Mira Project Contributors

//! Bytecode chunk format, loader, and disassembler for the Mira VM.
//!
//! A Mira bytecode unit is a flat vector of 64-bit [tags](mira_core::Tag):
//! a header naming where the string table ends, the string table itself,
//! and an instruction stream in which opcode tags are interleaved with the
//! literal value tags they operate on. See [`loader::load_bytes`] for the
//! on-disk layout and [`opcode::Instruction`] for the decoded instruction
//! set.

#![cfg_attr(not(any(test, feature = "std")), no_std)]

#[cfg(not(any(test, feature = "std")))]
extern crate alloc;

pub mod chunk;
pub mod disassemble;
pub mod loader;
pub mod opcode;
pub mod symbols;

pub use chunk::Chunk;
pub use disassemble::disassemble;
pub use loader::{load_bytes, LoadError, Loader};
pub use opcode::{CmpOp, Instruction, MemOp};
pub use symbols::{SymbolLoadError, SymbolTable};
