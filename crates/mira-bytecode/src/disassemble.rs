// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Mira Project Contributors

//! Bytecode disassembler for debugging and the `mira disassemble` CLI
//! subcommand.

#[cfg(test)]
mod disassemble_test;

#[cfg(any(test, feature = "std"))]
use std::{format, string::String};

#[cfg(not(any(test, feature = "std")))]
use alloc::{format, string::String};

use core::fmt::Write as _;

use crate::chunk::Chunk;
use crate::opcode::{CmpOp, Instruction, MemOp};
use crate::symbols::SymbolTable;

/// Disassembles `chunk` to a human-readable listing. `symbols`, if given,
/// resolves crushed-name hashes to their original source names; without
/// it, every name prints as its raw hex hash.
#[must_use]
pub fn disassemble(chunk: &Chunk, symbols: Option<&SymbolTable>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "; string table ends at tag {}", chunk.code_start());

    let mut i = 0usize;
    while i < chunk.len() {
        let Some(tag) = chunk.tag_at(i) else { break };
        let _ = write!(out, "{i:04}: ");

        if i > 0 && i < chunk.code_start() {
            if let Some(s) = chunk.string_at(i) {
                let slots = s.len().div_ceil(8);
                let _ = writeln!(out, "STRING    {s:?}");
                i += 1 + slots;
                continue;
            }
            let _ = writeln!(out, "(string table body)");
            i += 1;
            continue;
        }

        match Instruction::decode(tag) {
            Some(Instruction::StringTableSkip { skip_in_tags }) => {
                let _ = writeln!(out, "HEADER    skip={skip_in_tags}");
            }
            Some(Instruction::Call { crushed_name, arg_count }) => {
                let _ = writeln!(out, "CALL      {}, {arg_count} args", render_name(symbols, crushed_name));
            }
            Some(Instruction::Define { skip_in_tags }) => {
                let _ = writeln!(out, "DEFINE    skip={skip_in_tags}");
            }
            Some(Instruction::CompareJump { distance }) => {
                let _ = writeln!(out, "JUMP_IF_FALSE {distance:+}");
            }
            Some(Instruction::CompoundCompareJump { op, arg_count, distance }) => {
                let _ = writeln!(out, "CMP_JUMP  {} {arg_count} args, {distance:+}", cmp_name(op));
            }
            Some(Instruction::Jump { distance }) => {
                let _ = writeln!(out, "JUMP      {distance:+}");
            }
            Some(Instruction::Return) => {
                let _ = writeln!(out, "RETURN");
            }
            Some(Instruction::InvalidReturn) => {
                let _ = writeln!(out, "INVALID_RETURN");
            }
            Some(Instruction::Memory { op, crushed_name }) => {
                let name = render_name(symbols, crushed_name);
                let _ = match op {
                    MemOp::Get => writeln!(out, "MGET      {name}"),
                    MemOp::Set { index_count } => writeln!(out, "MSET      {name}, {index_count} indices"),
                    MemOp::IsSet => writeln!(out, "MHAS      {name}"),
                    MemOp::Unset => writeln!(out, "MUNSET    {name}"),
                };
            }
            Some(Instruction::Increment { delta, crushed_name }) => {
                let _ = writeln!(out, "INCR      {} by {delta:+}", render_name(symbols, crushed_name));
            }
            Some(Instruction::Reserved) => {
                let _ = writeln!(out, "; reserved opcode, never valid");
            }
            None => {
                let _ = writeln!(out, "{tag:?}");
            }
        }
        i += 1;
    }

    out
}

fn cmp_name(op: CmpOp) -> &'static str {
    match op {
        CmpOp::Equal => "=",
        CmpOp::NotEqual => "<>",
        CmpOp::Less => "<",
        CmpOp::Greater => ">",
    }
}

fn render_name(symbols: Option<&SymbolTable>, crushed_name: u32) -> String {
    symbols.map_or_else(|| format!("0x{crushed_name:08x}"), |table| table.render(crushed_name))
}
