// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Mira Project Contributors

//! Host-level failures that abort a `run` call outright.
//!
//! Application-level faults (assertion failure, undefined function,
//! arity mismatch, malformed IPC) are NOT represented here - per the
//! error-handling design, those surface in-band as
//! [`crate::state::ExecutionState::ErrorState`] so a debugger can inspect
//! the faulting PC. [`RuntimeError`] is reserved for conditions the
//! interpreter itself cannot recover from: a missing chunk, a dangling
//! object handle the host passed in, an object-table operation run out
//! of arena space.

use thiserror::Error;

/// Fatal conditions that prevent `run` from producing any
/// [`crate::state::ExecutionState`] at all.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeError {
    /// `run` was called before a chunk was loaded into the interpreter.
    #[error("no bytecode chunk loaded")]
    NoChunk,
    /// The instruction pointer fell outside the chunk's instruction
    /// stream without hitting a recognized end-of-program sentinel.
    #[error("instruction pointer {0} out of bounds")]
    IpOutOfBounds(u32),
    /// The return stack underflowed on `cr` - a `fc` into a user
    /// function was not matched by a prior push.
    #[error("return stack underflow at PC {0}")]
    ReturnStackUnderflow(u32),
    /// The global scope frame was dropped, which should be structurally
    /// impossible; indicates memory corruption or a bug in opcode
    /// dispatch.
    #[error("global scope frame was dropped")]
    GlobalFrameDropped,
    /// The arena backing this interpreter is exhausted and the
    /// allocation could not be satisfied even after a trim.
    #[error("arena exhausted during allocation")]
    ArenaExhausted,
}
