// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Mira Project Contributors

//! The outcome of a [`crate::Interpreter::run`] slice.

use mira_core::Tag;

/// Why a `run` call returned control to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionState {
    /// The step budget passed to `run` was exhausted before the program
    /// finished; a later `run` call resumes at the same PC.
    Paused,
    /// A builtin like `readkey`/`readline` needs more input than is
    /// currently buffered. PC has been rewound to re-execute the same
    /// instruction once input arrives.
    Waiting,
    /// PC ran past the end of the instruction stream. Carries the value
    /// popped off the top of the value stack, or [`Tag::void_return`] if
    /// the stack was empty.
    Complete(Tag),
    /// A fatal condition (assertion failure, undefined function, arity
    /// mismatch, malformed IPC, stack underflow) froze execution at the
    /// faulting instruction. Carries the exception tag (kind = exception,
    /// payload = faulting PC).
    ErrorState(Tag),
    /// An `IpcSend`-class builtin fired. The caller (normally the
    /// scheduler) is responsible for broadcasting `target`/`payload` to
    /// every interpreter via `deliver_ipc`.
    IpcSend {
        /// Destination process name, as a dynamic-string tag.
        target: Tag,
        /// Serialized message bytes.
        payload: Vec<u8>,
    },
    /// An `IpcWait`-class builtin fired; the interpreter is now blocked
    /// until a matching message arrives. Call `waiting_targets` to see
    /// what it's blocked on.
    IpcWait,
    /// A previously blocked `IpcWait` was promoted because a matching
    /// message arrived; the interpreter is runnable again.
    IpcReady,
    /// The `spawn` builtin fired, naming a program to load. Carries the
    /// program path; the caller is responsible for invoking the
    /// scheduler's `add_program` and resuming this interpreter with the
    /// resulting program index (or `NotAResult` on failure) pushed onto
    /// its value stack.
    IpcSpawn {
        /// Path to the program to load, relative to the host's
        /// working-directory jail.
        path: Vec<u8>,
    },
}

impl ExecutionState {
    /// True for states from which a subsequent `run` call can make
    /// progress without external intervention (`Paused`) or after the
    /// scheduler has supplied what was missing (`Waiting`, `IpcReady`).
    #[must_use]
    pub fn is_runnable(&self) -> bool {
        matches!(self, Self::Paused | Self::Waiting | Self::IpcReady)
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        matches!(self, Self::Complete(_))
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        matches!(self, Self::ErrorState(_))
    }
}
