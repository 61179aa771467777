// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Mira Project Contributors

//! # Mira VM
//!
//! The interpreter for Mira's tagged bytecode.
//!
//! This crate provides:
//! - One arena-backed heap and scope stack per process
//! - The fetch-decode-dispatch loop driving [`Instruction`](mira_bytecode::Instruction) execution
//! - Type coercion between tag kinds
//! - The fixed built-in function table
//! - A deterministic PRNG for the `random` builtin
//!
//! A process never shares memory with another; IPC between them happens
//! by value, through [`Interpreter::deliver_ipc`] and the
//! [`ExecutionState::IpcSend`]/[`ExecutionState::IpcWait`] pair a
//! scheduler observes from [`Interpreter::run`].

pub mod builtins;
pub mod coercion;
pub mod error;
pub mod interpreter;
pub mod random;
pub mod scope;
pub mod state;

pub use error::RuntimeError;
pub use interpreter::Interpreter;
pub use scope::Scope;
pub use state::ExecutionState;
