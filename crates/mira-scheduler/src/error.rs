// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Mira Project Contributors

use std::path::PathBuf;

use thiserror::Error;

/// Faults a scheduler can report while building or driving a schedule.
#[derive(Debug, Error)]
pub enum SchedulerError {
    #[error("could not read bytecode file {path}: {source}")]
    Io { path: PathBuf, #[source] source: std::io::Error },

    #[error("could not load bytecode file {path}: {source}")]
    Load { path: PathBuf, #[source] source: mira_bytecode::LoadError },

    #[error("a host-level fault occurred running program {index}: {source}")]
    Runtime { index: usize, #[source] source: mira_vm::RuntimeError },

    #[error("no programs are scheduled")]
    Empty,
}
