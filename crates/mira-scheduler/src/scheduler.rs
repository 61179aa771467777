// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Mira Project Contributors

//! Round-robin driver for a set of interpreters, with broadcast IPC.
//!
//! Grounded in `RuntimeScheduler.cpp`'s `RTSchedulerRun` for the overall
//! shape (inspect the cursor, run it if runnable, broadcast on
//! `IPC_Send`, check for whole-schedule completion) - but that function
//! never actually advances its round-robin cursor in the source provided,
//! which would starve every program after the first. This crate follows
//! spec.md's §4.10 written contract instead ("advance the cursor modulo
//! the program count" on every `run` call) rather than reproducing that
//! gap.

#[cfg(test)]
mod scheduler_test;

use std::path::{Path, PathBuf};

use mira_core::Tag;
use mira_vm::{ExecutionState, Interpreter};

use crate::error::SchedulerError;

/// Aggregate status of every scheduled program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    /// At least one program can still make progress.
    Running,
    /// At least one program ended in `ErrorState`.
    Faulted,
    /// Every program has reached `Complete`.
    Complete,
}

struct Program {
    interpreter: Interpreter,
    state: ExecutionState,
}

/// A set of interpreters sharing one round-robin cursor and one IPC bus.
pub struct Scheduler {
    programs: Vec<Program>,
    cursor: usize,
    last_run: usize,
    /// Directory `import`/`spawn` paths must resolve inside. CLI-supplied
    /// schedule arguments bypass this - only `IpcSpawn` requests raised
    /// from inside a running program are jailed.
    jail_dir: PathBuf,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::with_jail_dir(std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
    }

    #[must_use]
    pub fn with_jail_dir(jail_dir: impl Into<PathBuf>) -> Self {
        Self { programs: Vec::new(), cursor: 0, last_run: 0, jail_dir: jail_dir.into() }
    }

    /// Loads bytecode from `path` and adds it to the schedule as a fresh,
    /// runnable program. Returns its index. Unlike a program-requested
    /// `spawn`, `path` is not checked against the jail directory - it was
    /// supplied directly by the embedding host.
    pub fn add_program(&mut self, path: &Path) -> Result<usize, SchedulerError> {
        let bytes =
            std::fs::read(path).map_err(|source| SchedulerError::Io { path: path.to_path_buf(), source })?;
        let chunk = mira_bytecode::load_bytes(&bytes)
            .map_err(|source| SchedulerError::Load { path: path.to_path_buf(), source })?;
        #[allow(clippy::cast_possible_truncation)]
        let id = self.programs.len() as u32;
        let mut interpreter = Interpreter::new(id);
        interpreter.load(chunk, None);
        self.programs.push(Program { interpreter, state: ExecutionState::Paused });
        tracing::debug!(index = id, path = %path.display(), "scheduler: program loaded");
        Ok(self.programs.len() - 1)
    }

    #[must_use]
    pub fn program_count(&self) -> usize {
        self.programs.len()
    }

    /// Read-only access to a scheduled program's interpreter, e.g. to
    /// drain its output buffer.
    #[must_use]
    pub fn interpreter(&self, index: usize) -> Option<&Interpreter> {
        self.programs.get(index).map(|program| &program.interpreter)
    }

    #[must_use]
    pub fn interpreter_mut(&mut self, index: usize) -> Option<&mut Interpreter> {
        self.programs.get_mut(index).map(|program| &mut program.interpreter)
    }

    /// The index of the program most recently given a run slice.
    #[must_use]
    pub fn last_run_index(&self) -> usize {
        self.last_run
    }

    /// Aggregate status across every scheduled program.
    #[must_use]
    pub fn state(&self) -> SchedulerState {
        if self.programs.iter().any(|program| program.state.is_error()) {
            return SchedulerState::Faulted;
        }
        if self.programs.iter().all(|program| program.state.is_complete()) {
            return SchedulerState::Complete;
        }
        SchedulerState::Running
    }

    /// Gives the program at the cursor up to `rounds_per_slice` steps if
    /// it is in a runnable state, handles the resulting `IpcSend`
    /// broadcast or `IpcSpawn` request, then advances the cursor.
    pub fn run_slice(&mut self, rounds_per_slice: u32) -> Result<SchedulerState, SchedulerError> {
        if self.programs.is_empty() {
            return Err(SchedulerError::Empty);
        }
        if self.cursor >= self.programs.len() {
            self.cursor = 0;
        }
        let index = self.cursor;
        self.last_run = index;

        if self.programs[index].state.is_runnable() {
            let result = self.programs[index]
                .interpreter
                .run(rounds_per_slice)
                .map_err(|source| SchedulerError::Runtime { index, source })?;
            tracing::debug!(program_index = index, exit_state = ?result, "scheduler slice");
            match result {
                ExecutionState::IpcSend { target, payload } => {
                    self.broadcast(index, target, &payload);
                    // pc already moved past the `send` call; the program
                    // is immediately resumable, not suspended.
                    self.programs[index].state = ExecutionState::Paused;
                }
                ExecutionState::IpcSpawn { path } => {
                    let outcome = self.spawn(&path);
                    self.programs[index].interpreter.push_value(outcome);
                    self.programs[index].state = ExecutionState::Paused;
                }
                other => self.programs[index].state = other,
            }
        }

        self.cursor = (self.cursor + 1) % self.programs.len();
        Ok(self.state())
    }

    /// Drives `run_slice` until the schedule settles into `Complete` or
    /// `Faulted`.
    pub fn run_until_settled(&mut self, rounds_per_slice: u32) -> Result<SchedulerState, SchedulerError> {
        loop {
            match self.run_slice(rounds_per_slice)? {
                SchedulerState::Running => {}
                settled => return Ok(settled),
            }
        }
    }

    /// Delivers `{target, payload}` to every program, including the
    /// sender, and promotes any program that was blocked on exactly this
    /// target from `IpcWait` to `IpcReady`.
    fn broadcast(&mut self, sender: usize, target: Tag, payload: &[u8]) {
        let crushed = self.programs[sender].interpreter.crushed_target(target);
        for program in &mut self.programs {
            program.interpreter.deliver_ipc(crushed, payload.to_vec());
            if program.state == ExecutionState::IpcWait && program.interpreter.waiting_targets().count() == 0 {
                program.state = ExecutionState::IpcReady;
            }
        }
    }

    /// Resolves an `import`/`spawn` path inside the jail directory and
    /// loads it as a new program, returning the tag to push back onto the
    /// requesting interpreter's value stack: the new program's index on
    /// success, `NotAResult` if the path escapes the jail, isn't valid
    /// UTF-8, or fails to load.
    fn spawn(&mut self, raw_path: &[u8]) -> Tag {
        let Some(resolved) = std::str::from_utf8(raw_path).ok().and_then(|text| self.resolve_in_jail(text)) else {
            tracing::warn!("scheduler: spawn request rejected (outside jail or not valid UTF-8)");
            return Tag::non_result();
        };
        match self.add_program(&resolved) {
            #[allow(clippy::cast_possible_wrap)]
            Ok(new_index) => Tag::integer(new_index as i32),
            Err(error) => {
                tracing::warn!(%error, "scheduler: spawn request failed to load");
                Tag::non_result()
            }
        }
    }

    fn resolve_in_jail(&self, relative: &str) -> Option<PathBuf> {
        let candidate = self.jail_dir.join(relative);
        let jail = self.jail_dir.canonicalize().ok()?;
        let resolved = candidate.canonicalize().ok()?;
        resolved.starts_with(&jail).then_some(resolved)
    }
}
