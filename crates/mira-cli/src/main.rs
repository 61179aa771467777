// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Mira Project Contributors

//! Command-line host for Mira bytecode: run a single program, drive several
//! programs under a round-robin scheduler, or disassemble a bytecode file.

use std::io::Write as _;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use mira_bytecode::SymbolTable;
use mira_scheduler::{Scheduler, SchedulerState};
use mira_vm::{ExecutionState, Interpreter};

/// Exit code for a program that froze in `ErrorState`.
const EXIT_ERROR_STATE: u8 = 1;
/// Exit code for a program that never reached a terminal state within its step budget.
const EXIT_NON_TERMINATING: u8 = 2;
/// Exit code for malformed bytecode, symbols, or CLI arguments.
const EXIT_MALFORMED_INPUT: u8 = 3;

const DEFAULT_MAX_STEPS: u32 = 1_000_000;
const DEFAULT_ROUNDS_PER_SLICE: u32 = 1_000;

#[derive(Debug, Parser)]
#[command(name = "mira", about = "Run and inspect Mira bytecode programs")]
struct Args {
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Debug, Subcommand)]
enum Cmd {
    /// Run a single bytecode file to completion, piping stdin/stdout through it.
    Run {
        bytecode_file: PathBuf,
        /// Symbol table used to render disassembly and error messages.
        #[arg(long)]
        symbols: Option<PathBuf>,
        /// Total step budget before giving up and reporting non-termination.
        #[arg(long, default_value_t = DEFAULT_MAX_STEPS)]
        max_steps: u32,
        /// Steps given to the interpreter per slice, between stdin/stdout pumps.
        #[arg(long, default_value_t = DEFAULT_ROUNDS_PER_SLICE)]
        rounds_per_slice: u32,
    },
    /// Run several bytecode files together under a round-robin scheduler.
    Schedule {
        bytecode_files: Vec<PathBuf>,
        /// Steps given to whichever program is at the cursor each slice.
        #[arg(long, default_value_t = DEFAULT_ROUNDS_PER_SLICE)]
        rounds_per_slice: u32,
        /// Directory `import`/`spawn` paths must resolve inside. Defaults to
        /// the directory containing the first bytecode file.
        #[arg(long)]
        jail_dir: Option<PathBuf>,
    },
    /// Print one line per instruction in a bytecode file.
    Disassemble {
        bytecode_file: PathBuf,
        #[arg(long)]
        symbols: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    match run(args) {
        Ok(code) => ExitCode::from(code),
        Err(error) => {
            eprintln!("error: {error:#}");
            ExitCode::from(EXIT_MALFORMED_INPUT)
        }
    }
}

fn run(args: Args) -> Result<u8> {
    match args.cmd {
        Cmd::Run { bytecode_file, symbols, max_steps, rounds_per_slice } => {
            cmd_run(&bytecode_file, symbols.as_deref(), max_steps, rounds_per_slice)
        }
        Cmd::Schedule { bytecode_files, rounds_per_slice, jail_dir } => {
            cmd_schedule(&bytecode_files, rounds_per_slice, jail_dir)
        }
        Cmd::Disassemble { bytecode_file, symbols } => cmd_disassemble(&bytecode_file, symbols.as_deref()),
    }
}

fn load_symbols(path: Option<&std::path::Path>) -> Result<Option<SymbolTable>> {
    let Some(path) = path else { return Ok(None) };
    let bytes = std::fs::read(path).with_context(|| format!("reading symbol file {}", path.display()))?;
    let table = SymbolTable::parse(&bytes).with_context(|| format!("parsing symbol file {}", path.display()))?;
    Ok(Some(table))
}

fn cmd_run(
    bytecode_file: &std::path::Path,
    symbols: Option<&std::path::Path>,
    max_steps: u32,
    rounds_per_slice: u32,
) -> Result<u8> {
    let bytes =
        std::fs::read(bytecode_file).with_context(|| format!("reading {}", bytecode_file.display()))?;
    let chunk = mira_bytecode::load_bytes(&bytes).with_context(|| format!("loading {}", bytecode_file.display()))?;
    let symbols = load_symbols(symbols)?;

    let mut vm = Interpreter::new(0);
    vm.load(chunk, symbols);

    let stdout = std::io::stdout();
    let stdin = std::io::stdin();
    let mut steps_spent: u64 = 0;

    loop {
        let budget = u32::try_from(u64::from(max_steps).saturating_sub(steps_spent)).unwrap_or(u32::MAX);
        let slice = rounds_per_slice.min(budget).max(1);
        let state = vm.run(slice)?;
        steps_spent = steps_spent.saturating_add(u64::from(slice));

        pump_output(&mut vm, &stdout)?;

        match state {
            ExecutionState::Complete(_) => return Ok(0),
            ExecutionState::ErrorState(_) => return Ok(EXIT_ERROR_STATE),
            ExecutionState::Waiting => {
                let mut line = String::new();
                let read = stdin.read_line(&mut line).context("reading stdin")?;
                if read == 0 {
                    vm.feed_input(b"\n");
                } else {
                    vm.feed_input(line.as_bytes());
                }
            }
            ExecutionState::Paused => {
                if steps_spent >= u64::from(max_steps) {
                    return Ok(EXIT_NON_TERMINATING);
                }
            }
            ExecutionState::IpcSend { .. } | ExecutionState::IpcWait | ExecutionState::IpcReady => {
                bail!("program {} issued an IPC call outside a scheduler", bytecode_file.display());
            }
            ExecutionState::IpcSpawn { .. } => {
                bail!("program {} issued import/spawn outside a scheduler", bytecode_file.display());
            }
        }

        if steps_spent >= u64::from(max_steps) {
            return Ok(EXIT_NON_TERMINATING);
        }
    }
}

fn pump_output(vm: &mut Interpreter, stdout: &std::io::Stdout) -> Result<()> {
    let output = vm.take_output();
    if output.is_empty() {
        return Ok(());
    }
    let mut handle = stdout.lock();
    handle.write_all(output.as_bytes()).context("writing to stdout")?;
    handle.flush().context("flushing stdout")
}

fn cmd_schedule(bytecode_files: &[PathBuf], rounds_per_slice: u32, jail_dir: Option<PathBuf>) -> Result<u8> {
    let Some(first) = bytecode_files.first() else {
        bail!("schedule requires at least one bytecode file");
    };
    let jail_dir = jail_dir
        .or_else(|| first.parent().map(std::path::Path::to_path_buf))
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));

    let mut scheduler = Scheduler::with_jail_dir(jail_dir);
    for path in bytecode_files {
        scheduler.add_program(path).with_context(|| format!("loading {}", path.display()))?;
    }

    let settled = scheduler.run_until_settled(rounds_per_slice)?;
    for index in 0..scheduler.program_count() {
        if let Some(interpreter) = scheduler.interpreter_mut(index) {
            print!("{}", interpreter.take_output());
        }
    }

    match settled {
        SchedulerState::Complete => Ok(0),
        SchedulerState::Faulted => Ok(EXIT_ERROR_STATE),
        SchedulerState::Running => Ok(EXIT_NON_TERMINATING),
    }
}

fn cmd_disassemble(bytecode_file: &std::path::Path, symbols: Option<&std::path::Path>) -> Result<u8> {
    let bytes =
        std::fs::read(bytecode_file).with_context(|| format!("reading {}", bytecode_file.display()))?;
    let chunk = mira_bytecode::load_bytes(&bytes).with_context(|| format!("loading {}", bytecode_file.display()))?;
    let symbols = load_symbols(symbols)?;
    println!("{}", mira_bytecode::disassemble(&chunk, symbols.as_ref()));
    Ok(0)
}
