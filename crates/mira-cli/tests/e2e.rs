// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Mira Project Contributors

//! Black-box coverage of the six scenarios spec.md §8 names, driven through
//! the actual `mira` binary the way a user would invoke it.

use std::io::Write as _;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::sync::atomic::{AtomicU32, Ordering};

use mira_bytecode::chunk::tag_raw_bytes;
use mira_bytecode::Instruction;
use mira_core::{crushed_name, Tag};

static COUNTER: AtomicU32 = AtomicU32::new(0);

fn bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_mira"))
}

fn write_program(tags: &[Tag]) -> PathBuf {
    let name = format!("mira-cli-e2e-{}-{}.mira", std::process::id(), COUNTER.fetch_add(1, Ordering::Relaxed));
    let path = std::env::temp_dir().join(name);
    let mut bytes = Vec::with_capacity((tags.len() + 1) * 8);
    bytes.extend_from_slice(&tag_raw_bytes(Instruction::StringTableSkip { skip_in_tags: 1 }.encode()));
    for tag in tags {
        bytes.extend_from_slice(&tag_raw_bytes(*tag));
    }
    std::fs::write(&path, bytes).expect("can write to the system temp directory");
    path
}

struct RunOutput {
    status: i32,
    stdout: String,
}

fn run(args: &[&str], stdin_text: &str) -> RunOutput {
    let mut child = Command::new(bin())
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::inherit())
        .spawn()
        .expect("mira binary builds and spawns");
    child.stdin.take().expect("stdin piped").write_all(stdin_text.as_bytes()).expect("write stdin");
    let output = child.wait_with_output().expect("child exits");
    RunOutput {
        status: output.status.code().expect("exits without a signal"),
        stdout: String::from_utf8(output.stdout).expect("output is valid UTF-8"),
    }
}

#[test]
fn arithmetic_program_completes_with_exit_code_zero() {
    let path = write_program(&[
        Tag::integer(3),
        Tag::integer(4),
        Instruction::Call { crushed_name: crushed_name("+"), arg_count: 2 }.encode(),
    ]);
    let result = run(&["run", path.to_str().expect("utf8 temp path")], "");
    assert_eq!(result.status, 0);
    std::fs::remove_file(path).ok();
}

#[test]
fn readline_echoes_back_what_was_typed() {
    let path = write_program(&[
        Instruction::Call { crushed_name: crushed_name("readline"), arg_count: 0 }.encode(),
        Instruction::Call { crushed_name: crushed_name("print"), arg_count: 1 }.encode(),
    ]);
    let result = run(&["run", path.to_str().expect("utf8 temp path")], "hello\n");
    assert_eq!(result.status, 0);
    assert_eq!(result.stdout, "hello\n");
    std::fs::remove_file(path).ok();
}

#[test]
fn a_spinning_program_is_reported_as_non_terminating() {
    let path = write_program(&[Instruction::Jump { distance: 0 }.encode()]);
    let result = run(&["run", path.to_str().expect("utf8 temp path"), "--max-steps", "100"], "");
    assert_eq!(result.status, 2);
    std::fs::remove_file(path).ok();
}

#[test]
fn compare_jump_skips_the_false_branch_end_to_end() {
    let path = write_program(&[
        Tag::integer(0),
        Instruction::CompareJump { distance: 2 }.encode(),
        Tag::integer(1),
        Tag::integer(2),
    ]);
    let result = run(&["run", path.to_str().expect("utf8 temp path")], "");
    assert_eq!(result.status, 0);
    std::fs::remove_file(path).ok();
}

#[test]
fn an_undefined_function_call_is_reported_as_error_state() {
    let path =
        write_program(&[Instruction::Call { crushed_name: crushed_name("no-such-function"), arg_count: 0 }
            .encode()]);
    let result = run(&["run", path.to_str().expect("utf8 temp path")], "");
    assert_eq!(result.status, 1);
    std::fs::remove_file(path).ok();
}

#[test]
fn scheduled_programs_communicate_over_ipc_and_both_complete() {
    let sender = write_program(&[
        Tag::encode_short_str("ch"),
        Tag::integer(42),
        Instruction::Call { crushed_name: crushed_name("send"), arg_count: 2 }.encode(),
    ]);
    let receiver = write_program(&[
        Tag::encode_short_str("ch"),
        Instruction::Call { crushed_name: crushed_name("wait"), arg_count: 1 }.encode(),
        Instruction::Call { crushed_name: crushed_name("print"), arg_count: 1 }.encode(),
    ]);
    let result = run(
        &["schedule", sender.to_str().expect("utf8 temp path"), receiver.to_str().expect("utf8 temp path")],
        "",
    );
    assert_eq!(result.status, 0);
    assert!(result.stdout.contains("42"));
    std::fs::remove_file(sender).ok();
    std::fs::remove_file(receiver).ok();
}

#[test]
fn disassemble_prints_one_line_per_instruction() {
    let path = write_program(&[
        Tag::integer(3),
        Tag::integer(4),
        Instruction::Call { crushed_name: crushed_name("+"), arg_count: 2 }.encode(),
    ]);
    let result = run(&["disassemble", path.to_str().expect("utf8 temp path")], "");
    assert_eq!(result.status, 0);
    assert!(result.stdout.lines().count() >= 4, "expected a header line plus one per tag, got:\n{}", result.stdout);
    std::fs::remove_file(path).ok();
}
