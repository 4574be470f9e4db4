//! Integration tests for the nncalc CLI.

use calc_cli as _;
use calc_core as _;
use serde as _;
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use toml as _;
use tracing as _;
use tracing_subscriber as _;

fn binary_path() -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop();
    path.pop();
    path.join("nncalc")
}

fn create_temp_file(dir: &std::path::Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

fn stdout_of(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr_of(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn run_prints_final_display() {
    let temp_dir = tempfile::tempdir().unwrap();
    let script = create_temp_file(temp_dir.path(), "power.calc", "2 enter clear 10 ^\n");

    let output = Command::new(binary_path())
        .args(["run", script.to_str().unwrap()])
        .output()
        .expect("failed to run nncalc");

    assert!(output.status.success());
    assert_eq!(
        stdout_of(&output),
        "top:    0\nbottom: 1024\ndisabled: subtract\n"
    );
}

#[test]
fn run_verbose_traces_every_key() {
    let temp_dir = tempfile::tempdir().unwrap();
    let script = create_temp_file(temp_dir.path(), "digits.calc", "5 3\n");

    let output = Command::new(binary_path())
        .args(["run", script.to_str().unwrap(), "--verbose"])
        .output()
        .expect("failed to run nncalc");

    assert!(output.status.success());
    let stdout = stdout_of(&output);
    assert!(stdout.contains("digit 5"));
    assert!(stdout.contains("top=0 bottom=53"));
}

#[test]
fn run_reports_fault_with_line() {
    let temp_dir = tempfile::tempdir().unwrap();
    let script = create_temp_file(
        temp_dir.path(),
        "fault.calc",
        "; divide by zero\n5 enter clear\n/\n",
    );

    let output = Command::new(binary_path())
        .args(["run", script.to_str().unwrap()])
        .output()
        .expect("failed to run nncalc");

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr_of(&output).contains("line 3: 'divide' faulted: division by zero"));
    assert!(stdout_of(&output).contains("top:    5\nbottom: 0\n"));
}

#[test]
fn test_passes_with_expectations() {
    let temp_dir = tempfile::tempdir().unwrap();
    let script = create_temp_file(
        temp_dir.path(),
        "pass.calc",
        "10 enter clear 3 -\nswap\nexpect top == 7\nexpect bottom == 0\nexpect divide disallowed\n",
    );

    let output = Command::new(binary_path())
        .args(["test", script.to_str().unwrap()])
        .output()
        .expect("failed to run nncalc");

    assert!(output.status.success());
    assert!(stdout_of(&output).contains("Test Summary: 3 passed, 0 failed"));
}

#[test]
fn test_fails_on_wrong_expectation() {
    let temp_dir = tempfile::tempdir().unwrap();
    let script = create_temp_file(temp_dir.path(), "fail.calc", "42\nexpect bottom == 41\n");

    let output = Command::new(binary_path())
        .args(["test", script.to_str().unwrap()])
        .output()
        .expect("failed to run nncalc");

    assert_eq!(output.status.code(), Some(1));
    let stdout = stdout_of(&output);
    assert!(stdout.contains("FAIL (line 2): bottom == 41 (got 42)"));
    assert!(stdout.contains("0 passed, 1 failed"));
}

#[test]
fn test_strict_flag_turns_guard_into_fault() {
    let temp_dir = tempfile::tempdir().unwrap();
    let script = create_temp_file(temp_dir.path(), "strict.calc", "3 -\nexpect top == 0\n");

    let output = Command::new(binary_path())
        .args(["test", script.to_str().unwrap(), "--strict"])
        .output()
        .expect("failed to run nncalc");

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr_of(&output).contains("subtract is not allowed"));
    assert!(stdout_of(&output).contains("1 unexecuted"));
}

#[test]
fn config_file_seeds_registers() {
    let temp_dir = tempfile::tempdir().unwrap();
    let config = create_temp_file(
        temp_dir.path(),
        "nncalc.toml",
        "top = \"18446744073709551616\"\nbottom = \"18446744073709551616\"\n",
    );
    let script = create_temp_file(
        temp_dir.path(),
        "big.calc",
        "*\nexpect bottom == 340282366920938463463374607431768211456\n",
    );

    let output = Command::new(binary_path())
        .args([
            "test",
            script.to_str().unwrap(),
            "--config",
            config.to_str().unwrap(),
        ])
        .output()
        .expect("failed to run nncalc");

    assert!(output.status.success(), "{}", stderr_of(&output));
}

#[test]
fn flags_override_config_file() {
    let temp_dir = tempfile::tempdir().unwrap();
    let config = create_temp_file(temp_dir.path(), "nncalc.toml", "bottom = \"9\"\n");
    let script = create_temp_file(temp_dir.path(), "seed.calc", "expect bottom == 4\n");

    let output = Command::new(binary_path())
        .args([
            "test",
            script.to_str().unwrap(),
            "-c",
            config.to_str().unwrap(),
            "--bottom",
            "4",
        ])
        .output()
        .expect("failed to run nncalc");

    assert!(output.status.success(), "{}", stdout_of(&output));
}

#[test]
fn invalid_config_is_reported() {
    let temp_dir = tempfile::tempdir().unwrap();
    let config = create_temp_file(temp_dir.path(), "nncalc.toml", "registers = 3\n");
    let script = create_temp_file(temp_dir.path(), "any.calc", "expect top == 0\n");

    let output = Command::new(binary_path())
        .args([
            "test",
            script.to_str().unwrap(),
            "--config",
            config.to_str().unwrap(),
        ])
        .output()
        .expect("failed to run nncalc");

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr_of(&output).contains("invalid settings"));
}

#[test]
fn parse_error_names_file_and_line() {
    let temp_dir = tempfile::tempdir().unwrap();
    let script = create_temp_file(temp_dir.path(), "bad.calc", "1 2\nsqrt\n");

    let output = Command::new(binary_path())
        .args(["run", script.to_str().unwrap()])
        .output()
        .expect("failed to run nncalc");

    assert_eq!(output.status.code(), Some(1));
    let stderr = stderr_of(&output);
    assert!(stderr.contains("bad.calc: line 2: unknown key 'sqrt'"));
}

#[test]
fn repl_reads_stdin() {
    let mut child = Command::new(binary_path())
        .args(["repl", "--top", "1024"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to run nncalc");

    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"10 root\n/\nquit\n")
        .unwrap();
    let output = child.wait_with_output().unwrap();

    assert!(output.status.success());
    let stdout = stdout_of(&output);
    assert!(stdout.starts_with("top:    1024\nbottom: 0\n"));
    assert!(stdout.contains("top:    0\nbottom: 2\n"));
    assert!(!stdout.contains("is disabled"));
}

#[test]
fn help_flag_prints_usage() {
    let output = Command::new(binary_path())
        .arg("--help")
        .output()
        .expect("failed to run nncalc");

    assert!(output.status.success());
    assert!(stdout_of(&output).starts_with("Usage: nncalc"));
}

#[test]
fn unknown_command_fails() {
    let output = Command::new(binary_path())
        .arg("compute")
        .output()
        .expect("failed to run nncalc");

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr_of(&output).contains("unknown command: compute"));
}
