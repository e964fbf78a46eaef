//! Drives the compiled shell over piped standard input.

use std::io::{BufRead, BufReader, Write};
use std::process::{Command, Output, Stdio};

fn shell() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_myshell"));
    cmd.arg("--no-color")
        .env("RUST_LOG", "off")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    cmd
}

fn run_script(script: &str) -> Output {
    let mut child = shell().spawn().expect("failed to start myshell");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(script.as_bytes())
        .unwrap();
    child.wait_with_output().unwrap()
}

#[test]
fn quit_exits_with_status_zero() {
    let output = run_script("myecho before\nmyquit\nmyecho after\n");
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout.contains("before\n"));
    assert!(stdout.contains("Exiting MyShell...\n"));
    assert!(!stdout.contains("after"));
}

#[test]
fn end_of_input_quits() {
    let output = run_script("myecho only line\n");
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout.contains("only line\n"));
    assert!(stdout.contains("Exiting MyShell...\n"));
}

#[test]
fn builtins_report_their_results() {
    let output = run_script(
        "MYECHO Mixed   Case\nmyone 0\nmyone -5\nmyone 8\nfrobnicate\nmycd /\nmycd\nmyquit\n",
    );
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout.contains("Mixed Case\n"));
    assert_eq!(stdout.matches("Invalid password length\n").count(), 2);
    assert!(stdout.contains("Unknown command: frobnicate\n"));
    assert!(stdout.contains("Directory changed to: /\n"));
    assert!(stdout.contains("Current directory: /\n"));

    let password = stdout
        .lines()
        .find_map(|line| line.split("Generated password: ").nth(1))
        .expect("no password generated");
    assert_eq!(password.len(), 8);
}

#[test]
fn oversized_password_length_keeps_the_session() {
    let output = run_script("myone 1000000000000000000\nmyecho survived\nmyquit\n");
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout.contains("Password length must not exceed 4096\n"));
    assert!(stdout.contains("survived\n"));
    assert!(stdout.contains("Exiting MyShell...\n"));
}

#[test]
fn version_flag() {
    let output = Command::new(env!("CARGO_BIN_EXE_myshell"))
        .arg("--version")
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        format!("myshell {}\n", env!("CARGO_PKG_VERSION"))
    );
}

#[test]
#[cfg(unix)]
fn interrupts_do_not_end_the_session() {
    use nix::sys::signal::{Signal, kill};
    use nix::unistd::Pid;

    let mut child = shell().spawn().expect("failed to start myshell");
    let pid = Pid::from_raw(child.id() as i32);
    let mut stdin = child.stdin.take().unwrap();
    let mut lines = BufReader::new(child.stdout.take().unwrap()).lines();
    let mut wait_for = |needle: &str| {
        lines
            .by_ref()
            .map(|line| line.unwrap())
            .find(|line| line.contains(needle))
            .unwrap_or_else(|| panic!("shell ended before printing {needle:?}"));
    };

    // Handlers are armed before the first line is read.
    writeln!(stdin, "myecho ready").unwrap();
    wait_for("ready");

    for signal in [Signal::SIGINT, Signal::SIGTSTP, Signal::SIGINT] {
        kill(pid, signal).unwrap();
        wait_for(&format!("{signal} received. Use 'myquit' to exit the shell."));
    }

    writeln!(stdin, "myecho still alive").unwrap();
    wait_for("still alive");
    writeln!(stdin, "myquit").unwrap();
    wait_for("Exiting MyShell...");

    assert_eq!(child.wait().unwrap().code(), Some(0));
}
