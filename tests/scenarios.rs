//! End-to-end runs of the `hsh` binary with piped (non-interactive) stdin.

use std::fs;
use std::io::Write;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

const BIN: &str = env!("CARGO_BIN_EXE_hsh");

fn run(input: &str, env: &[(&str, &str)]) -> Output {
    run_in(None, input, env)
}

fn run_in(dir: Option<&Path>, input: &str, env: &[(&str, &str)]) -> Output {
    let mut command = Command::new(BIN);
    if let Some(dir) = dir {
        command.current_dir(dir);
    }
    let mut child = command
        .env_clear()
        .envs(env.iter().copied())
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap_or_else(|e| panic!("failed to spawn {}: {}", BIN, e));

    child
        .stdin
        .take()
        .unwrap()
        .write_all(input.as_bytes())
        .unwrap();
    child.wait_with_output().unwrap()
}

fn default_env() -> Vec<(&'static str, &'static str)> {
    vec![("PATH", "/usr/bin:/bin")]
}

#[test]
fn test_echo_then_exit() {
    let output = run("/bin/echo hi\nexit\n", &default_env());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "hi\n");
    assert!(output.stderr.is_empty());
    assert_eq!(output.status.code(), Some(0));
}

#[test]
fn test_not_found_without_exit() {
    let output = run("doesnotexist\n", &default_env());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains(&format!("{}: 1: doesnotexist: not found", BIN)),
        "stderr was {:?}",
        stderr
    );
    assert!(output.stdout.is_empty());
    assert_eq!(output.status.code(), Some(127));
}

#[test]
fn test_immediate_eof() {
    let output = run("", &default_env());
    assert!(output.stdout.is_empty());
    assert_eq!(output.status.code(), Some(0));
}

#[test]
fn test_no_prompt_when_piped() {
    let output = run("\n  \nexit\n", &default_env());
    assert!(output.stdout.is_empty());
    assert!(output.stderr.is_empty());
    assert_eq!(output.status.code(), Some(0));
}

#[test]
fn test_path_search_and_arguments() {
    let output = run("echo one  two\tthree\n", &default_env());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "one two three\n");
    assert_eq!(output.status.code(), Some(0));
}

#[test]
fn test_env_prints_inherited_environment() {
    // std sorts the environment it builds, so the expected order is sorted too
    let env = [("A", "1"), ("B", "two words"), ("PATH", "/usr/bin:/bin")];
    let output = run("env\n", &env);
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "A=1\nB=two words\nPATH=/usr/bin:/bin\n"
    );
    assert_eq!(output.status.code(), Some(0));
}

#[test]
fn test_children_inherit_environment() {
    let env = [("GREETING", "hello"), ("PATH", "/usr/bin:/bin")];
    let output = run("env\n/usr/bin/env\n", &env);
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "GREETING=hello\nPATH=/usr/bin:/bin\nGREETING=hello\nPATH=/usr/bin:/bin\n"
    );
}

#[test]
fn test_exit_status_of_children() -> std::io::Result<()> {
    let dir = TempDir::new()?;
    let three = dir.path().join("three.sh");
    let killed = dir.path().join("killed.sh");
    fs::write(&three, "exit 3\n")?;
    fs::write(&killed, "kill -9 $$\n")?;

    let output = run(&format!("/bin/sh {}\n", three.display()), &default_env());
    assert_eq!(output.status.code(), Some(3));

    let output = run(&format!("/bin/sh {}\n", killed.display()), &default_env());
    assert_eq!(output.status.code(), Some(137));

    let output = run(
        &format!("/bin/sh {}\nexit\n", killed.display()),
        &default_env(),
    );
    assert_eq!(output.status.code(), Some(137));
    Ok(())
}

#[test]
fn test_recovers_after_failure() {
    let output = run("nope\n/bin/echo still here\n", &default_env());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "still here\n");
    assert_eq!(output.status.code(), Some(0));
}

#[test]
fn test_literal_path_does_not_use_path() {
    let output = run("./echo hi\n", &default_env());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("1: ./echo: not found"), "stderr was {:?}", stderr);
    assert_eq!(output.status.code(), Some(127));
}

#[test]
fn test_missing_path_variable() {
    let output = run("echo hi\n/bin/echo ok\n", &[]);
    assert_eq!(String::from_utf8_lossy(&output.stdout), "ok\n");
    assert!(String::from_utf8_lossy(&output.stderr).contains(": 1: echo: not found"));
    assert_eq!(output.status.code(), Some(0));
}

#[test]
fn test_child_can_be_interrupted_after_shell_ignores_sigint() -> std::io::Result<()> {
    let dir = TempDir::new()?;
    let interrupted = dir.path().join("interrupted.sh");
    fs::write(&interrupted, "kill -INT $$\n")?;

    // the first spawn switches the shell to ignoring SIGINT
    let input = format!("/bin/true\n/bin/sh {}\n", interrupted.display());
    let output = run(&input, &default_env());
    assert_eq!(output.status.code(), Some(130));
    assert!(output.stderr.is_empty());
    Ok(())
}

#[test]
fn test_empty_path_component_is_not_current_dir() -> std::io::Result<()> {
    let dir = TempDir::new()?;
    let tool = dir.path().join("cwdtool");
    fs::write(&tool, "#!/bin/sh\n")?;
    fs::set_permissions(&tool, fs::Permissions::from_mode(0o755))?;

    let output = run_in(Some(dir.path()), "cwdtool\n", &[("PATH", ":/bin")]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("1: cwdtool: not found"), "stderr was {:?}", stderr);
    assert_eq!(output.status.code(), Some(127));
    Ok(())
}
