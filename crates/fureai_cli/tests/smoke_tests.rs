//! CLI smoke tests: verify basic binary behavior.

use std::io::Write;
use std::process::{Command, Stdio};

fn cli_bin() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_fureai"));
    // keep stray env from the host out of the run
    cmd.env_remove("FUREAI_CONFIG")
        .env_remove("FUREAI_GENDER")
        .env_remove("FUREAI_TICK_MS")
        .env_remove("FUREAI_HAPTICS");
    cmd
}

fn run_with_stdin(args: &[&str], input: &str) -> std::process::Output {
    let mut child = cli_bin()
        .args(args)
        .arg("--config")
        .arg("/tmp/nonexistent_fureai_config_12345.toml")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to run");
    child
        .stdin
        .take()
        .expect("stdin piped")
        .write_all(input.as_bytes())
        .expect("failed to write stdin");
    child.wait_with_output().expect("failed to wait")
}

#[test]
fn test_help_flag() {
    let output = cli_bin().arg("--help").output().expect("failed to run");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("Usage"),
        "Expected usage info in --help output"
    );
    assert!(stdout.contains("--no-haptics"));
}

#[test]
fn test_version_flag() {
    let output = cli_bin().arg("--version").output().expect("failed to run");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("fureai"),
        "Expected crate name in --version output"
    );
}

#[test]
fn test_invalid_config_does_not_panic() {
    // A nonexistent config file falls back to defaults
    let output = cli_bin()
        .arg("--config")
        .arg("/tmp/nonexistent_fureai_config_12345.toml")
        .arg("--help")
        .output()
        .expect("failed to run");
    assert!(output.status.success());
}

#[test]
fn test_touch_line_produces_reply() {
    let output = run_with_stdin(
        &["--no-haptics"],
        "{\"data\": 0.5, \"touched_area\": \"頭\"}\nquit\n",
    );
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("\"emotion\""));
    assert!(stdout.contains("\"emoji\""));
    assert!(stdout.contains("\"vibration_pattern\""));
}

#[test]
fn test_bad_json_reports_error_and_continues() {
    let output = run_with_stdin(
        &["--no-haptics"],
        "{oops\n{\"data\": 0.2, \"touched_area\": \"hand\"}\n",
    );
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("\"error\""));
    assert!(stdout.contains("\"message\""));
    assert!(stdout.contains("\"emotion\""));
}

#[test]
fn test_haptics_enabled_session_exits_cleanly() {
    let output = run_with_stdin(
        &["--tick-ms", "5"],
        "{\"data\": 0.9, \"touched_area\": \"arm\"}\nstatus\nstop\nexit\n",
    );
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("\"running\""));
}
