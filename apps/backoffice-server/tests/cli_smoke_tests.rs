//! CLI smoke tests for the backoffice-server binary.

use std::io::Write;
use std::process::{Command, Stdio};

fn run_server(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_backoffice-server"))
        .args(args)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .expect("failed to execute backoffice-server")
}

#[test]
fn help_prints_usage() {
    let output = run_server(&["--help"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("backoffice-server"));
    assert!(stdout.contains("--config"));
    assert!(stdout.contains("--port"));
}

#[test]
fn check_accepts_a_valid_config() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("config.yaml");
    let mut f = std::fs::File::create(&config_path).unwrap();
    writeln!(
        f,
        "server:\n  home_dir: \"{}\"\n  host: 127.0.0.1\n  port: 18091\ndatabase:\n  url: sqlite::memory:",
        dir.path().display()
    )
    .unwrap();

    let output = run_server(&["--config", config_path.to_str().unwrap(), "check"]);
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Configuration check passed"));
}

#[test]
fn check_rejects_unknown_config_keys() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("config.yaml");
    let mut f = std::fs::File::create(&config_path).unwrap();
    writeln!(f, "server:\n  bogus_key: true").unwrap();

    let output = run_server(&["--config", config_path.to_str().unwrap(), "check"]);
    assert!(!output.status.success());
}
