//! Runs the built binary against a scratch data directory.

use std::process::{Command, Output};

use tempfile::TempDir;

fn screentime(dir: &TempDir, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_screentime"))
        .arg("--dir")
        .arg(dir.path())
        .args(args)
        .env_remove("SCREENTIME_TABLE")
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

#[test]
fn test_verbose_logging_keeps_json_on_stdout_clean() {
    let dir = TempDir::new().unwrap();
    let logged = screentime(&dir, &["log", "30", "--date", "2024-01-01"]);
    assert!(logged.status.success());

    let output = screentime(&dir, &["--log", "stats", "--json"]);
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["summary"]["days_total"], 1);
    assert_eq!(value["days"][0]["minutes"], 30);
    assert!(!output.stderr.is_empty());
}
