//! CLI tests for the `tp` binary
//!
//! Every test points the binary at a temporary config and credentials file
//! and clears the key environment variables, so nothing touches the
//! network or the user's real settings.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

struct Sandbox {
    dir: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let config = format!(
            "storage:\n  credentials-file: {}\nflights:\n  base-url: http://127.0.0.1:9/v1\n  timeout-ms: 500\n",
            dir.path().join("credentials.yml").display()
        );
        std::fs::write(dir.path().join("config.yml"), config).expect("Failed to write config");
        Self { dir }
    }

    fn tp(&self) -> Command {
        let mut cmd = Command::cargo_bin("tp").expect("binary should build");
        cmd.arg("--config")
            .arg(self.dir.path().join("config.yml"))
            .env("XDG_DATA_HOME", self.dir.path().join("data"))
            .env_remove("GEMINI_API_KEY")
            .env_remove("AVIATION_STACK_API_KEY");
        cmd
    }
}

#[test]
fn test_help_lists_commands() {
    Command::cargo_bin("tp")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("plan"))
        .stdout(predicate::str::contains("flights"))
        .stdout(predicate::str::contains("keys"));
}

#[test]
fn test_keys_set_show_clear() {
    let sandbox = Sandbox::new();

    sandbox
        .tp()
        .args(["keys", "set", "--completion", "gemini-secret-1234", "--flights", "aviation-secret-5678"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved credentials"));

    let stored = std::fs::read_to_string(sandbox.dir.path().join("credentials.yml")).unwrap();
    assert!(stored.contains("GEMINI_API_KEY"));
    assert!(stored.contains("AVIATION_STACK_API_KEY"));

    sandbox
        .tp()
        .args(["keys", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1234"))
        .stdout(predicate::str::contains("gemini-secret").not())
        .stdout(predicate::str::contains("used for the configured completion provider"));

    sandbox.tp().args(["keys", "clear"]).assert().success();
    assert!(!sandbox.dir.path().join("credentials.yml").exists());

    sandbox
        .tp()
        .args(["keys", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(not set)"));
}

#[test]
fn test_keys_set_requires_a_value() {
    let sandbox = Sandbox::new();
    sandbox
        .tp()
        .args(["keys", "set"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Nothing to set"));
}

#[test]
fn test_plan_without_keys_reports_missing_credential() {
    let sandbox = Sandbox::new();
    sandbox
        .tp()
        .args([
            "plan", "--from", "JFK", "--to", "LHR", "--start", "2025-06-01", "--end", "2025-06-10", "--no-chat",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Missing completion API key"));
}

#[test]
fn test_flights_without_key_reports_missing_credential() {
    let sandbox = Sandbox::new();
    sandbox
        .tp()
        .args(["flights", "JFK", "LHR"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("AVIATION_STACK_API_KEY"));
}

#[test]
fn test_plan_rejects_bad_date() {
    let sandbox = Sandbox::new();
    sandbox
        .tp()
        .args(["plan", "--from", "JFK", "--to", "LHR", "--start", "tomorrow", "--end", "2025-06-10"])
        .assert()
        .failure();
}
