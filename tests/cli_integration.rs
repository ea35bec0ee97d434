//! CLI integration tests
//!
//! Runs the real binary and checks flag handling and configuration failures.
//! Every test clears the inherited environment and runs from a temporary
//! directory so no ambient .env file can leak in.

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::io::Write;
use tempfile::TempDir;

fn isolated_cmd(temp_dir: &TempDir) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("clipcast");
    cmd.env_clear();
    cmd.current_dir(temp_dir.path());
    cmd
}

#[test]
fn test_version_flag() {
    let mut cmd = cargo_bin_cmd!("clipcast");
    cmd.arg("--version");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_help_flag() {
    let mut cmd = cargo_bin_cmd!("clipcast");
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("env-file"))
        .stdout(predicate::str::contains("verbose"));
}

#[test]
fn test_missing_configuration_fails() {
    let temp_dir = TempDir::new().unwrap();
    let mut cmd = isolated_cmd(&temp_dir);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("BROADCASTER_ID"));
}

#[test]
fn test_invalid_broadcaster_id_fails() {
    let temp_dir = TempDir::new().unwrap();
    let env_path = temp_dir.path().join("test.env");
    let mut env_file = std::fs::File::create(&env_path).unwrap();
    writeln!(env_file, "BROADCASTER_ID=not-a-number").unwrap();

    let mut cmd = isolated_cmd(&temp_dir);
    cmd.args(["--env-file", env_path.to_str().unwrap()]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Invalid BROADCASTER_ID"));
}

#[test]
fn test_invalid_chat_ids_fail() {
    let temp_dir = TempDir::new().unwrap();
    let env_path = temp_dir.path().join("test.env");
    let mut env_file = std::fs::File::create(&env_path).unwrap();
    writeln!(env_file, "BROADCASTER_ID=141981764").unwrap();
    writeln!(env_file, "TARGET_CHAT_IDS=123,abc").unwrap();

    let mut cmd = isolated_cmd(&temp_dir);
    cmd.args(["--env-file", env_path.to_str().unwrap()]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Invalid chat id"));
}

#[test]
fn test_missing_env_file_fails() {
    let temp_dir = TempDir::new().unwrap();
    let mut cmd = isolated_cmd(&temp_dir);
    cmd.args(["--env-file", "/nonexistent/clipcast.env"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("failed to load env file"));
}

#[test]
fn test_server_enabled_without_secret_fails() {
    let temp_dir = TempDir::new().unwrap();
    let env_path = temp_dir.path().join("test.env");
    let mut env_file = std::fs::File::create(&env_path).unwrap();
    writeln!(env_file, "BROADCASTER_ID=141981764").unwrap();
    writeln!(env_file, "BROADCASTER_NAME=twitchdev").unwrap();
    writeln!(env_file, "TWITCH_CLIENT_ID=client").unwrap();
    writeln!(env_file, "TWITCH_CLIENT_SECRET=secret").unwrap();
    writeln!(env_file, "TELEGRAM_BOT_TOKEN=12345:token").unwrap();
    writeln!(env_file, "TELEGRAM_CHANNEL_NAME=myclips").unwrap();
    writeln!(env_file, "TARGET_CHAT_IDS=-1001234567890").unwrap();
    writeln!(env_file, "ENABLE_CLIP_SERVER=true").unwrap();

    let mut cmd = isolated_cmd(&temp_dir);
    cmd.args(["--env-file", env_path.to_str().unwrap()]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("WEBSERVER_SECRET_TOKEN"));
}
