//! Integration tests for the `sdnboard` CLI binary.
//!
//! Argument parsing, help output, completions, and config handling run
//! without a controller; command tests run against a wiremock controller.
#![allow(clippy::unwrap_used)]

use std::path::{Path, PathBuf};

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::{Value, json};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `sdnboard` binary with env isolation.
///
/// Clears all `SDNBOARD_*` env vars and points the config file into
/// `dir` so tests never touch the user's real configuration.
fn sdnboard_cmd(dir: &Path) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("sdnboard");
    cmd.env("SDNBOARD_CONFIG", config_file(dir))
        .env("HOME", dir)
        .env("XDG_CONFIG_HOME", dir)
        .env("NO_COLOR", "1")
        .env_remove("SDNBOARD_PROFILE")
        .env_remove("SDNBOARD_CONTROLLER")
        .env_remove("SDNBOARD_OUTPUT")
        .env_remove("SDNBOARD_INSECURE")
        .env_remove("SDNBOARD_TIMEOUT")
        .env_remove("RUST_LOG")
        .write_stdin("");
    cmd
}

fn config_file(dir: &Path) -> PathBuf {
    dir.join("config.toml")
}

/// Run against `server` off the async runtime so wiremock keeps serving.
async fn run_against(server: &MockServer, dir: &Path, args: &[&str]) -> std::process::Output {
    let mut cmd = sdnboard_cmd(dir);
    cmd.arg("--controller").arg(server.uri()).args(args);
    tokio::task::spawn_blocking(move || cmd.output())
        .await
        .unwrap()
        .unwrap()
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

fn stdout_json(output: &std::process::Output) -> Value {
    serde_json::from_slice(&output.stdout).unwrap()
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let dir = TempDir::new().unwrap();
    let output = sdnboard_cmd(dir.path()).output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    let dir = TempDir::new().unwrap();
    sdnboard_cmd(dir.path()).arg("--help").assert().success().stdout(
        predicate::str::contains("SDN controller")
            .and(predicate::str::contains("whitelist"))
            .and(predicate::str::contains("topology"))
            .and(predicate::str::contains("dashboard")),
    );
}

#[test]
fn test_version_flag() {
    let dir = TempDir::new().unwrap();
    sdnboard_cmd(dir.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("sdnboard"));
}

#[test]
fn test_completions_zsh() {
    let dir = TempDir::new().unwrap();
    sdnboard_cmd(dir.path())
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

#[test]
fn test_whitelist_subcommands_exist() {
    let dir = TempDir::new().unwrap();
    sdnboard_cmd(dir.path())
        .args(["whitelist", "--help"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("list")
                .and(predicate::str::contains("add"))
                .and(predicate::str::contains("remove")),
        );
}

// ── Error cases ─────────────────────────────────────────────────────

#[test]
fn test_add_requires_both_endpoints() {
    let dir = TempDir::new().unwrap();
    sdnboard_cmd(dir.path())
        .args(["whitelist", "add", "10.0.0.1"])
        .assert()
        .code(2);
}

#[test]
fn test_invalid_output_format() {
    let dir = TempDir::new().unwrap();
    let output = sdnboard_cmd(dir.path())
        .args(["--output", "invalid", "stats"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    let text = combined_output(&output);
    assert!(
        text.contains("invalid") || text.contains("possible values"),
        "Expected error about valid output formats:\n{text}"
    );
}

#[test]
fn test_invalid_controller_url_is_usage_error() {
    let dir = TempDir::new().unwrap();
    sdnboard_cmd(dir.path())
        .args(["--controller", "not a url", "stats"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("controller"));
}

#[test]
fn test_missing_profile_flag() {
    let dir = TempDir::new().unwrap();
    sdnboard_cmd(dir.path())
        .args(["--profile", "lab", "stats"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Profile 'lab' not found"));
}

// ── Config ──────────────────────────────────────────────────────────

#[test]
fn test_config_show_no_config() {
    let dir = TempDir::new().unwrap();
    sdnboard_cmd(dir.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[defaults]"));
}

#[test]
fn test_config_init_then_profiles() {
    let dir = TempDir::new().unwrap();

    sdnboard_cmd(dir.path())
        .args([
            "--yes",
            "--profile",
            "lab",
            "--controller",
            "http://10.0.0.254:8080",
            "config",
            "init",
        ])
        .assert()
        .success();
    assert!(config_file(dir.path()).exists());

    sdnboard_cmd(dir.path())
        .args(["config", "profiles"])
        .assert()
        .success()
        .stdout(predicate::str::contains("lab *"));

    let output = sdnboard_cmd(dir.path())
        .args(["-o", "json", "config", "show"])
        .output()
        .unwrap();
    let cfg = stdout_json(&output);
    assert_eq!(cfg["profiles"]["lab"]["controller"], "http://10.0.0.254:8080");
}

#[test]
fn test_config_set_and_use() {
    let dir = TempDir::new().unwrap();

    sdnboard_cmd(dir.path())
        .args(["--profile", "lab", "config", "set", "timeout", "5"])
        .assert()
        .success();
    sdnboard_cmd(dir.path())
        .args(["config", "use", "lab"])
        .assert()
        .success();

    let saved = std::fs::read_to_string(config_file(dir.path())).unwrap();
    assert!(saved.contains("default_profile = \"lab\""), "{saved}");
    assert!(saved.contains("timeout = 5"), "{saved}");

    sdnboard_cmd(dir.path())
        .args(["config", "use", "missing"])
        .assert()
        .code(4);
}

#[test]
fn test_config_set_unknown_key() {
    let dir = TempDir::new().unwrap();
    sdnboard_cmd(dir.path())
        .args(["config", "set", "site", "default"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unknown config key"));
}

// ── Against a controller ────────────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_whitelist_list_json() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/whitelist"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "whitelist": [{ "src": "10.0.0.1", "dst": "10.0.0.2" }]
        })))
        .mount(&server)
        .await;
    let dir = TempDir::new().unwrap();

    let output = run_against(&server, dir.path(), &["-o", "json", "whitelist", "list"]).await;

    assert!(output.status.success(), "{}", combined_output(&output));
    assert_eq!(
        stdout_json(&output),
        json!([{ "src": "10.0.0.1", "dst": "10.0.0.2" }])
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_whitelist_add_blank_is_skipped() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    let output = run_against(&server, dir.path(), &["whitelist", "add", " ", "10.0.0.2"]).await;

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Skipped"));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_whitelist_add_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/whitelist"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "fail", "message": "duplicate rule"
        })))
        .mount(&server)
        .await;
    let dir = TempDir::new().unwrap();

    let output = run_against(
        &server,
        dir.path(),
        &["whitelist", "add", "10.0.0.1", "10.0.0.2"],
    )
    .await;

    assert_eq!(output.status.code(), Some(6));
    assert!(
        String::from_utf8_lossy(&output.stderr).contains("add rule failed: duplicate rule"),
        "{}",
        combined_output(&output)
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_whitelist_remove_requires_yes_when_piped() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    let output = run_against(
        &server,
        dir.path(),
        &["whitelist", "remove", "10.0.0.1", "10.0.0.2"],
    )
    .await;

    assert_eq!(output.status.code(), Some(2));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_whitelist_remove_with_yes() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/whitelist"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "success" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/whitelist"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "whitelist": [] })))
        .expect(1)
        .mount(&server)
        .await;
    let dir = TempDir::new().unwrap();

    let output = run_against(
        &server,
        dir.path(),
        &["-y", "-o", "plain", "whitelist", "remove", "10.0.0.1", "10.0.0.2"],
    )
    .await;

    assert!(output.status.success(), "{}", combined_output(&output));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Removed 10.0.0.1 -> 10.0.0.2"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_topology_hosts_on_switch_plain() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/topology"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "hosts": [
                { "ip": "10.0.0.1", "mac": "00:00:00:00:00:01", "switch": 1, "port": 1 },
                { "ip": "10.0.0.3", "mac": "00:00:00:00:00:03", "switch": 2, "port": 1 }
            ]
        })))
        .mount(&server)
        .await;
    let dir = TempDir::new().unwrap();

    let output = run_against(
        &server,
        dir.path(),
        &["-o", "plain", "topology", "hosts", "--switch", "1"],
    )
    .await;

    assert!(output.status.success(), "{}", combined_output(&output));
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "10.0.0.1");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_topology_host_lookup() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/topology"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "hosts": [
                { "ip": "10.0.0.1", "mac": "00:00:00:00:00:01", "switch": 1, "port": 1 },
                { "ip": "10.0.0.3", "mac": "00:00:00:00:00:03", "switch": 2, "port": 4 }
            ]
        })))
        .mount(&server)
        .await;
    let dir = TempDir::new().unwrap();

    let found = run_against(
        &server,
        dir.path(),
        &["-o", "plain", "topology", "host", "10.0.0.3"],
    )
    .await;
    assert!(found.status.success(), "{}", combined_output(&found));
    assert_eq!(String::from_utf8_lossy(&found.stdout).trim(), "10.0.0.3 2 4");

    let missing = run_against(&server, dir.path(), &["topology", "host", "10.0.0.9"]).await;
    assert_eq!(missing.status.code(), Some(4), "{}", combined_output(&missing));
    assert!(String::from_utf8_lossy(&missing.stderr).contains("host '10.0.0.9' not found"));
}

#[test]
fn test_stats_unreachable_controller() {
    let dir = TempDir::new().unwrap();
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    sdnboard_cmd(dir.path())
        .args(["--controller", &format!("http://127.0.0.1:{port}"), "stats"])
        .assert()
        .code(7)
        .stderr(predicate::str::contains("fetch stats failed"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_dashboard_reports_partial_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/whitelist"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "whitelist": [] })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total_hosts": 2, "total_switches": 1, "whitelist_rules": 0
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/topology"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    let dir = TempDir::new().unwrap();

    let output = run_against(&server, dir.path(), &["-o", "json", "dashboard"]).await;

    assert_eq!(output.status.code(), Some(7));
    let view = stdout_json(&output);
    assert_eq!(view["stats"]["total_hosts"], 2);
    assert_eq!(view["status"][1]["kind"], "topology");
    assert_eq!(view["status"][1]["phase"], "failed");
    assert!(
        String::from_utf8_lossy(&output.stderr).contains("1 of 3 resources failed to load")
    );
}
