//! Integration tests for the `airgo` CLI binary.
//!
//! Argument parsing, help output, completions, config handling, and a few
//! end-to-end runs against a wiremock panel.
#![allow(clippy::unwrap_used)]

use std::io::Write;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `airgo` binary with env isolation.
///
/// Clears all `AIRGO_*` env vars and points config directories at a
/// nonexistent path so tests never touch the user's real configuration.
fn airgo_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("airgo");
    cmd.env("HOME", "/tmp/airgo-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/airgo-cli-test-nonexistent")
        .env_remove("RUST_LOG")
        .env_remove("AIRGO_CONFIG")
        .env_remove("AIRGO_PROFILE")
        .env_remove("AIRGO_API_HOST")
        .env_remove("AIRGO_KEY")
        .env_remove("AIRGO_NODE_ID")
        .env_remove("AIRGO_NODE_TYPE")
        .env_remove("AIRGO_TIMEOUT");
    cmd
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

fn temp_file(suffix: &str, body: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(body.as_bytes()).unwrap();
    file
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = airgo_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    airgo_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("AirGo panel")
            .and(predicate::str::contains("node"))
            .and(predicate::str::contains("users"))
            .and(predicate::str::contains("poll")),
    );
}

#[test]
fn test_version_flag() {
    airgo_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("airgo"));
}

#[test]
fn test_completions_zsh() {
    airgo_cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

// ── Error cases ─────────────────────────────────────────────────────

#[test]
fn test_node_without_config_fails() {
    airgo_cmd()
        .arg("node")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No panel configured"));
}

#[test]
fn test_missing_node_id_is_usage_error() {
    airgo_cmd()
        .args(["--api-host", "https://panel.example.com", "--key", "k", "rules"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("node_id"));
}

#[test]
fn test_unknown_profile() {
    airgo_cmd()
        .args(["--profile", "ghost", "describe"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("ghost"));
}

#[test]
fn test_invalid_output_format() {
    let output = airgo_cmd()
        .args(["--output", "invalid", "node"])
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
fn test_report_online_rejects_malformed_pair() {
    airgo_cmd()
        .args([
            "--api-host",
            "https://panel.example.com",
            "--key",
            "k",
            "--node-id",
            "1",
            "report",
            "online",
            "not-a-pair",
        ])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("not-a-pair"));
}

// ── Config ──────────────────────────────────────────────────────────

#[test]
fn test_config_path_honors_flag() {
    airgo_cmd()
        .args(["--config", "/etc/airgo/custom.toml", "config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("/etc/airgo/custom.toml"));
}

#[test]
fn test_config_show_masks_keys() {
    let cfg = temp_file(
        ".toml",
        r#"
default_profile = "edge"

[profiles.edge]
api_host = "https://panel.example.com"
key = "super-secret"
node_id = 9
"#,
    );

    airgo_cmd()
        .args(["--config", cfg.path().to_str().unwrap(), "config", "show"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("panel.example.com")
                .and(predicate::str::contains("super-secret").not()),
        );
}

#[test]
fn test_rules_from_profile() {
    let rules = temp_file(".txt", "(.*\\.)?example\\.com\nbittorrent\n");
    let cfg = temp_file(
        ".toml",
        &format!(
            r#"
default_profile = "edge"

[profiles.edge]
api_host = "https://panel.example.com"
key = "k"
node_id = 9
rule_list_path = "{}"
"#,
            rules.path().display()
        ),
    );

    airgo_cmd()
        .args([
            "--config",
            cfg.path().to_str().unwrap(),
            "-o",
            "plain",
            "rules",
        ])
        .assert()
        .success()
        .stdout(predicate::str::diff("(.*\\.)?example\\.com\nbittorrent\n"));
}

#[test]
fn test_describe_hides_key() {
    airgo_cmd()
        .args([
            "--api-host",
            "https://panel.example.com",
            "--key",
            "super-secret",
            "--node-id",
            "5",
            "--node-type",
            "trojan",
            "-o",
            "json-compact",
            "describe",
        ])
        .assert()
        .success()
        .stdout(
            predicate::str::contains(r#""node_id":5"#)
                .and(predicate::str::contains(r#""node_type":"Trojan""#))
                .and(predicate::str::contains("super-secret").not()),
        );
}

#[test]
fn test_describe_reports_profile_device_limit() {
    let cfg = temp_file(
        ".toml",
        r#"
default_profile = "edge"

[profiles.edge]
api_host = "https://panel.example.com"
key = "k"
node_id = 9
device_limit = 3
"#,
    );

    airgo_cmd()
        .args([
            "--config",
            cfg.path().to_str().unwrap(),
            "-o",
            "json-compact",
            "describe",
        ])
        .assert()
        .success()
        .stdout(
            predicate::str::contains(r#""node_id":9"#)
                .and(predicate::str::contains(r#""device_limit":3"#)),
        );
}

// ── Against a mock panel ────────────────────────────────────────────

fn panel_args(server: &MockServer) -> Vec<String> {
    vec![
        "--api-host".into(),
        server.uri(),
        "--key".into(),
        "panel-key".into(),
        "--node-id".into(),
        "3".into(),
    ]
}

#[tokio::test(flavor = "multi_thread")]
async fn test_node_prints_normalized_config() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/public/airgo/node/getNodeInfo"))
        .and(query_param("id", "3"))
        .and(query_param("key", "panel-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "protocol": "vmess",
            "network": "grpc",
            "port": 8443,
            "service_name": "tun",
            "scy": "auto"
        })))
        .mount(&server)
        .await;

    airgo_cmd()
        .args(panel_args(&server))
        .args(["-o", "json-compact", "node"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains(r#""port":8443"#)
                .and(predicate::str::contains(r#""transport_protocol":"grpc""#))
                .and(predicate::str::contains(r#""cypher_method":"auto""#)),
        );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_report_online_posts_grouped_map() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/public/airgo/user/AGReportNodeOnlineUsers"))
        .and(body_json(json!({
            "nodeID": 3,
            "userNodeMap": { "1": ["1.1.1.1", "2.2.2.2"], "4": ["3.3.3.3"] }
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    airgo_cmd()
        .args(panel_args(&server))
        .args(["report", "online", "1=1.1.1.1", "4=3.3.3.3", "1=2.2.2.2"])
        .assert()
        .success();
}

#[tokio::test(flavor = "multi_thread")]
async fn test_forbidden_report_exits_with_auth_code() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/public/airgo/node/reportNodeStatus"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    airgo_cmd()
        .args(panel_args(&server))
        .args(["report", "status", "--cpu", "10", "--uptime", "5"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("panel-key").not());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_poll_once_reports_both_resources() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/public/airgo/node/getNodeInfo"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "protocol": "vless", "port": 443, "network": "tcp" })),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/public/airgo/user/getUserlist"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "uuid": "a", "user_name": "alice" },
            { "id": 2, "uuid": "b", "user_name": "bob" }
        ])))
        .mount(&server)
        .await;

    airgo_cmd()
        .args(panel_args(&server))
        .args(["poll", "--once"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "node: updated (port 443, tcp); users: updated (2 users)",
        ));
}
