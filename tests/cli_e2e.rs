//! End-to-end CLI tests for the eventfeed binary.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

mod support;
use support::socket_guard::start_mock_server_or_skip;

/// Returns a command with no inherited Notion configuration.
fn eventfeed() -> Command {
    let mut cmd = Command::cargo_bin("eventfeed").unwrap();
    cmd.env_remove("NOTION_API_KEY")
        .env_remove("NOTION_DATABASE_ID")
        .env_remove("NOTION_API_BASE_URL")
        .env_remove("RUST_LOG");
    cmd
}

/// Test that --help displays usage information and exits with code 0.
#[test]
fn test_binary_help_displays_usage() {
    eventfeed()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Notion database"));
}

/// Test that --version displays version and exits with code 0.
#[test]
fn test_binary_version_displays_version() {
    eventfeed()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("eventfeed"));
}

/// Test that invalid flags cause non-zero exit.
#[test]
fn test_binary_invalid_flag_returns_error() {
    eventfeed()
        .arg("--invalid-flag")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

/// Missing credentials are a configuration error: no fetch, non-zero exit.
#[test]
fn test_binary_missing_api_key_fails() {
    eventfeed()
        .env("NOTION_DATABASE_ID", "db1")
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("NOTION_API_KEY is not configured"));
}

#[test]
fn test_binary_missing_database_id_fails() {
    eventfeed()
        .env("NOTION_API_KEY", "secret")
        .assert()
        .failure()
        .stderr(predicate::str::contains("NOTION_DATABASE_ID is not configured"));
}

#[test]
fn test_binary_invalid_base_url_fails() {
    eventfeed()
        .env("NOTION_API_KEY", "secret")
        .env("NOTION_DATABASE_ID", "db1")
        .env("NOTION_API_BASE_URL", "ftp://example.com")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid API base URL"));
}

#[test]
fn test_binary_missing_field_table_fails() {
    eventfeed()
        .env("NOTION_API_KEY", "secret")
        .env("NOTION_DATABASE_ID", "db1")
        .args(["--field-table", "/nonexistent/eventfeed-fields.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot read field table"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_binary_prints_normalized_feed() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };

    Mock::given(method("POST"))
        .and(path("/databases/cli-db/query"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [
                {
                    "id": "demo-1",
                    "properties": {
                        "Name": {"type": "title", "title": [{"plain_text": "Demo Night"}]},
                        "Capacity": {"type": "number", "number": 40}
                    }
                },
                {"id": "blank", "properties": {}}
            ],
            "has_more": false,
            "next_cursor": null
        })))
        .expect(1)
        .mount(&server)
        .await;

    let base_url = server.uri();
    let output = tokio::task::spawn_blocking(move || {
        eventfeed()
            .env("NOTION_API_KEY", "secret")
            .env("NOTION_DATABASE_ID", "ignored-db")
            .env("NOTION_API_BASE_URL", base_url)
            .args(["--database-id", "cli-db", "--stats", "-q"])
            .output()
            .unwrap()
    })
    .await
    .unwrap();

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let feed: Value = serde_json::from_slice(&output.stdout).unwrap();
    let events = feed.as_array().unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["title"], "Demo Night");
    assert_eq!(events[0]["maxAttendees"], 40);

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("1 kept, 1 skipped"), "stderr: {stderr}");
    assert!(stderr.contains("paginated"), "stderr: {stderr}");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_binary_degrades_to_empty_feed() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let base_url = server.uri();
    let output = tokio::task::spawn_blocking(move || {
        eventfeed()
            .env("NOTION_API_KEY", "secret")
            .env("NOTION_DATABASE_ID", "db1")
            .env("NOTION_API_BASE_URL", base_url)
            .arg("-q")
            .output()
            .unwrap()
    })
    .await
    .unwrap();

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "[]");
}
