//! CLI integration tests: the `vkm` binary against temp configs and an
//! in-process catalog stub.

mod stub;

use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{json, Value};
use stub::http::{Route, StubServer};
use tempfile::TempDir;

/// `vkm` with a private HOME and no session variables leaking in.
fn vkm(home: &Path) -> Command {
    let mut cmd = cargo_bin_cmd!("vkm");
    cmd.env("HOME", home)
        .env_remove("VKM_API_URL")
        .env_remove("VKM_API_TOKEN")
        .env_remove("VKM_SUBJECT")
        .env_remove("RUST_LOG");
    cmd
}

fn config_for(dir: &TempDir, base_url: &str) -> std::path::PathBuf {
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        format!("[api]\nbase_url = \"{base_url}\"\ntimeout_secs = 5\n"),
    )
    .expect("write temp config");
    path
}

fn stdout_json(output: &std::process::Output) -> Value {
    serde_json::from_slice(&output.stdout).expect("stdout is one JSON document")
}

#[test]
fn help_lists_command_groups() {
    let home = TempDir::new().unwrap();
    vkm(home.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("items"))
        .stdout(predicate::str::contains("users"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn version_names_binary() {
    let home = TempDir::new().unwrap();
    vkm(home.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("vkm"));
}

#[test]
fn config_show_reports_defaults_without_file() {
    let home = TempDir::new().unwrap();
    let output = vkm(home.path())
        .args(["config", "show", "--json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let doc = stdout_json(&output);
    assert_eq!(doc["command"], "config.show");
    assert_eq!(doc["file_exists"], false);
    assert_eq!(doc["api"]["base_url"], "http://localhost:3000");
    assert_eq!(doc["session"]["token_loaded"], false);
}

#[test]
fn config_show_never_prints_token() {
    let home = TempDir::new().unwrap();
    let path = config_for(&home, "http://catalog.example");
    let output = vkm(home.path())
        .env("VKM_API_TOKEN", "very-secret-jwt")
        .args(["config", "show", "--json", "--config"])
        .arg(&path)
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(!stdout.contains("very-secret-jwt"));
    let doc = stdout_json(&output);
    assert_eq!(doc["session"]["token_loaded"], true);
    assert_eq!(doc["api"]["base_url"], "http://catalog.example");
}

#[test]
fn missing_explicit_config_fails() {
    let home = TempDir::new().unwrap();
    vkm(home.path())
        .args(["config", "show", "--config"])
        .arg(home.path().join("nope.toml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read config file"));
}

#[test]
fn invalid_config_reports_field() {
    let home = TempDir::new().unwrap();
    let path = home.path().join("config.toml");
    std::fs::write(&path, "[api]\ntimeout_secs = 0\n").unwrap();

    vkm(home.path())
        .args(["config", "show", "--config"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("api.timeout_secs"));
}

#[test]
fn config_show_reports_uncapped_recommendations() {
    let home = TempDir::new().unwrap();
    let path = home.path().join("config.toml");
    std::fs::write(&path, "[catalog]\nrecommendation_limit = 0\n").unwrap();

    vkm(home.path())
        .args(["config", "show", "--config"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("unlimited"));
}

#[tokio::test(flavor = "multi_thread")]
async fn items_list_prints_filtered_json() {
    let server = StubServer::start(vec![Route::get(
        "/vkm/filter",
        json!([{ "_id": "a", "name": "Robotics", "studycredit": 30, "location": "Breda" }]),
    )])
    .await;
    let home = TempDir::new().unwrap();
    let path = config_for(&home, server.base_url());

    let output = vkm(home.path())
        .args(["--json", "items", "list", "--credit", "30", "--location", "Breda", "--config"])
        .arg(&path)
        .output()
        .unwrap();

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let doc = stdout_json(&output);
    assert_eq!(doc["command"], "items.list");
    assert_eq!(doc["filter"], json!({ "study_credit": 30, "location": "Breda" }));
    assert_eq!(doc["items"][0]["name"], "Robotics");
    assert_eq!(
        server.requests()[0].query(),
        Some("studyCredit=30&location=Breda")
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn items_list_uses_env_url() {
    let server = StubServer::start(vec![Route::get("/vkm/filter", json!([]))]).await;
    let home = TempDir::new().unwrap();

    vkm(home.path())
        .env("VKM_API_URL", server.base_url())
        .args(["items", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No modules match"));
    assert_eq!(server.requests().len(), 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn service_failure_exits_nonzero() {
    let server = StubServer::start(vec![Route::new("GET", "/vkm/filter", 500, "down")]).await;
    let home = TempDir::new().unwrap();
    let path = config_for(&home, server.base_url());

    vkm(home.path())
        .args(["items", "list", "--config"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "API request failed: Internal Server Error",
        ));
}

#[tokio::test(flavor = "multi_thread")]
async fn recommended_sends_bearer_token() {
    let server = StubServer::start(vec![
        Route::get(
            "/users/u1",
            json!({ "_id": "u1", "username": "s", "email": "s@example.nl", "recommended_vkms": ["r1"] }),
        ),
        Route::get("/vkm/r1", json!({ "_id": "r1", "name": "Game Design" })),
    ])
    .await;
    let home = TempDir::new().unwrap();
    let path = config_for(&home, server.base_url());

    let output = vkm(home.path())
        .env("VKM_SUBJECT", "u1")
        .env("VKM_API_TOKEN", "jwt-1")
        .args(["--json", "items", "recommended", "--config"])
        .arg(&path)
        .output()
        .unwrap();

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let doc = stdout_json(&output);
    assert_eq!(doc["subject"], "u1");
    assert_eq!(doc["items"][0]["name"], "Game Design");
    assert!(server
        .requests()
        .iter()
        .all(|r| r.authorization.as_deref() == Some("Bearer jwt-1")));
}

#[tokio::test(flavor = "multi_thread")]
async fn delete_without_yes_is_refused_off_terminal() {
    let server = StubServer::start(vec![Route::new("DELETE", "/vkm/a", 204, "")]).await;
    let home = TempDir::new().unwrap();
    let path = config_for(&home, server.base_url());

    vkm(home.path())
        .args(["items", "delete", "a", "--config"])
        .arg(&path)
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--yes"));
    assert!(server.requests().is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn delete_with_yes_calls_service() {
    let server = StubServer::start(vec![Route::new("DELETE", "/vkm/a", 204, "")]).await;
    let home = TempDir::new().unwrap();
    let path = config_for(&home, server.base_url());

    vkm(home.path())
        .args(["items", "delete", "a", "--yes", "--config"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted item a"));
    assert_eq!(server.requests()[0].method, "DELETE");
}

#[test]
fn create_rejects_nameless_payload() {
    let home = TempDir::new().unwrap();
    let path = config_for(&home, "http://127.0.0.1:9");
    let payload = home.path().join("item.json");
    std::fs::write(&payload, r#"{"level": "NLQF5"}"#).unwrap();

    vkm(home.path())
        .args(["items", "create", "--config"])
        .arg(&path)
        .arg(&payload)
        .assert()
        .failure()
        .stderr(predicate::str::contains("name"));
}
