//! Integration tests for `modelpick list` against a mock catalog backend.

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::{Value, json};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn temp_home() -> TempDir {
    TempDir::new().expect("create temp modelpick home")
}

fn can_bind_localhost() -> bool {
    std::net::TcpListener::bind("127.0.0.1:0").is_ok()
}

fn catalog() -> Value {
    json!([
        {
            "id": "openai/gpt-4o",
            "name": "OpenAI: GPT-4o",
            "description": "Omni model with vision",
            "context_length": 128000,
            "pricing": {"prompt": "0.0000025", "completion": "0.00001"}
        },
        {
            "id": "deepseek/deepseek-r1-0528:free",
            "name": "DeepSeek: R1 0528 (free)",
            "description": "Open reasoning model",
            "context_length": 163840,
            "pricing": {"prompt": "0", "completion": "0"}
        },
        {
            "id": "google/gemini-2.5-pro",
            "name": "Google: Gemini 2.5 Pro",
            "description": "Long-context reasoning model",
            "context_length": 1048576
        }
    ])
}

async fn mock_backend(response: ResponseTemplate) -> MockServer {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/models"))
        .respond_with(response)
        .expect(1)
        .mount(&mock_server)
        .await;
    mock_server
}

#[tokio::test]
async fn test_list_prints_catalog_and_default() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = temp_home();
    let mock_server = mock_backend(ResponseTemplate::new(200).set_body_json(catalog())).await;

    cargo_bin_cmd!("modelpick")
        .env("MODELPICK_HOME", home.path())
        .env("MODELPICK_CATALOG_URL", mock_server.uri())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("openai/gpt-4o"))
        .stdout(predicate::str::contains("Gemini 2.5 Pro"))
        .stdout(predicate::str::contains("128k"))
        .stdout(predicate::str::contains("$2.5/M in"))
        .stdout(predicate::str::contains(
            "Default: deepseek/deepseek-r1-0528:free",
        ))
        .stderr(predicate::str::contains("Warning").not());
}

#[tokio::test]
async fn test_list_query_filters_case_insensitively() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = temp_home();
    let mock_server = mock_backend(ResponseTemplate::new(200).set_body_json(catalog())).await;

    let output = cargo_bin_cmd!("modelpick")
        .env("MODELPICK_HOME", home.path())
        .args(["--catalog-url", &mock_server.uri()])
        .args(["list", "--query", "REASONING", "--json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let models: Vec<Value> = serde_json::from_slice(&output.stdout).unwrap();
    let ids: Vec<&str> = models.iter().filter_map(|m| m["id"].as_str()).collect();
    assert_eq!(
        ids,
        ["deepseek/deepseek-r1-0528:free", "google/gemini-2.5-pro"]
    );
    assert_eq!(models[0]["context_length"], 163_840);
}

#[tokio::test]
async fn test_list_without_matches() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = temp_home();
    let mock_server = mock_backend(ResponseTemplate::new(200).set_body_json(catalog())).await;

    cargo_bin_cmd!("modelpick")
        .env("MODELPICK_HOME", home.path())
        .env("MODELPICK_CATALOG_URL", mock_server.uri())
        .args(["list", "--query", "nonexistent"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No models match \"nonexistent\""));
}

#[tokio::test]
async fn test_list_falls_back_when_backend_fails() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = temp_home();
    let mock_server = mock_backend(ResponseTemplate::new(500)).await;

    cargo_bin_cmd!("modelpick")
        .env("MODELPICK_HOME", home.path())
        .env("MODELPICK_CATALOG_URL", mock_server.uri())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("DeepSeek R1 (Free)"))
        .stdout(predicate::str::contains("GPT-4o Mini"))
        .stdout(predicate::str::contains(
            "Default: deepseek/deepseek-r1-0528:free",
        ))
        .stderr(predicate::str::contains("Warning: "))
        .stderr(predicate::str::contains("500"))
        .stderr(predicate::str::contains("Using fallback catalog."));
}

#[tokio::test]
async fn test_list_uses_preferred_model_from_config() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = temp_home();
    std::fs::write(
        home.path().join("config.toml"),
        "preferred_model = \"google/gemini-2.5-pro\"\n",
    )
    .unwrap();
    let mock_server = mock_backend(ResponseTemplate::new(200).set_body_json(catalog())).await;

    cargo_bin_cmd!("modelpick")
        .env("MODELPICK_HOME", home.path())
        .env("MODELPICK_CATALOG_URL", mock_server.uri())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Default: google/gemini-2.5-pro"));
}

#[tokio::test]
async fn test_list_from_openrouter_source() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = temp_home();
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/models"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": catalog() })))
        .expect(1)
        .mount(&mock_server)
        .await;
    std::fs::write(
        home.path().join("config.toml"),
        format!(
            "source = \"openrouter\"\n[openrouter]\nbase_url = \"{}/api/v1\"\n",
            mock_server.uri()
        ),
    )
    .unwrap();

    cargo_bin_cmd!("modelpick")
        .env("MODELPICK_HOME", home.path())
        .args(["list", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"openai/gpt-4o\""))
        .stdout(predicate::str::contains("Default:").not());
}
