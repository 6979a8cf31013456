use std::fs;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn test_config_path_command() {
    let dir = tempdir().unwrap();

    cargo_bin_cmd!("modelpick")
        .env("MODELPICK_HOME", dir.path())
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"))
        .stdout(predicate::str::contains("not created yet"));
}

#[test]
fn test_config_init_creates_file() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("config.toml");

    cargo_bin_cmd!("modelpick")
        .env("MODELPICK_HOME", dir.path())
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created config at"));

    let contents = fs::read_to_string(&config_path).unwrap();
    assert!(contents.contains("catalog_url ="));
    assert!(contents.contains("preferred_model ="));
}

#[test]
fn test_config_init_fails_if_exists() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("config.toml"), "# existing config").unwrap();

    cargo_bin_cmd!("modelpick")
        .env("MODELPICK_HOME", dir.path())
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_config_show_applies_overrides() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("config.toml"),
        "preferred_model = \"openai/gpt-4o\"\n",
    )
    .unwrap();

    cargo_bin_cmd!("modelpick")
        .env("MODELPICK_HOME", dir.path())
        .env_remove("MODELPICK_CATALOG_URL")
        .args([
            "--catalog-url",
            "http://models.internal:8080",
            "--source",
            "openrouter",
            "config",
            "show",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "catalog_url = \"http://models.internal:8080\"",
        ))
        .stdout(predicate::str::contains("source = \"openrouter\""))
        .stdout(predicate::str::contains("preferred_model = \"openai/gpt-4o\""));
}

#[test]
fn test_config_generate_prints_template() {
    let dir = tempdir().unwrap();

    cargo_bin_cmd!("modelpick")
        .env("MODELPICK_HOME", dir.path())
        .args(["config", "generate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("request_timeout_secs = 30"))
        .stdout(predicate::str::contains("[openrouter]"));
}

#[test]
fn test_invalid_config_reports_error() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("config.toml"), "request_timeout_secs = \"soon\"\n").unwrap();

    cargo_bin_cmd!("modelpick")
        .env("MODELPICK_HOME", dir.path())
        .args(["config", "show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("load config"));
}
