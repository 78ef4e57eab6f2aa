#![allow(deprecated)]
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn menuhook(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("menuhook").unwrap();
    cmd.env("HOME", home.path());
    cmd
}

#[test]
fn test_config_path_under_home() {
    let home = TempDir::new().unwrap();
    let expected = home.path().join(".config").join("menuhook").join("config.toml");

    menuhook(&home)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains(expected.to_str().unwrap()));
}

#[test]
fn test_config_get_default() {
    let home = TempDir::new().unwrap();

    menuhook(&home)
        .args(["config", "get", "element-id"])
        .assert()
        .success()
        .stdout(predicate::str::contains("element-id: menuButton (default)"));
}

#[test]
fn test_config_set_get_clear() {
    let home = TempDir::new().unwrap();

    menuhook(&home)
        .args(["config", "set", "element-id", "navToggle"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Element id set to: navToggle"));

    let saved = fs::read_to_string(
        home.path().join(".config").join("menuhook").join("config.toml"),
    )
    .unwrap();
    assert!(saved.contains("navToggle"));

    menuhook(&home)
        .args(["config", "get", "element-id"])
        .assert()
        .success()
        .stdout(predicate::str::contains("element-id: navToggle"));

    menuhook(&home)
        .args(["config", "clear", "element-id"])
        .assert()
        .success();

    menuhook(&home)
        .args(["config", "get", "element-id"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(default)"));
}

#[test]
fn test_config_unknown_key() {
    let home = TempDir::new().unwrap();

    menuhook(&home)
        .args(["config", "set", "api-key", "x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown config key: api-key"));
}

#[test]
fn test_config_rejects_empty_element_id() {
    let home = TempDir::new().unwrap();

    menuhook(&home)
        .args(["config", "set", "element-id", "  "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("element-id cannot be empty"));
}

#[test]
fn test_corrupt_config_is_reported() {
    let home = TempDir::new().unwrap();
    let dir = home.path().join(".config").join("menuhook");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("config.toml"), "element_id = [").unwrap();

    menuhook(&home)
        .args(["config", "get", "element-id"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse config file"));
}
