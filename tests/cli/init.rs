use crate::support::docrank;
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn test_init_creates_workspace() {
    let dir = tempdir().unwrap();

    docrank()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized docrank workspace"));

    assert!(dir.path().join(".docrank").is_dir());
    assert!(dir.path().join(".docrank/config.toml").exists());
    assert!(dir.path().join(".docrank/metrics.json").exists());
    assert!(dir.path().join(".docrank/tracked.json").exists());
}

#[test]
fn test_init_idempotent() {
    let dir = tempdir().unwrap();

    docrank().current_dir(dir.path()).arg("init").assert().success();
    docrank().current_dir(dir.path()).arg("init").assert().success();
}

#[test]
fn test_init_writes_default_metrics() {
    let dir = tempdir().unwrap();
    docrank().current_dir(dir.path()).arg("init").assert().success();

    let content = std::fs::read_to_string(dir.path().join(".docrank/config.toml")).unwrap();
    let config: toml::Value = toml::from_str(&content).unwrap();
    let metrics = config["metrics"].as_array().unwrap();
    let ids: Vec<_> = metrics.iter().map(|m| m["id"].as_str().unwrap()).collect();
    assert_eq!(ids, vec!["importance", "urgency", "effort"]);
}

#[test]
fn test_root_flag_selects_workspace() {
    let dir = tempdir().unwrap();
    let other = tempdir().unwrap();

    docrank()
        .current_dir(other.path())
        .arg("--root")
        .arg(dir.path())
        .arg("init")
        .assert()
        .success();

    assert!(dir.path().join(".docrank").is_dir());
    assert!(!other.path().join(".docrank").exists());
}

#[test]
fn test_init_json() {
    let dir = tempdir().unwrap();

    docrank()
        .current_dir(dir.path())
        .args(["--format", "json", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"status\": \"ok\""))
        .stdout(predicate::str::contains("\"metrics\": 3"));
}
