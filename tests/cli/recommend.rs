use crate::support::{docrank, json_stdout, workspace_with};
use predicates::prelude::*;

fn library() -> tempfile::TempDir {
    workspace_with(&[
        ("rust.md", "# Rust\n\nOwnership and borrowing keep memory safe"),
        ("rust-copy.md", "# Rust\n\nOwnership and borrowing keep memory safe"),
        ("garden.md", "# Garden\n\nTomatoes need compost, sunlight and patient watering"),
        ("tiny.md", "# Hi"),
    ])
}

fn paths(json: &serde_json::Value) -> Vec<String> {
    json.as_array()
        .unwrap()
        .iter()
        .map(|r| r["document"]["path"].as_str().unwrap().to_string())
        .collect()
}

#[test]
fn test_recommend_direct_mode() {
    let dir = library();

    let output = docrank()
        .current_dir(dir.path())
        .args(["--format", "json", "recommend", "--current", "rust.md"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json = json_stdout(&output);

    let paths = paths(&json);
    assert_eq!(paths[0], "rust-copy.md");
    assert!(!paths.contains(&"rust.md".to_string()));
    assert_eq!(json[0]["mode"], "direct");
    assert!((json[0]["score"].as_f64().unwrap() - 1.0).abs() < 1e-9);
}

#[test]
fn test_recommend_corpus_mode_follows_history() {
    let dir = library();
    docrank()
        .current_dir(dir.path())
        .args(["visit", "rust.md"])
        .assert()
        .success();

    let output = docrank()
        .current_dir(dir.path())
        .args(["--format", "json", "recommend"])
        .output()
        .unwrap();
    let json = json_stdout(&output);
    let paths = paths(&json);

    let copy = paths.iter().position(|p| p == "rust-copy.md").unwrap();
    let garden = paths.iter().position(|p| p == "garden.md").unwrap();
    assert!(copy < garden);
    assert!(json
        .as_array()
        .unwrap()
        .iter()
        .all(|r| r["mode"] == "corpus"));
}

#[test]
fn test_recommend_limit() {
    let dir = library();

    let output = docrank()
        .current_dir(dir.path())
        .args(["--format", "json", "recommend", "--limit", "2"])
        .output()
        .unwrap();
    assert_eq!(json_stdout(&output).as_array().unwrap().len(), 2);
}

#[test]
fn test_recommend_untracked_current_exit_code_3() {
    let dir = library();

    docrank()
        .current_dir(dir.path())
        .args(["recommend", "--current", "nowhere.md"])
        .assert()
        .code(3);
}

#[test]
fn test_recommend_empty_workspace() {
    let dir = workspace_with(&[]);

    docrank()
        .current_dir(dir.path())
        .arg("recommend")
        .assert()
        .success()
        .stdout(predicate::str::contains("No recommendations"));
}

#[test]
fn test_similar_identical_and_unrelated() {
    let dir = library();

    docrank()
        .current_dir(dir.path())
        .args(["similar", "rust.md", "rust-copy.md"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1.00"));

    docrank()
        .current_dir(dir.path())
        .args(["similar", "rust.md", "garden.md"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0.00"));
}

#[test]
fn test_similar_short_text_exit_code_3() {
    let dir = library();

    docrank()
        .current_dir(dir.path())
        .args(["--format", "json", "similar", "rust.md", "tiny.md"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("\"type\":\"empty_content\""));
}
