use crate::support::{docrank, json_stdout, workspace_with};
use predicates::prelude::*;

fn weights(dir: &std::path::Path) -> Vec<(String, f64)> {
    let output = docrank()
        .current_dir(dir)
        .args(["--format", "json", "metric", "list"])
        .output()
        .unwrap();
    json_stdout(&output)
        .as_array()
        .unwrap()
        .iter()
        .map(|m| {
            (
                m["id"].as_str().unwrap().to_string(),
                m["weight"].as_f64().unwrap(),
            )
        })
        .collect()
}

#[test]
fn test_metric_list_defaults() {
    let dir = workspace_with(&[]);

    docrank()
        .current_dir(dir.path())
        .args(["metric", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("importance"))
        .stdout(predicate::str::contains("40.00"));
}

#[test]
fn test_metric_add_takes_equal_share() {
    let dir = workspace_with(&[]);

    docrank()
        .current_dir(dir.path())
        .args(["metric", "add", "Reading Time"])
        .assert()
        .success()
        .stdout(predicate::str::contains("added reading_time"));

    let weights = weights(dir.path());
    assert_eq!(weights.len(), 4);
    assert_eq!(weights[3], ("reading_time".to_string(), 25.0));
    let total: f64 = weights.iter().map(|(_, w)| w).sum();
    assert!((total - 100.0).abs() < 1e-9);
}

#[test]
fn test_metric_weight_rescales_others() {
    let dir = workspace_with(&[]);

    docrank()
        .current_dir(dir.path())
        .args(["metric", "weight", "importance", "70"])
        .assert()
        .success();

    let weights = weights(dir.path());
    assert_eq!(weights[0].1, 70.0);
    assert_eq!(weights[1].1, 15.0);
    assert_eq!(weights[2].1, 15.0);
}

#[test]
fn test_metric_weight_out_of_range() {
    let dir = workspace_with(&[]);

    docrank()
        .current_dir(dir.path())
        .args(["metric", "weight", "importance", "150"])
        .assert()
        .code(2);
}

#[test]
fn test_metric_rename_keeps_id() {
    let dir = workspace_with(&[]);

    docrank()
        .current_dir(dir.path())
        .args(["metric", "rename", "effort", "Cost"])
        .assert()
        .success();

    docrank()
        .current_dir(dir.path())
        .args(["metric", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("effort"))
        .stdout(predicate::str::contains("Cost"));
}

#[test]
fn test_metric_remove_unknown_exit_code_3() {
    let dir = workspace_with(&[]);

    docrank()
        .current_dir(dir.path())
        .args(["metric", "remove", "nonexistent"])
        .assert()
        .code(3);
}

#[test]
fn test_metric_remove_drops_values() {
    let dir = workspace_with(&[("a.md", "alpha")]);

    docrank()
        .current_dir(dir.path())
        .args(["metric", "remove", "effort"])
        .assert()
        .success();

    let output = docrank()
        .current_dir(dir.path())
        .args(["--format", "json", "rank"])
        .output()
        .unwrap();
    let json = json_stdout(&output);
    let values = json[0]["metrics"]["values"].as_object().unwrap();
    assert!(!values.contains_key("effort"));
    assert_eq!(weights(dir.path()).len(), 2);
}

#[test]
fn test_set_rejects_out_of_range_value() {
    let dir = workspace_with(&[("a.md", "alpha")]);

    docrank()
        .current_dir(dir.path())
        .args(["--format", "json", "set", "a.md", "importance", "11"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("\"type\":\"invalid_metric\""));

    docrank()
        .current_dir(dir.path())
        .args(["set", "a.md", "importance", "-1"])
        .assert()
        .code(2);

    docrank()
        .current_dir(dir.path())
        .args(["set", "a.md", "importance", "lots"])
        .assert()
        .code(2);
}

#[test]
fn test_set_unknown_metric_exit_code_3() {
    let dir = workspace_with(&[("a.md", "alpha")]);

    docrank()
        .current_dir(dir.path())
        .args(["set", "a.md", "joy", "5"])
        .assert()
        .code(3);
}

#[test]
fn test_set_reports_priority() {
    let dir = workspace_with(&[("a.md", "alpha")]);

    // 10 * 0.4 + 5 * 0.3 + 5 * 0.3
    docrank()
        .current_dir(dir.path())
        .args(["set", "a.md", "importance", "10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("a.md importance = 10.00"))
        .stdout(predicate::str::contains("priority 7.00"));

    docrank()
        .current_dir(dir.path())
        .args(["set", "a.md", "importance", "10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("unchanged"));
}
