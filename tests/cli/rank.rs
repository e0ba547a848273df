use crate::support::{docrank, json_stdout, workspace_with};
use predicates::prelude::*;

fn two_docs() -> tempfile::TempDir {
    workspace_with(&[("a.md", "alpha notes"), ("b.md", "beta notes")])
}

#[test]
fn test_rank_first_run_marks_new() {
    let dir = two_docs();

    docrank()
        .current_dir(dir.path())
        .arg("rank")
        .assert()
        .success()
        .stdout(predicate::str::contains("1.  5.00  medium    new  a.md"))
        .stdout(predicate::str::contains("2.  5.00  medium    new  b.md"));

    assert!(dir.path().join(".docrank/ranking.json").exists());
}

#[test]
fn test_rank_reports_change_against_snapshot() {
    let dir = two_docs();
    docrank().current_dir(dir.path()).arg("rank").assert().success();

    docrank()
        .current_dir(dir.path())
        .args(["set", "b.md", "importance", "10"])
        .assert()
        .success();

    let output = docrank()
        .current_dir(dir.path())
        .args(["--format", "json", "rank"])
        .output()
        .unwrap();
    let json = json_stdout(&output);

    assert_eq!(json[0]["document"]["path"], "b.md");
    assert_eq!(json[0]["rank"], 1);
    assert_eq!(json[0]["rank_change"], 1);
    assert_eq!(json[0]["band"], "high");
    assert_eq!(json[1]["document"]["path"], "a.md");
    assert_eq!(json[1]["rank_change"], -1);

    // unchanged on the next run
    let output = docrank()
        .current_dir(dir.path())
        .args(["--format", "json", "rank"])
        .output()
        .unwrap();
    assert_eq!(json_stdout(&output)[0]["rank_change"], 0);
}

#[test]
fn test_rank_sort_and_limit() {
    let dir = two_docs();
    docrank()
        .current_dir(dir.path())
        .args(["set", "a.md", "urgency", "9"])
        .assert()
        .success();

    let output = docrank()
        .current_dir(dir.path())
        .args([
            "--format",
            "json",
            "rank",
            "--sort-by",
            "metric:urgency",
            "--order",
            "asc",
            "--limit",
            "1",
        ])
        .output()
        .unwrap();
    let json = json_stdout(&output);
    let entries = json.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["document"]["path"], "b.md");
}

#[test]
fn test_rank_unknown_sort_metric() {
    let dir = two_docs();

    docrank()
        .current_dir(dir.path())
        .args(["rank", "--sort-by", "metric:joy"])
        .assert()
        .code(3);

    docrank()
        .current_dir(dir.path())
        .args(["rank", "--sort-by", "colour"])
        .assert()
        .code(2);
}

#[test]
fn test_rank_hides_zero_priority_unless_requested() {
    let dir = two_docs();
    for metric in ["importance", "urgency", "effort"] {
        docrank()
            .current_dir(dir.path())
            .args(["set", "a.md", metric, "0"])
            .assert()
            .success();
    }

    let output = docrank()
        .current_dir(dir.path())
        .args(["--format", "json", "rank"])
        .output()
        .unwrap();
    assert_eq!(json_stdout(&output).as_array().unwrap().len(), 1);

    let output = docrank()
        .current_dir(dir.path())
        .args(["--format", "json", "rank", "--include-empty"])
        .output()
        .unwrap();
    assert_eq!(json_stdout(&output).as_array().unwrap().len(), 2);
}

#[test]
fn test_rank_breakdown() {
    let dir = two_docs();

    docrank()
        .current_dir(dir.path())
        .args(["rank", "--breakdown"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Importance"))
        .stdout(predicate::str::contains("2.00"));
}

#[test]
fn test_stats_histogram() {
    let dir = two_docs();
    docrank()
        .current_dir(dir.path())
        .args(["set", "b.md", "importance", "10"])
        .assert()
        .success();

    let output = docrank()
        .current_dir(dir.path())
        .args(["--format", "json", "stats"])
        .output()
        .unwrap();
    let stats = json_stdout(&output);

    assert_eq!(stats["count"], 2);
    assert_eq!(stats["mean"], 6.0);
    assert_eq!(stats["max"], 7.0);
    assert_eq!(stats["min"], 5.0);
    assert_eq!(stats["histogram"]["high"], 1);
    assert_eq!(stats["histogram"]["medium"], 1);
}

#[test]
fn test_reset_history() {
    let dir = two_docs();
    docrank()
        .current_dir(dir.path())
        .args(["set", "a.md", "importance", "8"])
        .assert()
        .success();

    docrank()
        .current_dir(dir.path())
        .arg("reset-history")
        .assert()
        .success()
        .stdout(predicate::str::contains("2 document(s)"));

    let output = docrank()
        .current_dir(dir.path())
        .args(["--format", "json", "rank", "--sort-by", "name"])
        .output()
        .unwrap();
    let json = json_stdout(&output);
    let a = json
        .as_array()
        .unwrap()
        .iter()
        .find(|e| e["document"]["path"] == "a.md")
        .unwrap();
    assert_eq!(a["metrics"]["visitCount"], 0);
    assert_eq!(a["metrics"]["lastVisited"], 0);
    assert_eq!(a["metrics"]["values"]["importance"], 8.0);
}
