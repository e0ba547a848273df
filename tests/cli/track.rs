use crate::support::{docrank, json_stdout, workspace_with, write_doc};
use predicates::prelude::*;

#[test]
fn test_track_all_finds_markdown_only() {
    let dir = workspace_with(&[]);
    write_doc(dir.path(), "notes/a.md", "# A\n\nalpha");
    write_doc(dir.path(), "b.MD", "# B\n\nbeta");
    write_doc(dir.path(), "c.txt", "not markdown");
    write_doc(dir.path(), ".hidden/d.md", "hidden");

    let output = docrank()
        .current_dir(dir.path())
        .args(["--format", "json", "track", "--all"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json = json_stdout(&output);
    let added: Vec<_> = json["added"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap().to_string())
        .collect();
    assert_eq!(added, vec!["b.MD", "notes/a.md"]);
    assert_eq!(json["tracked_total"], 2);
}

#[test]
fn test_track_missing_file_exit_code_3() {
    let dir = workspace_with(&[]);

    docrank()
        .current_dir(dir.path())
        .args(["track", "missing.md"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("missing.md"));
}

#[test]
fn test_track_rejects_escaping_path() {
    let dir = workspace_with(&[]);

    docrank()
        .current_dir(dir.path())
        .args(["track", "../outside.md"])
        .assert()
        .code(2);
}

#[test]
fn test_track_without_paths_is_usage_error() {
    let dir = workspace_with(&[]);

    docrank()
        .current_dir(dir.path())
        .arg("track")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--all"));
}

#[test]
fn test_track_twice_reports_already_tracked() {
    let dir = workspace_with(&[("a.md", "alpha")]);

    docrank()
        .current_dir(dir.path())
        .args(["track", "a.md"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already tracked a.md"));
}

#[test]
fn test_untrack_keeps_metric_values() {
    let dir = workspace_with(&[("a.md", "alpha")]);

    docrank()
        .current_dir(dir.path())
        .args(["set", "a.md", "importance", "9"])
        .assert()
        .success();
    docrank()
        .current_dir(dir.path())
        .args(["untrack", "a.md"])
        .assert()
        .success()
        .stdout(predicate::str::contains("untracked a.md"));

    // untracked documents are no longer addressable
    docrank()
        .current_dir(dir.path())
        .args(["visit", "a.md"])
        .assert()
        .code(3);

    docrank()
        .current_dir(dir.path())
        .args(["track", "a.md"])
        .assert()
        .success();

    let output = docrank()
        .current_dir(dir.path())
        .args(["--format", "json", "rank"])
        .output()
        .unwrap();
    let json = json_stdout(&output);
    assert_eq!(json[0]["metrics"]["values"]["importance"], 9.0);
}
