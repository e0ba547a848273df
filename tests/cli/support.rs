use std::fs;
use std::path::Path;

use assert_cmd::{cargo::cargo_bin_cmd, Command};
use tempfile::TempDir;

/// Get a Command for docrank
pub fn docrank() -> Command {
    cargo_bin_cmd!("docrank")
}

/// Write a document under `root`, creating parent directories
pub fn write_doc(root: &Path, path: &str, content: &str) {
    let full = root.join(path);
    if let Some(parent) = full.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(full, content).unwrap();
}

/// An initialized workspace with `docs` written and tracked
pub fn workspace_with(docs: &[(&str, &str)]) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    docrank().current_dir(dir.path()).arg("init").assert().success();

    for (path, content) in docs {
        write_doc(dir.path(), path, content);
    }
    if !docs.is_empty() {
        docrank()
            .current_dir(dir.path())
            .args(["track", "--all"])
            .assert()
            .success();
    }
    dir
}

/// Parse stdout of a `--format json` run
pub fn json_stdout(output: &std::process::Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).unwrap()
}
