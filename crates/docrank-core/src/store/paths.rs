//! Workspace layout and path helpers

use std::path::{Component, Path, PathBuf};

use crate::error::{DocrankError, Result};

/// Directory holding docrank state inside a workspace
pub const DATA_DIR: &str = ".docrank";
/// Engine configuration (TOML)
pub const CONFIG_FILE: &str = "config.toml";
/// Persisted metrics book (JSON)
pub const METRICS_FILE: &str = "metrics.json";
/// Tracked document paths (JSON)
pub const TRACKED_FILE: &str = "tracked.json";
/// Last ranking snapshot (JSON)
pub const RANKING_FILE: &str = "ranking.json";

/// Walk up from `start` to the first directory containing [`DATA_DIR`]
pub fn discover_workspace(start: &Path) -> Result<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(DATA_DIR).is_dir())
        .map(Path::to_path_buf)
        .ok_or_else(|| DocrankError::StoreNotFound {
            search_root: start.to_path_buf(),
        })
}

/// Normalize a user-supplied document path to the store form
///
/// Separators become `/` and a leading `./` is dropped. Absolute paths and
/// parent components are rejected so every path stays inside the workspace.
pub fn normalize_document_path(path: &str) -> Result<String> {
    let unified = path.trim().replace('\\', "/");
    let candidate = Path::new(&unified);

    let mut parts = Vec::new();
    for component in candidate.components() {
        match component {
            Component::Normal(part) => parts.push(part.to_string_lossy().into_owned()),
            Component::CurDir => {}
            _ => return Err(DocrankError::invalid_value("document path", path)),
        }
    }

    if parts.is_empty() {
        return Err(DocrankError::invalid_value("document path", path));
    }
    Ok(parts.join("/"))
}

/// Store-relative form of `path` under `root`, `/`-separated
pub fn relative_path(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let parts: Vec<String> = relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join("/"))
    }
}
