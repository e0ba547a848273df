use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::paths::{
    discover_workspace, normalize_document_path, CONFIG_FILE, DATA_DIR, METRICS_FILE, RANKING_FILE,
    TRACKED_FILE,
};
use super::FsStore;
use crate::config::EngineConfig;
use crate::error::{DocrankError, Result};
use crate::metrics::{MetricSet, MetricsBook};

/// A directory holding documents and a `.docrank/` state directory
///
/// The workspace owns the persisted state: configuration, the metrics book and
/// the tracked set. Untracking a document keeps its metrics entry.
#[derive(Debug)]
pub struct Workspace {
    root: PathBuf,
    config: EngineConfig,
    book: MetricsBook,
    tracked: BTreeSet<String>,
}

impl Workspace {
    /// Create the state directory under `root`; existing state is kept
    #[tracing::instrument(skip(root), fields(root = %root.display()))]
    pub fn init(root: &Path) -> Result<Self> {
        let data_dir = root.join(DATA_DIR);
        fs::create_dir_all(&data_dir)
            .map_err(|e| DocrankError::io_operation("create", data_dir.display(), e))?;

        let config_path = data_dir.join(CONFIG_FILE);
        if !config_path.exists() {
            EngineConfig::default().save(&config_path)?;
            debug!(path = %config_path.display(), "wrote default config");
        }

        let workspace = Self::open(root)?;
        workspace.save()?;
        Ok(workspace)
    }

    /// Find the nearest workspace at or above `start`
    pub fn discover(start: &Path) -> Result<Self> {
        let root = discover_workspace(start)?;
        Self::open(&root)
    }

    /// Open the workspace rooted at `root`
    #[tracing::instrument(skip(root), fields(root = %root.display()))]
    pub fn open(root: &Path) -> Result<Self> {
        let data_dir = root.join(DATA_DIR);
        if !data_dir.is_dir() {
            return Err(DocrankError::StoreNotFound {
                search_root: root.to_path_buf(),
            });
        }

        let config = EngineConfig::load(&data_dir.join(CONFIG_FILE))?;
        let book = MetricsBook::load(&data_dir.join(METRICS_FILE))?;
        let tracked = load_tracked(&data_dir.join(TRACKED_FILE))?;

        debug!(
            tracked = tracked.len(),
            entries = book.len(),
            "opened workspace"
        );

        Ok(Workspace {
            root: root.to_path_buf(),
            config,
            book,
            tracked,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn data_dir(&self) -> PathBuf {
        self.root.join(DATA_DIR)
    }

    /// Location of the last ranking snapshot
    pub fn ranking_path(&self) -> PathBuf {
        self.data_dir().join(RANKING_FILE)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut EngineConfig {
        &mut self.config
    }

    pub fn metric_set(&self) -> MetricSet {
        self.config.metric_set()
    }

    pub fn book(&self) -> &MetricsBook {
        &self.book
    }

    pub fn book_mut(&mut self) -> &mut MetricsBook {
        &mut self.book
    }

    pub fn tracked(&self) -> &BTreeSet<String> {
        &self.tracked
    }

    /// Split borrow for edits that touch config and book together
    pub fn parts_mut(&mut self) -> (&mut EngineConfig, &mut MetricsBook) {
        (&mut self.config, &mut self.book)
    }

    /// Consume the workspace into its engine inputs
    pub fn into_parts(self) -> (FsStore, EngineConfig, MetricsBook) {
        let store = FsStore::new(self.root, self.tracked);
        (store, self.config, self.book)
    }

    /// Normalize a user path and fail unless it is tracked
    pub fn require_tracked(&self, path: &str) -> Result<String> {
        let normalized = normalize_document_path(path)?;
        if self.tracked.contains(&normalized) {
            Ok(normalized)
        } else {
            Err(DocrankError::not_found("tracked document", normalized))
        }
    }

    /// Start tracking a document; returns false if it already was
    ///
    /// A metrics entry with default values is created on first track.
    pub fn track(&mut self, path: &str) -> Result<bool> {
        let normalized = normalize_document_path(path)?;
        if !self.root.join(&normalized).is_file() {
            return Err(DocrankError::document_not_found(normalized));
        }

        let metrics = self.metric_set();
        self.book.ensure_entry(&normalized, &metrics);
        Ok(self.tracked.insert(normalized))
    }

    /// Stop tracking a document; its metrics entry is kept
    pub fn untrack(&mut self, path: &str) -> Result<bool> {
        let normalized = normalize_document_path(path)?;
        Ok(self.tracked.remove(&normalized))
    }

    /// Persist config, metrics book and tracked set
    pub fn save(&self) -> Result<()> {
        let data_dir = self.data_dir();
        self.config.save(&data_dir.join(CONFIG_FILE))?;
        self.book.save(&data_dir.join(METRICS_FILE))?;
        save_tracked(&data_dir.join(TRACKED_FILE), &self.tracked)
    }
}

fn load_tracked(path: &Path) -> Result<BTreeSet<String>> {
    if !path.exists() {
        return Ok(BTreeSet::new());
    }
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

fn save_tracked(path: &Path, tracked: &BTreeSet<String>) -> Result<()> {
    let content = serde_json::to_string_pretty(tracked)?;
    fs::write(path, content)?;
    Ok(())
}
