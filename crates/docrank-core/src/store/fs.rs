use std::collections::BTreeSet;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

use super::paths::{normalize_document_path, relative_path};
use super::{DocumentRef, DocumentStore};
use crate::error::{DocrankError, Result};

/// Documents on disk under a workspace root
#[derive(Debug, Clone)]
pub struct FsStore {
    root: PathBuf,
    tracked: BTreeSet<String>,
}

impl FsStore {
    pub fn new<I, S>(root: impl Into<PathBuf>, tracked: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FsStore {
            root: root.into(),
            tracked: tracked.into_iter().map(Into::into).collect(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute path of a store-relative document path
    pub fn resolve(&self, path: &str) -> Result<PathBuf> {
        let normalized = normalize_document_path(path)?;
        Ok(self.root.join(normalized))
    }

    /// Modify-time of a document in epoch milliseconds
    pub fn modify_time(&self, path: &str) -> Result<i64> {
        let full = self.resolve(path)?;
        let metadata = fs::metadata(&full).map_err(|e| map_read_error(path, e))?;
        if !metadata.is_file() {
            return Err(DocrankError::document_not_found(path));
        }
        Ok(modify_millis(&metadata))
    }

    /// Every markdown file under the root, skipping hidden directories
    pub fn enumerate_markdown(&self) -> Vec<DocumentRef> {
        let mut documents = Vec::new();

        for entry in WalkDir::new(&self.root)
            .follow_links(true)
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_hidden(e))
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!(error = %e, "skipping unreadable directory entry");
                    continue;
                }
            };

            if !entry.file_type().is_file() || !is_markdown(entry.path()) {
                continue;
            }

            let Some(path) = relative_path(&self.root, entry.path()) else {
                continue;
            };
            let modify_time = entry.metadata().map(|m| modify_millis(&m)).unwrap_or(0);
            documents.push(DocumentRef::new(path, modify_time));
        }

        documents.sort_by(|a, b| a.path.cmp(&b.path));
        documents
    }
}

impl DocumentStore for FsStore {
    fn enumerate_tracked_documents(&self) -> Result<Vec<DocumentRef>> {
        let mut documents = Vec::with_capacity(self.tracked.len());

        for path in &self.tracked {
            match self.modify_time(path) {
                Ok(modify_time) => documents.push(DocumentRef::new(path.clone(), modify_time)),
                Err(DocrankError::DocumentNotFound { .. }) => {
                    debug!(path = %path, "tracked document missing on disk");
                }
                Err(e) => {
                    warn!(path = %path, error = %e, "skipping unreadable tracked document");
                }
            }
        }

        Ok(documents)
    }

    fn read_text(&self, path: &str) -> Result<String> {
        let full = self.resolve(path)?;
        fs::read_to_string(&full).map_err(|e| map_read_error(path, e))
    }
}

fn map_read_error(path: &str, error: std::io::Error) -> DocrankError {
    if error.kind() == ErrorKind::NotFound {
        DocrankError::document_not_found(path)
    } else {
        DocrankError::io_operation("read", path, error)
    }
}

fn modify_millis(metadata: &fs::Metadata) -> i64 {
    metadata
        .modified()
        .map(|time| DateTime::<Utc>::from(time).timestamp_millis())
        .unwrap_or(0)
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .is_some_and(|name| name.starts_with('.'))
}

fn is_markdown(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("md"))
}
