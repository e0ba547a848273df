//! Document store boundary
//!
//! The engine only sees documents through [`DocumentStore`]: an enumeration of
//! tracked documents with their modify-times, and text reads. Modify-times must
//! change on every edit, since cache keys depend on them.

mod fs;
mod memory;
pub mod paths;
mod workspace;

pub use fs::FsStore;
pub use memory::MemoryStore;
pub use workspace::Workspace;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Identity and freshness of a tracked document
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentRef {
    /// Store-relative path, `/`-separated
    pub path: String,
    pub display_name: String,
    /// Last modification, epoch milliseconds
    pub modify_time: i64,
}

impl DocumentRef {
    pub fn new(path: impl Into<String>, modify_time: i64) -> Self {
        let path = path.into();
        let display_name = display_name_for(&path);
        DocumentRef {
            path,
            display_name,
            modify_time,
        }
    }
}

/// File stem of a store path: `"notes/rust.md"` -> `"rust"`
pub fn display_name_for(path: &str) -> String {
    let file = path.rsplit('/').next().unwrap_or(path);
    match file.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem.to_string(),
        _ => file.to_string(),
    }
}

/// Source of tracked documents and their text
pub trait DocumentStore {
    /// Every tracked document that currently exists
    fn enumerate_tracked_documents(&self) -> Result<Vec<DocumentRef>>;

    /// Full text of a document
    ///
    /// Fails with `DocumentNotFound` for unknown paths and `Io`/`FailedOperation`
    /// when the content cannot be read.
    fn read_text(&self, path: &str) -> Result<String>;
}
