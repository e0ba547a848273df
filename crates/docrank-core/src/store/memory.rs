use std::collections::BTreeMap;

use super::{DocumentRef, DocumentStore};
use crate::error::{DocrankError, Result};

#[derive(Debug, Clone)]
struct MemoryDocument {
    text: String,
    modify_time: i64,
    tracked: bool,
}

/// In-memory document store for embedding hosts and tests
///
/// Every write bumps the document's modify-time, so cache keys change exactly
/// as they would for an edited file.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    documents: BTreeMap<String, MemoryDocument>,
    clock: i64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a tracked document
    pub fn insert(&mut self, path: impl Into<String>, text: impl Into<String>) -> &mut Self {
        self.clock += 1;
        self.documents.insert(
            path.into(),
            MemoryDocument {
                text: text.into(),
                modify_time: self.clock,
                tracked: true,
            },
        );
        self
    }

    /// Insert a document that exists but is not tracked
    pub fn insert_untracked(&mut self, path: impl Into<String>, text: impl Into<String>) -> &mut Self {
        let path = path.into();
        self.insert(path.clone(), text);
        self.set_tracked(&path, false);
        self
    }

    pub fn set_tracked(&mut self, path: &str, tracked: bool) -> bool {
        match self.documents.get_mut(path) {
            Some(doc) => {
                doc.tracked = tracked;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, path: &str) -> bool {
        self.documents.remove(path).is_some()
    }

    pub fn modify_time(&self, path: &str) -> Option<i64> {
        self.documents.get(path).map(|d| d.modify_time)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl DocumentStore for MemoryStore {
    fn enumerate_tracked_documents(&self) -> Result<Vec<DocumentRef>> {
        Ok(self
            .documents
            .iter()
            .filter(|(_, doc)| doc.tracked)
            .map(|(path, doc)| DocumentRef::new(path.clone(), doc.modify_time))
            .collect())
    }

    fn read_text(&self, path: &str) -> Result<String> {
        self.documents
            .get(path)
            .map(|doc| doc.text.clone())
            .ok_or_else(|| DocrankError::document_not_found(path))
    }
}
