//! Request-scoped file bookkeeping.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::RwLock;

use crate::base::FileId;

/// Maps module paths to [`FileId`]s and keeps the text read for each module.
///
/// A `FileSet` belongs to exactly one workspace snapshot. The lock exists so
/// that module text can be read from several rayon workers at once; nothing is
/// shared between requests.
#[derive(Debug, Default)]
pub struct FileSet {
    inner: RwLock<FileSetInner>,
}

#[derive(Debug, Default)]
struct FileSetInner {
    /// Path → FileId, in insertion order (FileId n is entry n)
    by_path: IndexMap<PathBuf, FileId>,
    /// FileId → text read from disk during this request
    contents: IndexMap<FileId, Arc<str>>,
}

impl FileSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get or assign the FileId for a path.
    pub fn insert(&self, path: &Path) -> FileId {
        // Fast path: read lock
        {
            let inner = self.inner.read();
            if let Some(&id) = inner.by_path.get(path) {
                return id;
            }
        }

        let mut inner = self.inner.write();
        if let Some(&id) = inner.by_path.get(path) {
            return id;
        }
        let id = FileId::new(inner.by_path.len() as u32);
        inner.by_path.insert(path.to_owned(), id);
        id
    }

    /// Look up a path without assigning an id.
    pub fn file_id(&self, path: &Path) -> Option<FileId> {
        self.inner.read().by_path.get(path).copied()
    }

    pub fn path(&self, file: FileId) -> Option<PathBuf> {
        self.inner
            .read()
            .by_path
            .get_index(file.index())
            .map(|(path, _)| path.clone())
    }

    pub fn set_contents(&self, file: FileId, contents: impl Into<Arc<str>>) {
        self.inner.write().contents.insert(file, contents.into());
    }

    pub fn contents(&self, file: FileId) -> Option<Arc<str>> {
        self.inner.read().contents.get(&file).cloned()
    }

    pub fn len(&self) -> usize {
        self.inner.read().by_path.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All file ids in discovery order.
    pub fn files(&self) -> Vec<FileId> {
        self.inner.read().by_path.values().copied().collect()
    }
}
