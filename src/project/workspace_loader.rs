//! Workspace discovery and module loading.
//!
//! A [`Workspace`] is one request's snapshot: the canonical root, the module
//! files found beneath it, and the text read for them so far. It is rebuilt
//! for every request and never shared.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use rayon::prelude::*;
use thiserror::Error;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::base::{FileId, FileSet};
use crate::hir::{Module, ModuleCompiler, ParseFault, canonical_path};

/// The workspace root could not be scanned.
#[derive(Debug, Error)]
pub enum WorkspaceError {
    #[error("workspace root {} is not a directory", .0.display())]
    NotADirectory(PathBuf),

    #[error("cannot scan workspace root {}: {source}", .path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

/// Module files under a root plus the compiler used to load them.
pub struct Workspace<'a> {
    root: PathBuf,
    files: FileSet,
    compiler: &'a dyn ModuleCompiler,
    include_paths: &'a [PathBuf],
}

impl<'a> Workspace<'a> {
    /// Recursively enumerate files with `extension` under `root`.
    ///
    /// Unreadable subdirectories are logged and skipped; only a root that
    /// cannot be walked at all is an error.
    pub fn scan(
        root: &Path,
        extension: &str,
        compiler: &'a dyn ModuleCompiler,
        include_paths: &'a [PathBuf],
    ) -> Result<Self, WorkspaceError> {
        let root = canonical_path(root);
        if !root.is_dir() {
            return Err(WorkspaceError::NotADirectory(root));
        }

        let files = FileSet::new();
        for entry in WalkDir::new(&root).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(source) if source.depth() == 0 => {
                    return Err(WorkspaceError::Walk { path: root, source });
                }
                Err(err) => {
                    warn!(root = %root.display(), error = %err, "skipping unreadable entry");
                    continue;
                }
            };
            let path = entry.path();
            if entry.file_type().is_file() && path.extension().is_some_and(|ext| ext == extension) {
                files.insert(&canonical_path(path));
            }
        }

        debug!(root = %root.display(), modules = files.len(), "scanned workspace");
        Ok(Self {
            root,
            files,
            compiler,
            include_paths,
        })
    }

    /// Canonical workspace root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Whether `path` lies beneath the workspace root.
    pub fn contains(&self, path: &Path) -> bool {
        canonical_path(path).starts_with(&self.root)
    }

    pub fn files(&self) -> Vec<FileId> {
        self.files.files()
    }

    pub fn path(&self, file: FileId) -> Option<PathBuf> {
        self.files.path(file)
    }

    /// Discovered module paths, sorted.
    pub fn module_paths(&self) -> Vec<PathBuf> {
        let mut paths: Vec<_> = self
            .files()
            .into_iter()
            .filter_map(|file| self.path(file))
            .collect();
        paths.sort();
        paths
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Compile one module from disk, forwarding the include paths.
    pub fn load(&self, path: &Path) -> Result<Module, ParseFault> {
        debug!(module = %path.display(), "loading module");
        self.compiler.compile(path, None, self.include_paths)
    }

    /// Compile every discovered module in parallel. Results are in path
    /// order; the failure policy is left to the caller.
    pub fn load_all(&self) -> Vec<(PathBuf, Result<Module, ParseFault>)> {
        self.module_paths()
            .into_par_iter()
            .map(|path| {
                let result = self.load(&path);
                (path, result)
            })
            .collect()
    }

    /// Current text of a module, read once per snapshot.
    pub fn source(&self, path: &Path) -> io::Result<Arc<str>> {
        let path = canonical_path(path);
        let file = self.files.insert(&path);
        if let Some(text) = self.files.contents(file) {
            return Ok(text);
        }
        let text: Arc<str> = Arc::from(std::fs::read_to_string(&path)?);
        self.files.set_contents(file, text.clone());
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hir::SourceCompiler;
    use std::fs;

    fn workspace_dir() -> tempfile::TempDir {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir_all(tmp.path().join("lib")).unwrap();
        fs::write(tmp.path().join("main.ol"), "from .lib.shapes import Shape").unwrap();
        fs::write(tmp.path().join("lib/shapes.ol"), "type Shape: void").unwrap();
        fs::write(tmp.path().join("lib/broken.ol"), "type {").unwrap();
        fs::write(tmp.path().join("notes.txt"), "type Ignored: void").unwrap();
        tmp
    }

    #[test]
    fn test_scan_filters_by_extension() {
        let tmp = workspace_dir();
        let compiler = SourceCompiler::new();
        let workspace = Workspace::scan(tmp.path(), "ol", &compiler, &[]).unwrap();

        let names: Vec<_> = workspace
            .module_paths()
            .iter()
            .map(|p| p.strip_prefix(workspace.root()).unwrap().to_path_buf())
            .collect();
        assert_eq!(
            names,
            vec![
                PathBuf::from("lib/broken.ol"),
                PathBuf::from("lib/shapes.ol"),
                PathBuf::from("main.ol"),
            ]
        );
    }

    #[test]
    fn test_scan_rejects_missing_root() {
        let tmp = tempfile::tempdir().unwrap();
        let compiler = SourceCompiler::new();
        let result = Workspace::scan(&tmp.path().join("missing"), "ol", &compiler, &[]);
        assert!(matches!(result, Err(WorkspaceError::NotADirectory(_))));
    }

    #[test]
    fn test_load_all_keeps_per_module_results() {
        let tmp = workspace_dir();
        let compiler = SourceCompiler::new();
        let workspace = Workspace::scan(tmp.path(), "ol", &compiler, &[]).unwrap();

        let loaded = workspace.load_all();
        assert_eq!(loaded.len(), 3);
        assert!(matches!(loaded[0].1, Err(ParseFault::Syntax { .. })));
        assert!(loaded[1].1.is_ok());
        assert!(loaded[2].1.is_ok());
    }

    #[test]
    fn test_contains_and_source() {
        let tmp = workspace_dir();
        let compiler = SourceCompiler::new();
        let workspace = Workspace::scan(tmp.path(), "ol", &compiler, &[]).unwrap();

        assert!(workspace.contains(&tmp.path().join("lib/shapes.ol")));
        assert!(!workspace.contains(Path::new("/")));

        let path = tmp.path().join("lib/shapes.ol");
        assert_eq!(&*workspace.source(&path).unwrap(), "type Shape: void");
        // the first read is kept for the rest of the snapshot
        fs::write(&path, "type Other: void").unwrap();
        assert_eq!(&*workspace.source(&path).unwrap(), "type Shape: void");

        assert!(workspace.source(&tmp.path().join("gone.ol")).is_err());
    }
}
