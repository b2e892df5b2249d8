//! Package paths as seen while an import statement is being typed.
//!
//! `from .lib.sh` should offer `shapes` when `lib/shapes.ol` exists next to
//! the source file, and `from con` should offer `console` from the packages
//! directory.

use std::fs;
use std::path::{Path, PathBuf};

use smol_str::SmolStr;
use tracing::debug;

use crate::hir::{module_file, relative_base};
use crate::syntax::PackagePath;

/// Directory the source file lives in. A directory is its own base.
fn source_dir(source_file: &Path) -> &Path {
    if source_file.is_dir() {
        source_file
    } else {
        source_file.parent().unwrap_or(Path::new(""))
    }
}

/// Directory a package path starts from: relative paths start next to the
/// source file, absolute ones in the packages directory.
pub fn package_base(
    source_file: &Path,
    package: &PackagePath,
    packages_dir: Option<&Path>,
) -> Option<PathBuf> {
    if package.is_relative() {
        relative_base(source_dir(source_file), package.dots)
    } else {
        packages_dir.map(Path::to_path_buf)
    }
}

/// The module file a complete package path names, if it exists.
pub fn package_module(
    source_file: &Path,
    package: &PackagePath,
    packages_dir: Option<&Path>,
    extension: &str,
) -> Option<PathBuf> {
    let base = package_base(source_file, package, packages_dir)?;
    module_file(&base, package, extension).filter(|path| path.is_file())
}

/// Module and directory names that could complete `partial`.
///
/// When `partial` names a directory its modules and subdirectories are
/// listed; otherwise the entries of the enclosing directory that start with
/// the last segment. Module names lose their extension. The result is sorted.
pub fn package_candidates(
    source_file: &Path,
    partial: &str,
    packages_dir: Option<&Path>,
    extension: &str,
) -> Vec<SmolStr> {
    let package = PackagePath::parse(partial);
    let Some(base) = package_base(source_file, &package, packages_dir) else {
        return Vec::new();
    };

    let (last, parents) = match package.segments.split_last() {
        Some((last, parents)) => (last.as_str(), parents),
        None => ("", &[][..]),
    };
    let mut dir = base;
    for segment in parents {
        dir.push(segment.as_str());
    }

    let (dir, prefix) = if !last.is_empty() && dir.join(last).is_dir() {
        (dir.join(last), "")
    } else {
        (dir, last)
    };
    debug!(dir = %dir.display(), prefix, "listing package candidates");

    let Ok(entries) = fs::read_dir(&dir) else {
        return Vec::new();
    };
    let mut names: Vec<SmolStr> = entries
        .filter_map(Result::ok)
        .filter_map(|entry| candidate_name(&entry.path(), extension))
        .filter(|name| name.starts_with(prefix))
        .collect();
    names.sort();
    names.dedup();
    names
}

fn candidate_name(path: &Path, extension: &str) -> Option<SmolStr> {
    if path.is_dir() {
        return path.file_name()?.to_str().map(SmolStr::new);
    }
    if path.extension()? != extension {
        return None;
    }
    path.file_stem()?.to_str().map(SmolStr::new)
}
