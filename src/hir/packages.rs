//! Package path → module file resolution.
//!
//! `.shapes` is `shapes.ol` next to the importing file, `..lib.shapes` is
//! `lib/shapes.ol` one directory up, and `console` is `console.ol` in the
//! first include path or packages directory that has it.

use std::path::{Path, PathBuf};

use crate::syntax::PackagePath;

/// Directory a relative package path starts from: the importing module's
/// directory, climbing one parent per dot after the first.
pub fn relative_base(importer_dir: &Path, dots: usize) -> Option<PathBuf> {
    let mut base = importer_dir.to_path_buf();
    for _ in 1..dots {
        base = base.parent()?.to_path_buf();
    }
    Some(base)
}

/// Join package segments onto `base`, the last one becoming a file with
/// `extension`.
pub fn module_file(base: &Path, package: &PackagePath, extension: &str) -> Option<PathBuf> {
    let (last, parents) = package.segments.split_last()?;
    if last.is_empty() {
        return None;
    }
    let mut path = base.to_path_buf();
    for segment in parents {
        path.push(segment.as_str());
    }
    path.push(format!("{last}.{extension}"));
    Some(path)
}

/// Find the module file a package path refers to.
///
/// Relative paths are resolved against `importer_dir`; absolute ones are
/// searched in `search_dirs`, in order.
pub fn resolve_package<'a>(
    importer_dir: &Path,
    package: &PackagePath,
    search_dirs: impl IntoIterator<Item = &'a Path>,
    extension: &str,
) -> Option<PathBuf> {
    if package.is_relative() {
        let base = relative_base(importer_dir, package.dots)?;
        return module_file(&base, package, extension).filter(|path| path.is_file());
    }

    search_dirs
        .into_iter()
        .filter_map(|dir| module_file(dir, package, extension))
        .find(|path| path.is_file())
}
