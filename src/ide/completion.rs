//! Completion inside import statements.

use std::path::Path;

use smol_str::SmolStr;
use tracing::debug;

use crate::hir::ModuleCompiler;
use crate::project::{InspectorConfig, package_candidates, package_module};
use crate::syntax::PackagePath;

/// Module and directory names that could complete a partly typed package
/// path, e.g. `shapes` for `.lib.sha`.
pub fn complete_package_path(
    config: &InspectorConfig,
    source_file: &Path,
    partial: &str,
) -> Vec<SmolStr> {
    package_candidates(
        source_file,
        partial,
        config.packages_dir.as_deref(),
        &config.extension,
    )
}

/// Names declared by the module at `package_path` that start with `prefix`.
///
/// A missing module or one that does not compile yields no names.
pub fn complete_import_symbol(
    config: &InspectorConfig,
    compiler: &dyn ModuleCompiler,
    source_file: &Path,
    package_path: &str,
    prefix: &str,
) -> Vec<SmolStr> {
    let package = PackagePath::parse(package_path);
    let Some(target) = package_module(
        source_file,
        &package,
        config.packages_dir.as_deref(),
        &config.extension,
    ) else {
        debug!(package = package_path, "no module to complete from");
        return Vec::new();
    };

    match compiler.compile(&target, None, &config.include_paths) {
        Ok(module) => module
            .table
            .locals()
            .filter(|symbol| symbol.name.starts_with(prefix))
            .map(|symbol| symbol.name.clone())
            .collect(),
        Err(fault) => {
            debug!("import completion: {fault}");
            Vec::new()
        }
    }
}
