//! Workspace symbol search.

use std::path::{Path, PathBuf};

use smol_str::SmolStr;
use tracing::{debug, warn};

use crate::base::SourceRange;
use crate::hir::{Module, ModuleCompiler};
use crate::project::{InspectorConfig, Workspace};
use crate::syntax::DeclKind;

/// A symbol whose name matched the query.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SymbolMatch {
    pub name: SmolStr,
    /// The declaration, or the binding token of an import
    pub range: SourceRange,
    /// Kind of the declaration; for imports, of the origin
    pub kind: DeclKind,
    pub imported: bool,
}

/// The matches found in one module.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ModuleSymbols {
    pub module: PathBuf,
    pub symbols: Vec<SymbolMatch>,
}

/// Symbols of one module whose name contains `query` (case-sensitive).
/// Imported symbols come first, each group in source order.
pub fn module_symbols(module: &Module, query: &str) -> Vec<SymbolMatch> {
    let imported = module.table.imports().map(|symbol| SymbolMatch {
        name: symbol.name.clone(),
        range: symbol.range,
        kind: symbol.origin.kind,
        imported: true,
    });
    let local = module.table.locals().map(|symbol| SymbolMatch {
        name: symbol.name.clone(),
        range: symbol.range,
        kind: symbol.kind,
        imported: false,
    });
    imported
        .chain(local)
        .filter(|symbol| symbol.name.contains(query))
        .collect()
}

/// Search every module under `root` for symbols whose name contains
/// `query`.
///
/// Every module that compiles gets an entry, sorted by path, even when
/// nothing in it matched. Modules that fail to compile are logged and
/// skipped; the search itself never fails.
pub fn workspace_symbols(
    config: &InspectorConfig,
    compiler: &dyn ModuleCompiler,
    root: &Path,
    query: &str,
) -> Vec<ModuleSymbols> {
    let workspace = match Workspace::scan(root, &config.extension, compiler, &config.include_paths)
    {
        Ok(workspace) => workspace,
        Err(err) => {
            warn!("workspace symbols: {err}");
            return Vec::new();
        }
    };

    let results: Vec<_> = workspace
        .load_all()
        .into_iter()
        .filter_map(|(path, result)| match result {
            Ok(module) => Some(ModuleSymbols {
                symbols: module_symbols(&module, query),
                module: module.path,
            }),
            Err(fault) => {
                warn!(module = %path.display(), "skipping module: {fault}");
                None
            }
        })
        .collect();
    debug!(query, modules = results.len(), "workspace symbols");
    results
}
