//! Find references.
//!
//! Uses the same propagation as rename but reports locations instead of
//! planning edits, and tolerates modules that do not compile.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, warn};

use super::position::word_at;
use crate::base::SourceRange;
use crate::hir::{Binding, ModuleCompiler, ParseFault, ResolveResult, SymbolIndex};
use crate::project::{InspectorConfig, Workspace, WorkspaceError};

/// A location bound to the searched symbol.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Reference {
    pub module: PathBuf,
    pub range: SourceRange,
}

/// A reference search that could not start.
#[derive(Debug, Error)]
pub enum ReferencesError {
    #[error("cannot search references: {0}")]
    Compile(#[from] ParseFault),

    #[error("cannot search references: {0}")]
    Workspace(#[from] WorkspaceError),
}

/// Every location bound to the symbol under the caret, declaration
/// included, sorted by module and position.
///
/// Workspace modules that do not compile are logged and left out. Only a
/// start module that does not compile, or a root that cannot be scanned,
/// is an error.
pub fn find_references(
    config: &InspectorConfig,
    compiler: &dyn ModuleCompiler,
    file: &Path,
    line: u32,
    column: u32,
    root: &Path,
) -> Result<Vec<Reference>, ReferencesError> {
    let start = compiler.compile(file, None, &config.include_paths)?;

    let Ok(word) = word_at(&start.source, line, column) else {
        return Ok(Vec::new());
    };
    if !ResolveResult::classify(&start, &word.text).is_found() {
        debug!(name = %word.text, "not a bound name");
        return Ok(Vec::new());
    }
    let start_binding = Binding::new(start.path.clone(), word.text.clone());

    let workspace = Workspace::scan(root, &config.extension, compiler, &config.include_paths)?;

    let mut modules = Vec::with_capacity(workspace.len() + 1);
    for (path, result) in workspace.load_all() {
        match result {
            Ok(module) => modules.push(Arc::new(module)),
            Err(fault) => warn!(module = %path.display(), "skipping module: {fault}"),
        }
    }
    modules.push(Arc::new(start));
    let index = SymbolIndex::from_modules(modules);

    // an origin outside the workspace is not indexed; search from the start
    let binding = index
        .root_binding(start_binding.clone())
        .unwrap_or(start_binding);

    let references: Vec<_> = index
        .propagate(&binding)
        .into_iter()
        .flat_map(|(module, ranges)| {
            ranges.into_iter().map(move |range| Reference {
                module: module.clone(),
                range,
            })
        })
        .collect();
    debug!(name = %binding.name, count = references.len(), "found references");
    Ok(references)
}
