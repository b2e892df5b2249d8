//! Rename planning across a workspace.
//!
//! Planning never touches the files. It produces either a complete
//! [`RenamePlan`] in which every location has been checked against the
//! current text, a [`SkipNotice`] when the symbol is declared outside the
//! workspace, or a [`RenameAbandoned`] fault. A plan is never returned in
//! part.
//!
//! ```text
//! resolve word ─→ classify ─┬─ NotFound ──────────────→ Completed(empty)
//!                           ├─ Imported, origin outside → Skipped
//!                           └─ Local / Imported
//!                                 │ compile every module (rayon)
//!                                 │ climb to root binding
//!                                 │ propagate through importers
//!                                 │ verify every location
//!                                 └──────────────────────→ Completed(plan) | Abandoned
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use smol_str::SmolStr;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::context::verify_range;
use super::position::word_at;
use crate::base::SourceRange;
use crate::hir::{
    Binding, Diagnostic, MissingModule, Module, ModuleCompiler, ParseFault, ResolveResult,
    SymbolIndex, canonical_path, codes,
};
use crate::project::{InspectorConfig, Workspace, WorkspaceError};

// ============================================================================
// RESULT TYPES
// ============================================================================

/// One location to rewrite.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RenameEdit {
    pub range: SourceRange,
    /// The text currently at `range`
    pub symbol: SmolStr,
}

/// Every edit a rename needs, per module. Modules are ordered by path and
/// edits by position, with no duplicates.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RenamePlan {
    edits: BTreeMap<PathBuf, Vec<RenameEdit>>,
}

impl RenamePlan {
    pub fn new() -> Self {
        Self::default()
    }

    fn insert(&mut self, module: PathBuf, symbol: &SmolStr, ranges: &[SourceRange]) {
        let edits = self.edits.entry(module).or_default();
        edits.extend(ranges.iter().map(|&range| RenameEdit {
            range,
            symbol: symbol.clone(),
        }));
        edits.sort();
        edits.dedup();
    }

    /// Edits for one module, empty when the module is untouched.
    pub fn edits(&self, module: &Path) -> &[RenameEdit] {
        self.edits.get(module).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn modules(&self) -> impl Iterator<Item = &Path> {
        self.edits.keys().map(PathBuf::as_path)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Path, &[RenameEdit])> {
        self.edits
            .iter()
            .map(|(module, edits)| (module.as_path(), edits.as_slice()))
    }

    /// Number of modules touched.
    pub fn module_count(&self) -> usize {
        self.edits.len()
    }

    /// Total number of edits.
    pub fn len(&self) -> usize {
        self.edits.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }
}

/// The rename was refused because the symbol is declared outside the
/// workspace root.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SkipNotice {
    /// Module the rename was requested in
    pub file: PathBuf,
    pub symbol: SmolStr,
    /// Where the symbol is bound in `file`
    pub range: SourceRange,
    /// Module declaring the symbol
    pub origin: PathBuf,
}

impl SkipNotice {
    /// Informational diagnostic for the editor.
    pub fn diagnostic(&self) -> Diagnostic {
        Diagnostic::info(
            &self.file,
            self.range,
            format!(
                "'{}' is declared in {}, outside the workspace; rename skipped",
                self.symbol,
                self.origin.display()
            ),
        )
        .with_code(codes::RENAME_SKIPPED)
    }
}

/// Successful rename planning.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum RenameOutcome {
    Completed(RenamePlan),
    Skipped(SkipNotice),
}

impl RenameOutcome {
    /// The plan, if the rename was not skipped.
    pub fn plan(&self) -> Option<&RenamePlan> {
        match self {
            RenameOutcome::Completed(plan) => Some(plan),
            RenameOutcome::Skipped(_) => None,
        }
    }
}

/// Why a rename was abandoned.
#[derive(Debug, Error)]
pub enum AbandonReason {
    #[error("location {range} no longer holds the symbol")]
    LocationMismatch { range: SourceRange },

    #[error("module does not compile: {0}")]
    Parse(#[source] ParseFault),

    #[error("cannot read module: {0}")]
    Io(#[source] io::Error),

    #[error("import origin is not in the workspace")]
    MissingOrigin,

    #[error("{0}")]
    Workspace(#[source] WorkspaceError),
}

/// A rename that cannot be planned safely. No edits are produced.
#[derive(Debug, Error)]
#[error(
    "rename abandoned: '{symbol}' in {}: {reason}; the rename must be done manually",
    .file.display()
)]
pub struct RenameAbandoned {
    /// The offending module
    pub file: PathBuf,
    pub symbol: SmolStr,
    #[source]
    pub reason: AbandonReason,
}

impl RenameAbandoned {
    fn new(file: impl Into<PathBuf>, symbol: &str, reason: AbandonReason) -> Self {
        let abandoned = Self {
            file: file.into(),
            symbol: SmolStr::new(symbol),
            reason,
        };
        warn!("{abandoned}");
        abandoned
    }

    fn from_fault(symbol: &str, fault: ParseFault) -> Self {
        match fault {
            ParseFault::Io { path, source } => Self::new(path, symbol, AbandonReason::Io(source)),
            fault => Self::new(fault.path().to_path_buf(), symbol, AbandonReason::Parse(fault)),
        }
    }
}

// ============================================================================
// PLANNING
// ============================================================================

/// Plan renaming the symbol under the caret.
///
/// A caret on no word, or on a word that is not a bound name, yields an
/// empty plan.
pub fn plan_rename(
    config: &InspectorConfig,
    compiler: &dyn ModuleCompiler,
    file: &Path,
    line: u32,
    column: u32,
    root: &Path,
) -> Result<RenameOutcome, RenameAbandoned> {
    let source = fs::read_to_string(file)
        .map_err(|err| RenameAbandoned::new(file, "", AbandonReason::Io(err)))?;
    match word_at(&source, line, column) {
        Ok(word) if !word.is_empty() => plan_rename_symbol(config, compiler, file, &word.text, root),
        _ => {
            debug!(file = %file.display(), line, column, "no word to rename");
            Ok(RenameOutcome::Completed(RenamePlan::new()))
        }
    }
}

/// Plan renaming `symbol` as bound in `file`.
pub fn plan_rename_symbol(
    config: &InspectorConfig,
    compiler: &dyn ModuleCompiler,
    file: &Path,
    symbol: &str,
    root: &Path,
) -> Result<RenameOutcome, RenameAbandoned> {
    let start = compiler
        .compile(file, None, &config.include_paths)
        .map_err(|fault| RenameAbandoned::from_fault(symbol, fault))?;
    let root = canonical_path(root);

    let range = match ResolveResult::classify(&start, symbol) {
        ResolveResult::NotFound => {
            debug!(file = %start.path.display(), symbol, "symbol not bound, nothing to rename");
            return Ok(RenameOutcome::Completed(RenamePlan::new()));
        }
        ResolveResult::Imported(imported) if !imported.origin.module.starts_with(&root) => {
            return Ok(skipped(&start.path, symbol, imported.range, &imported.origin.module));
        }
        ResolveResult::Local(local) => local.range,
        ResolveResult::Imported(imported) => imported.range,
    };

    let start_binding = Binding::new(start.path.clone(), symbol);
    let workspace = Workspace::scan(&root, &config.extension, compiler, &config.include_paths)
        .map_err(|err| RenameAbandoned::new(&root, symbol, AbandonReason::Workspace(err)))?;
    let index = index_workspace(&workspace, start, symbol)?;

    let binding = index
        .root_binding(start_binding.clone())
        .map_err(|MissingModule(path)| RenameAbandoned::new(path, symbol, AbandonReason::MissingOrigin))?;
    if !workspace.contains(&binding.module) {
        return Ok(skipped(&start_binding.module, symbol, range, &binding.module));
    }
    debug!(
        module = %binding.module.display(),
        name = %binding.name,
        "renaming from root binding"
    );

    let found = index.propagate(&binding);
    let plan = verify_all(&workspace, &binding.name, found)?;
    debug!(modules = plan.module_count(), edits = plan.len(), "rename planned");
    Ok(RenameOutcome::Completed(plan))
}

fn skipped(file: &Path, symbol: &str, range: SourceRange, origin: &Path) -> RenameOutcome {
    let notice = SkipNotice {
        file: file.to_path_buf(),
        symbol: SmolStr::new(symbol),
        range,
        origin: origin.to_path_buf(),
    };
    info!(
        symbol,
        origin = %origin.display(),
        "symbol is declared outside the workspace, rename skipped"
    );
    RenameOutcome::Skipped(notice)
}

/// Compile every workspace module. Any fault abandons the rename.
fn index_workspace(
    workspace: &Workspace<'_>,
    start: Module,
    symbol: &str,
) -> Result<SymbolIndex, RenameAbandoned> {
    let mut modules = Vec::with_capacity(workspace.len() + 1);
    for (_, result) in workspace.load_all() {
        let module = result.map_err(|fault| RenameAbandoned::from_fault(symbol, fault))?;
        modules.push(Arc::new(module));
    }
    modules.push(Arc::new(start));
    Ok(SymbolIndex::from_modules(modules))
}

/// Check every collected location against the current text. The first
/// mismatch abandons the whole plan.
fn verify_all(
    workspace: &Workspace<'_>,
    name: &SmolStr,
    found: BTreeMap<PathBuf, Vec<SourceRange>>,
) -> Result<RenamePlan, RenameAbandoned> {
    let mut plan = RenamePlan::new();
    for (module, ranges) in found {
        let source = workspace
            .source(&module)
            .map_err(|err| RenameAbandoned::new(&module, name, AbandonReason::Io(err)))?;
        if let Some(&range) = ranges.iter().find(|range| !verify_range(&source, **range, name)) {
            return Err(RenameAbandoned::new(
                &module,
                name,
                AbandonReason::LocationMismatch { range },
            ));
        }
        plan.insert(module, name, &ranges);
    }
    Ok(plan)
}
