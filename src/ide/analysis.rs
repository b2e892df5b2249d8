//! The editor-facing entry point.
//!
//! [`Inspector`] bundles a configuration with a module compiler and exposes
//! every operation as a method. It holds no module state: each call scans,
//! compiles and resolves from scratch, so concurrent calls are independent.

use std::fmt;
use std::path::Path;

use smol_str::SmolStr;

use super::completion::{complete_import_symbol, complete_package_path};
use super::goto::{DefinitionTarget, goto_definition};
use super::position::resolve_word;
use super::references::{Reference, ReferencesError, find_references};
use super::rename::{RenameAbandoned, RenameOutcome, plan_rename, plan_rename_symbol};
use super::symbols::{ModuleSymbols, workspace_symbols};
use crate::hir::{Diagnostic, ModuleCompiler, check_module};
use crate::project::InspectorConfig;

pub struct Inspector {
    config: InspectorConfig,
    compiler: Box<dyn ModuleCompiler>,
}

impl Inspector {
    /// An inspector using the `.ol` compiler configured by `config`.
    pub fn new(config: InspectorConfig) -> Self {
        let compiler = Box::new(config.compiler());
        Self { config, compiler }
    }

    /// An inspector configured from the environment.
    pub fn from_env() -> Self {
        Self::new(InspectorConfig::from_env())
    }

    /// An inspector using a custom module compiler.
    pub fn with_compiler(config: InspectorConfig, compiler: impl ModuleCompiler + 'static) -> Self {
        Self {
            config,
            compiler: Box::new(compiler),
        }
    }

    pub fn config(&self) -> &InspectorConfig {
        &self.config
    }

    pub fn compiler(&self) -> &dyn ModuleCompiler {
        self.compiler.as_ref()
    }

    /// The identifier under the caret; empty when there is none.
    pub fn resolve_word(&self, file: &Path, source: Option<&str>, line: u32, column: u32) -> SmolStr {
        resolve_word(file, source, line, column)
    }

    pub fn find_definition(
        &self,
        file: &Path,
        source: Option<&str>,
        line: u32,
        column: u32,
    ) -> Option<DefinitionTarget> {
        goto_definition(&self.config, self.compiler(), file, source, line, column)
    }

    pub fn search_workspace(&self, root: &Path, query: &str) -> Vec<ModuleSymbols> {
        workspace_symbols(&self.config, self.compiler(), root, query)
    }

    pub fn plan_rename(
        &self,
        file: &Path,
        line: u32,
        column: u32,
        root: &Path,
    ) -> Result<RenameOutcome, RenameAbandoned> {
        plan_rename(&self.config, self.compiler(), file, line, column, root)
    }

    pub fn plan_rename_symbol(
        &self,
        file: &Path,
        symbol: &str,
        root: &Path,
    ) -> Result<RenameOutcome, RenameAbandoned> {
        plan_rename_symbol(&self.config, self.compiler(), file, symbol, root)
    }

    pub fn find_references(
        &self,
        file: &Path,
        line: u32,
        column: u32,
        root: &Path,
    ) -> Result<Vec<Reference>, ReferencesError> {
        find_references(&self.config, self.compiler(), file, line, column, root)
    }

    pub fn complete_package_path(&self, source_file: &Path, partial: &str) -> Vec<SmolStr> {
        complete_package_path(&self.config, source_file, partial)
    }

    pub fn complete_import_symbol(
        &self,
        source_file: &Path,
        package_path: &str,
        prefix: &str,
    ) -> Vec<SmolStr> {
        complete_import_symbol(&self.config, self.compiler(), source_file, package_path, prefix)
    }

    /// Compile errors and warnings for one module.
    pub fn check_module(&self, file: &Path, source: Option<&str>) -> Vec<Diagnostic> {
        check_module(self.compiler(), file, source, &self.config.include_paths)
    }
}

impl Default for Inspector {
    fn default() -> Self {
        Self::new(InspectorConfig::default())
    }
}

impl fmt::Debug for Inspector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Inspector")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
