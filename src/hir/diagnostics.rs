//! Diagnostics: module faults and warnings as editor-facing messages.
//!
//! A module that fails to compile yields one error diagnostic built from its
//! [`ParseFault`]. A module that compiles may still carry warnings, such as
//! imports that are never used.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::compiler::ModuleCompiler;
use super::fault::ParseFault;
use super::symbols::Module;
use crate::base::SourceRange;
use crate::syntax::SyntaxError;

// ============================================================================
// DIAGNOSTIC TYPES
// ============================================================================

/// Severity level of a diagnostic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Severity {
    Error,
    Warning,
    Info,
    Hint,
}

impl Severity {
    /// Convert to LSP severity number.
    pub fn to_lsp(&self) -> u32 {
        match self {
            Severity::Error => 1,
            Severity::Warning => 2,
            Severity::Info => 3,
            Severity::Hint => 4,
        }
    }
}

/// A diagnostic message with location.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Diagnostic {
    /// The module the diagnostic belongs to.
    pub file: PathBuf,
    /// Location inside `file`; faults without a token location point at the
    /// start of the module.
    pub range: SourceRange,
    pub severity: Severity,
    /// Error/warning code (e.g., "E0001").
    pub code: Option<Arc<str>>,
    pub message: Arc<str>,
    pub related: Vec<RelatedInfo>,
}

/// Related information for a diagnostic.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RelatedInfo {
    pub file: PathBuf,
    pub range: SourceRange,
    pub message: Arc<str>,
}

impl Diagnostic {
    fn new(
        severity: Severity,
        file: impl Into<PathBuf>,
        range: SourceRange,
        message: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            file: file.into(),
            range,
            severity,
            code: None,
            message: message.into(),
            related: Vec::new(),
        }
    }

    /// Create a new error diagnostic.
    pub fn error(file: impl Into<PathBuf>, range: SourceRange, message: impl Into<Arc<str>>) -> Self {
        Self::new(Severity::Error, file, range, message)
    }

    /// Create a new warning diagnostic.
    pub fn warning(file: impl Into<PathBuf>, range: SourceRange, message: impl Into<Arc<str>>) -> Self {
        Self::new(Severity::Warning, file, range, message)
    }

    /// Create a new informational diagnostic.
    pub fn info(file: impl Into<PathBuf>, range: SourceRange, message: impl Into<Arc<str>>) -> Self {
        Self::new(Severity::Info, file, range, message)
    }

    /// Set the error code.
    pub fn with_code(mut self, code: impl Into<Arc<str>>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Add related information.
    pub fn with_related(mut self, info: RelatedInfo) -> Self {
        self.related.push(info);
        self
    }

    /// The error diagnostic for a module that failed to compile.
    pub fn from_fault(fault: &ParseFault) -> Self {
        let range = fault.range().unwrap_or_default();
        let diagnostic = Diagnostic::error(fault.path(), range, fault_message(fault))
            .with_code(fault_code(fault));

        match fault {
            ParseFault::SymbolNotFound { module, .. } | ParseFault::ImportCycle { module, .. } => {
                diagnostic.with_related(RelatedInfo {
                    file: module.clone(),
                    range: SourceRange::default(),
                    message: Arc::from("imported module"),
                })
            }
            _ => diagnostic,
        }
    }
}

/// The fault's message without the path prefix its `Display` carries.
fn fault_message(fault: &ParseFault) -> String {
    match fault {
        ParseFault::Syntax { source, .. } => source.to_string(),
        ParseFault::DuplicateSymbol { name, .. } => format!("duplicate definition: '{name}' is already defined"),
        ParseFault::ModuleNotFound { package, .. } => format!("cannot find module '{package}'"),
        ParseFault::SymbolNotFound { name, module, .. } => {
            format!("module {} does not define '{name}'", module.display())
        }
        ParseFault::ImportCycle { module, .. } => format!("import cycle through {}", module.display()),
        ParseFault::Io { source, .. } => format!("cannot read module: {source}"),
    }
}

fn fault_code(fault: &ParseFault) -> &'static str {
    match fault {
        ParseFault::Syntax { source: SyntaxError::Lex { .. }, .. } => codes::LEXICAL_ERROR,
        ParseFault::Syntax { .. } => codes::SYNTAX_ERROR,
        ParseFault::DuplicateSymbol { .. } => codes::DUPLICATE_DEFINITION,
        ParseFault::ModuleNotFound { .. } => codes::MODULE_NOT_FOUND,
        ParseFault::SymbolNotFound { .. } => codes::UNDEFINED_IMPORT,
        ParseFault::ImportCycle { .. } => codes::CIRCULAR_DEPENDENCY,
        ParseFault::Io { .. } => codes::IO_ERROR,
    }
}

// ============================================================================
// DIAGNOSTIC CODES
// ============================================================================

/// Diagnostic codes.
pub mod codes {
    pub const LEXICAL_ERROR: &str = "E0001";
    pub const SYNTAX_ERROR: &str = "E0002";
    pub const DUPLICATE_DEFINITION: &str = "E0003";
    /// Package path matches no module file.
    pub const MODULE_NOT_FOUND: &str = "E0004";
    /// Imported name is not bound in the imported module.
    pub const UNDEFINED_IMPORT: &str = "E0005";
    pub const CIRCULAR_DEPENDENCY: &str = "E0006";
    pub const IO_ERROR: &str = "E0007";

    /// Imported symbol never used.
    pub const UNUSED_IMPORT: &str = "W0001";

    /// Rename refused for a symbol declared outside the workspace.
    pub const RENAME_SKIPPED: &str = "I0001";
}

// ============================================================================
// DIAGNOSTIC COLLECTOR
// ============================================================================

/// Collects diagnostics for one or more modules.
#[derive(Clone, Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Add the diagnostic for a compile fault.
    pub fn fault(&mut self, fault: &ParseFault) {
        self.add(Diagnostic::from_fault(fault));
    }

    /// Add warnings for imports whose only occurrence is the import itself.
    pub fn unused_imports(&mut self, module: &Module) {
        for imported in module.table.imports() {
            let occurrences = module.table.occurrences(&imported.name);
            if occurrences.iter().all(|range| *range == imported.range) {
                self.add(
                    Diagnostic::warning(
                        &module.path,
                        imported.range,
                        format!("unused import: '{}'", imported.name),
                    )
                    .with_code(codes::UNUSED_IMPORT),
                );
            }
        }
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Diagnostics for a specific module.
    pub fn diagnostics_for_file(&self, file: &Path) -> Vec<&Diagnostic> {
        self.diagnostics.iter().filter(|d| d.file == file).collect()
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.severity == Severity::Error).count()
    }

    pub fn warning_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.severity == Severity::Warning).count()
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity == Severity::Error)
    }

    /// Take all diagnostics, leaving the collector empty.
    pub fn take(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    pub fn clear(&mut self) {
        self.diagnostics.clear();
    }
}

/// Compile one module and report its diagnostics.
pub fn check_module(
    compiler: &dyn ModuleCompiler,
    path: &Path,
    source: Option<&str>,
    include_paths: &[PathBuf],
) -> Vec<Diagnostic> {
    let mut collector = DiagnosticCollector::new();
    match compiler.compile(path, source, include_paths) {
        Ok(module) => collector.unused_imports(&module),
        Err(fault) => collector.fault(&fault),
    }
    collector.take()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::LineCol;
    use crate::hir::SourceCompiler;

    #[test]
    fn test_diagnostic_with_code() {
        let diag = Diagnostic::error("/ws/a.ol", SourceRange::new(0, 0, 1), "test")
            .with_code(codes::SYNTAX_ERROR);
        assert_eq!(diag.severity, Severity::Error);
        assert_eq!(diag.code.as_deref(), Some("E0002"));
    }

    #[test]
    fn test_collector_counts() {
        let mut collector = DiagnosticCollector::new();
        collector.add(Diagnostic::error("/ws/a.ol", SourceRange::default(), "error 1"));
        collector.add(Diagnostic::error("/ws/b.ol", SourceRange::default(), "error 2"));
        collector.add(Diagnostic::warning("/ws/a.ol", SourceRange::default(), "warning 1"));

        assert_eq!(collector.error_count(), 2);
        assert_eq!(collector.warning_count(), 1);
        assert!(collector.has_errors());
        assert_eq!(collector.diagnostics_for_file(Path::new("/ws/a.ol")).len(), 2);
    }

    #[test]
    fn test_severity_to_lsp() {
        assert_eq!(Severity::Error.to_lsp(), 1);
        assert_eq!(Severity::Warning.to_lsp(), 2);
        assert_eq!(Severity::Info.to_lsp(), 3);
        assert_eq!(Severity::Hint.to_lsp(), 4);
    }

    #[test]
    fn test_from_fault_uses_token_location() {
        let fault = ParseFault::Syntax {
            path: PathBuf::from("/ws/a.ol"),
            source: SyntaxError::UnmatchedBrace { at: LineCol::new(2, 4) },
        };
        let diag = Diagnostic::from_fault(&fault);

        assert_eq!(diag.file, PathBuf::from("/ws/a.ol"));
        assert_eq!(diag.range, SourceRange::new(2, 4, 5));
        assert_eq!(diag.code.as_deref(), Some(codes::SYNTAX_ERROR));
        assert!(!diag.message.contains("/ws/a.ol"));
    }

    #[test]
    fn test_check_module_reports_unused_imports() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("a.ol"), "type Shape: void\ntype Size: int").unwrap();
        let main = tmp.path().join("main.ol");

        let diagnostics = check_module(
            &SourceCompiler::new(),
            &main,
            Some("from .a import Shape, Size\ntype Box: void { s: Size }"),
            &[],
        );

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].severity, Severity::Warning);
        assert_eq!(&*diagnostics[0].message, "unused import: 'Shape'");
    }

    #[test]
    fn test_check_module_reports_fault() {
        let tmp = tempfile::tempdir().unwrap();
        let main = tmp.path().join("main.ol");

        let diagnostics = check_module(&SourceCompiler::new(), &main, Some("from .gone import X"), &[]);

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code.as_deref(), Some(codes::MODULE_NOT_FOUND));
        assert_eq!(diagnostics[0].range, SourceRange::new(0, 18, 19));
    }
}
