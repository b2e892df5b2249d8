//! # jolie-inspector
//!
//! Symbol resolution and cross-file rename planning for workspaces of
//! Jolie-style `.ol` modules.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! ide      → editor operations (resolve word, goto, search, rename, references, completion)
//!   ↓
//! project  → workspace scanning, configuration, package paths
//!   ↓
//! hir      → symbol tables, module compiler, cross-module resolution
//!   ↓
//! syntax   → logos lexer + top-level parser
//!   ↓
//! base     → primitives (FileId, FileSet, LineCol, SourceRange)
//! ```
//!
//! Every request is served from scratch: modules are compiled for the
//! request that needs them and dropped afterwards.

/// Foundation types: FileId, FileSet, positions and ranges
pub mod base;

/// Lexer and top-level parser
pub mod syntax;

/// Symbol tables, module compilation and cross-module resolution
pub mod hir;

/// Workspace discovery and configuration
pub mod project;

/// Editor-facing operations
pub mod ide;

// Re-export commonly needed items
pub use base::{FileId, LineCol, SourceRange};
pub use hir::{ModuleCompiler, ParseFault, SourceCompiler};
pub use ide::{Inspector, RenameAbandoned, RenameOutcome, RenamePlan};
pub use project::InspectorConfig;
