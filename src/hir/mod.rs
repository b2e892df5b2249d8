//! High-level IR: compiled modules, symbol tables and cross-module resolution.
//!
//! ## Architecture
//!
//! ```text
//! syntax::parse ─→ SourceCompiler ─→ Module { SymbolTable }
//!                                          │
//!                    SymbolIndex ←─────────┘ (all modules of a workspace)
//!                         │
//!             root_binding / propagate  ─→  ide::rename, ide::references
//! ```
//!
//! - [`ModuleCompiler`] turns one module into a [`Module`]. It is a trait so
//!   callers can supply their own compiler; [`SourceCompiler`] handles
//!   `.ol` modules.
//! - [`SymbolTable`] holds local symbols, imported symbols with their origin,
//!   and the reference index (name → occurrences).
//! - [`SymbolIndex`] links modules through their imports.

mod compiler;
mod diagnostics;
mod fault;
mod packages;
mod resolve;
mod symbols;

pub use compiler::{MODULE_EXTENSION, ModuleCompiler, SourceCompiler, canonical_path};
pub use diagnostics::{
    Diagnostic, DiagnosticCollector, RelatedInfo, Severity, check_module, codes,
};
pub use fault::ParseFault;
pub use packages::{module_file, relative_base, resolve_package};
pub use resolve::{Binding, Importer, MissingModule, ResolveResult, SymbolIndex};
pub use symbols::{
    ImportSource, ImportedSymbol, LocalSymbol, Module, Origin, Symbol, SymbolTable,
};
