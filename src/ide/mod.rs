//! IDE features: the operations an editor asks for.
//!
//! Each function takes the configuration, a compiler and plain paths and
//! positions, and returns plain data. [`Inspector`] wraps them as methods.
//!
//! ## Design Principles
//!
//! 1. **Fresh per request**: nothing is cached between calls
//! 2. **No editor protocol types**: conversion happens at the caller
//! 3. **All-or-nothing rename**: a plan is complete and verified, or absent
//!
//! ## Usage
//!
//! ```no_run
//! use std::path::Path;
//! use inspector::ide::{Inspector, RenameOutcome};
//! use inspector::project::InspectorConfig;
//!
//! let inspector = Inspector::new(InspectorConfig::from_env());
//! let file = Path::new("/ws/main.ol");
//! match inspector.plan_rename(file, 3, 10, Path::new("/ws")) {
//!     Ok(RenameOutcome::Completed(plan)) => println!("{} edits", plan.len()),
//!     Ok(RenameOutcome::Skipped(notice)) => println!("{}", notice.diagnostic().message),
//!     Err(abandoned) => eprintln!("{abandoned}"),
//! }
//! ```

mod analysis;
mod completion;
mod context;
mod goto;
mod position;
mod references;
mod rename;
mod symbols;

pub use analysis::Inspector;
pub use completion::{complete_import_symbol, complete_package_path};
pub use context::{verify_location, verify_range};
pub use goto::{DefinitionTarget, goto_definition};
pub use position::{WordAt, is_word_char, resolve_word, word_at};
pub use references::{Reference, ReferencesError, find_references};
pub use rename::{
    AbandonReason, RenameAbandoned, RenameEdit, RenameOutcome, RenamePlan, SkipNotice,
    plan_rename, plan_rename_symbol,
};
pub use symbols::{ModuleSymbols, SymbolMatch, module_symbols, workspace_symbols};
