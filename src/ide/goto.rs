//! Go-to-definition.

use std::path::{Path, PathBuf};

use smol_str::SmolStr;
use tracing::{debug, warn};

use super::position::word_at;
use crate::base::SourceRange;
use crate::hir::{ModuleCompiler, ResolveResult};
use crate::project::InspectorConfig;

/// Where a symbol is declared.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DefinitionTarget {
    pub module: PathBuf,
    pub range: SourceRange,
    /// The declared name, which differs from the word under the caret when
    /// the import was aliased
    pub symbol_name: SmolStr,
}

/// Find the declaration of the symbol under the caret.
///
/// Imported symbols resolve to their origin module. Returns `None` when the
/// caret is not on a bound name or the module cannot be compiled.
pub fn goto_definition(
    config: &InspectorConfig,
    compiler: &dyn ModuleCompiler,
    file: &Path,
    source: Option<&str>,
    line: u32,
    column: u32,
) -> Option<DefinitionTarget> {
    let module = match compiler.compile(file, source, &config.include_paths) {
        Ok(module) => module,
        Err(fault) => {
            warn!(file = %file.display(), "goto definition: {fault}");
            return None;
        }
    };

    let word = word_at(&module.source, line, column).ok()?;
    if word.is_empty() {
        return None;
    }

    let target = match ResolveResult::classify(&module, &word.text) {
        ResolveResult::Local(local) => DefinitionTarget {
            module: module.path.clone(),
            range: local.range,
            symbol_name: local.name.clone(),
        },
        ResolveResult::Imported(imported) => DefinitionTarget {
            module: imported.origin.module.clone(),
            range: imported.origin.range,
            symbol_name: imported.origin.name.clone(),
        },
        ResolveResult::NotFound => return None,
    };
    debug!(
        name = %word.text,
        module = %target.module.display(),
        range = %target.range,
        "resolved definition"
    );
    Some(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hir::{SourceCompiler, canonical_path};
    use std::fs;

    #[test]
    fn test_goto_local_and_imported() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("a.ol"), "type Shape: void").unwrap();
        let main = tmp.path().join("main.ol");
        let source = "from .a import Shape as Form\ntype Box: Form\n";
        let config = InspectorConfig::new();
        let compiler = SourceCompiler::new();

        let target = goto_definition(&config, &compiler, &main, Some(source), 1, 11).unwrap();
        assert_eq!(target.module, canonical_path(&tmp.path().join("a.ol")));
        assert_eq!(target.range, SourceRange::new(0, 5, 10));
        assert_eq!(target.symbol_name, "Shape");

        let target = goto_definition(&config, &compiler, &main, Some(source), 1, 6).unwrap();
        assert_eq!(target.module, canonical_path(&main));
        assert_eq!(target.range, SourceRange::new(1, 5, 8));
        assert_eq!(target.symbol_name, "Box");
    }

    #[test]
    fn test_goto_nothing_to_find() {
        let tmp = tempfile::tempdir().unwrap();
        let main = tmp.path().join("main.ol");
        let config = InspectorConfig::new();
        let compiler = SourceCompiler::new();

        // `void` is not a bound name
        assert_eq!(goto_definition(&config, &compiler, &main, Some("type Box: void"), 0, 11), None);
        // the module does not compile
        assert_eq!(goto_definition(&config, &compiler, &main, Some("type {"), 0, 1), None);
        assert_eq!(goto_definition(&config, &compiler, &main, Some("type Box: void"), 4, 0), None);
    }
}
