//! Symbols and per-module symbol tables.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use indexmap::IndexMap;
use indexmap::map::Entry;
use smol_str::SmolStr;

use crate::base::SourceRange;
use crate::syntax::DeclKind;

// ============================================================================
// SYMBOLS
// ============================================================================

/// A symbol declared in the module that owns the table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LocalSymbol {
    pub name: SmolStr,
    pub kind: DeclKind,
    /// Location of the declared name
    pub range: SourceRange,
}

/// Where an imported name was taken from: the module named in the
/// `from ... import` statement, which may itself have imported it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImportSource {
    pub module: PathBuf,
    /// The name as exported by `module`
    pub name: SmolStr,
    /// Location of that name inside the import statement
    pub range: SourceRange,
}

/// The module and symbol that actually declare an imported name.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Origin {
    pub module: PathBuf,
    pub name: SmolStr,
    pub kind: DeclKind,
    /// Location of the declaration inside `module`
    pub range: SourceRange,
}

/// A symbol brought into scope by an import statement.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImportedSymbol {
    /// The name bound in this module (the alias, when there is one)
    pub name: SmolStr,
    /// Location of the binding token
    pub range: SourceRange,
    pub source: ImportSource,
    pub origin: Origin,
    /// The import has an `as` clause, even one repeating the source name
    pub aliased: bool,
}

impl ImportedSymbol {
    /// Whether the import binds the symbol through `as`.
    pub fn is_aliased(&self) -> bool {
        self.aliased
    }
}

/// Result of looking a name up in one symbol table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Symbol<'a> {
    Local(&'a LocalSymbol),
    Imported(&'a ImportedSymbol),
}

impl<'a> Symbol<'a> {
    pub fn name(&self) -> &'a str {
        match self {
            Symbol::Local(local) => &local.name,
            Symbol::Imported(imported) => &imported.name,
        }
    }

    pub fn range(&self) -> SourceRange {
        match self {
            Symbol::Local(local) => local.range,
            Symbol::Imported(imported) => imported.range,
        }
    }
}

// ============================================================================
// SYMBOL TABLE
// ============================================================================

/// The symbols and reference index of one module.
///
/// Names are table keys: a name is bound at most once, either locally or by
/// an import.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SymbolTable {
    module: PathBuf,
    locals: IndexMap<SmolStr, LocalSymbol>,
    imports: IndexMap<SmolStr, ImportedSymbol>,
    /// Name → every recorded occurrence, in source order
    references: IndexMap<SmolStr, Vec<SourceRange>>,
}

impl SymbolTable {
    pub fn new(module: impl Into<PathBuf>) -> Self {
        Self {
            module: module.into(),
            locals: IndexMap::new(),
            imports: IndexMap::new(),
            references: IndexMap::new(),
        }
    }

    pub fn module(&self) -> &Path {
        &self.module
    }

    /// Add a local symbol. On a name clash the existing binding is returned.
    pub fn add_local(&mut self, symbol: LocalSymbol) -> Result<(), SourceRange> {
        if let Some(existing) = self.imports.get(&symbol.name) {
            return Err(existing.range);
        }
        match self.locals.entry(symbol.name.clone()) {
            Entry::Occupied(existing) => Err(existing.get().range),
            Entry::Vacant(slot) => {
                slot.insert(symbol);
                Ok(())
            }
        }
    }

    /// Add an imported symbol. On a name clash the existing binding is returned.
    pub fn add_import(&mut self, symbol: ImportedSymbol) -> Result<(), SourceRange> {
        if let Some(existing) = self.locals.get(&symbol.name) {
            return Err(existing.range);
        }
        match self.imports.entry(symbol.name.clone()) {
            Entry::Occupied(existing) => Err(existing.get().range),
            Entry::Vacant(slot) => {
                slot.insert(symbol);
                Ok(())
            }
        }
    }

    /// Record a use of a bound name. Duplicate ranges are ignored.
    pub fn record_occurrence(&mut self, name: &str, range: SourceRange) {
        let occurrences = self.references.entry(SmolStr::new(name)).or_default();
        if !occurrences.contains(&range) {
            occurrences.push(range);
        }
    }

    pub fn local(&self, name: &str) -> Option<&LocalSymbol> {
        self.locals.get(name)
    }

    pub fn imported(&self, name: &str) -> Option<&ImportedSymbol> {
        self.imports.get(name)
    }

    /// Look a name up, locals first.
    pub fn lookup(&self, name: &str) -> Option<Symbol<'_>> {
        self.local(name)
            .map(Symbol::Local)
            .or_else(|| self.imported(name).map(Symbol::Imported))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.locals.contains_key(name) || self.imports.contains_key(name)
    }

    /// Local symbols in declaration order.
    pub fn locals(&self) -> impl Iterator<Item = &LocalSymbol> {
        self.locals.values()
    }

    /// Imported symbols in import order.
    pub fn imports(&self) -> impl Iterator<Item = &ImportedSymbol> {
        self.imports.values()
    }

    /// Every recorded occurrence of `name` in this module.
    pub fn occurrences(&self, name: &str) -> &[SourceRange] {
        self.references
            .get(name)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.locals.len() + self.imports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locals.is_empty() && self.imports.is_empty()
    }
}

// ============================================================================
// MODULE
// ============================================================================

/// One compiled module: its canonical path, the exact text that was
/// compiled, and the resulting symbol table.
#[derive(Clone, Debug)]
pub struct Module {
    pub path: PathBuf,
    pub source: Arc<str>,
    pub table: SymbolTable,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn local(name: &str, line: u32) -> LocalSymbol {
        LocalSymbol {
            name: SmolStr::new(name),
            kind: DeclKind::Type,
            range: SourceRange::new(line, 5, 5 + name.len() as u32),
        }
    }

    fn imported(name: &str, source_name: &str) -> ImportedSymbol {
        ImportedSymbol {
            name: SmolStr::new(name),
            range: SourceRange::new(0, 20, 20 + name.len() as u32),
            source: ImportSource {
                module: PathBuf::from("/ws/a.ol"),
                name: SmolStr::new(source_name),
                range: SourceRange::new(0, 12, 12 + source_name.len() as u32),
            },
            origin: Origin {
                module: PathBuf::from("/ws/a.ol"),
                name: SmolStr::new(source_name),
                kind: DeclKind::Type,
                range: SourceRange::new(0, 5, 5 + source_name.len() as u32),
            },
            aliased: name != source_name,
        }
    }

    #[test]
    fn test_names_are_unique_across_locals_and_imports() {
        let mut table = SymbolTable::new("/ws/b.ol");
        table.add_local(local("Shape", 1)).unwrap();

        assert_eq!(table.add_local(local("Shape", 2)), Err(SourceRange::new(1, 5, 10)));
        assert!(table.add_import(imported("Shape", "Shape")).is_err());

        table.add_import(imported("Tape", "Tape")).unwrap();
        assert!(table.add_local(local("Tape", 3)).is_err());
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_lookup_classifies_symbols() {
        let mut table = SymbolTable::new("/ws/b.ol");
        table.add_local(local("Circle", 1)).unwrap();
        table.add_import(imported("Form", "Shape")).unwrap();

        assert!(matches!(table.lookup("Circle"), Some(Symbol::Local(_))));
        match table.lookup("Form") {
            Some(Symbol::Imported(symbol)) => assert!(symbol.is_aliased()),
            other => panic!("expected imported symbol, got {other:?}"),
        }
        assert_eq!(table.lookup("Shape"), None);
    }

    #[test]
    fn test_occurrences_are_deduplicated_and_ordered() {
        let mut table = SymbolTable::new("/ws/b.ol");
        table.record_occurrence("Shape", SourceRange::new(0, 1, 6));
        table.record_occurrence("Shape", SourceRange::new(3, 1, 6));
        table.record_occurrence("Shape", SourceRange::new(0, 1, 6));

        assert_eq!(
            table.occurrences("Shape"),
            &[SourceRange::new(0, 1, 6), SourceRange::new(3, 1, 6)]
        );
        assert!(table.occurrences("Tape").is_empty());
    }
}
