//! Cross-module resolution over a set of compiled modules.
//!
//! A [`SymbolIndex`] holds every compiled module of a workspace together
//! with a reverse import map: for each binding `(module, name)`, the modules
//! that import it. Rename and find-references walk that map.
//!
//! # Bindings
//!
//! A binding is a name bound in one module, either by a declaration or by an
//! import. `from .a import Shape` in `b.ol` binds `(b, Shape)` to `(a, Shape)`;
//! `from .a import Shape as Form` binds `(b, Form)` instead. The root binding
//! of a name is found by climbing unaliased imports until a declaration or an
//! alias is reached.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use indexmap::IndexMap;
use rustc_hash::{FxHashMap, FxHashSet};
use smol_str::SmolStr;
use tracing::debug;

use super::symbols::{ImportedSymbol, LocalSymbol, Module, Symbol};
use crate::base::SourceRange;

// ============================================================================
// BINDINGS
// ============================================================================

/// A name bound in a module.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Binding {
    pub module: PathBuf,
    pub name: SmolStr,
}

impl Binding {
    pub fn new(module: impl Into<PathBuf>, name: impl Into<SmolStr>) -> Self {
        Self {
            module: module.into(),
            name: name.into(),
        }
    }
}

/// One import of a binding by another module.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Importer {
    /// The importing module
    pub module: PathBuf,
    /// The name bound in the importing module
    pub name: SmolStr,
    /// Location of the imported (source) name in the import statement
    pub source_range: SourceRange,
    pub aliased: bool,
}

/// How a name is bound in the module it was looked up in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResolveResult<'a> {
    Local(&'a LocalSymbol),
    Imported(&'a ImportedSymbol),
    NotFound,
}

impl<'a> ResolveResult<'a> {
    /// Classify `name` in one module.
    pub fn classify(module: &'a Module, name: &str) -> Self {
        match module.table.lookup(name) {
            Some(Symbol::Local(local)) => ResolveResult::Local(local),
            Some(Symbol::Imported(imported)) => ResolveResult::Imported(imported),
            None => ResolveResult::NotFound,
        }
    }

    pub fn symbol(&self) -> Option<Symbol<'a>> {
        match *self {
            ResolveResult::Local(local) => Some(Symbol::Local(local)),
            ResolveResult::Imported(imported) => Some(Symbol::Imported(imported)),
            ResolveResult::NotFound => None,
        }
    }

    pub fn is_found(&self) -> bool {
        !matches!(self, ResolveResult::NotFound)
    }
}

/// A climb reached a module that is not in the index.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MissingModule(pub PathBuf);

// ============================================================================
// SYMBOL INDEX
// ============================================================================

/// Every compiled module of a workspace plus the reverse import map.
#[derive(Clone, Debug, Default)]
pub struct SymbolIndex {
    modules: IndexMap<PathBuf, Arc<Module>>,
    /// Source binding → modules importing it
    importers: FxHashMap<Binding, Vec<Importer>>,
}

impl SymbolIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index from compiled modules.
    pub fn from_modules(modules: impl IntoIterator<Item = Arc<Module>>) -> Self {
        let mut index = Self::new();
        for module in modules {
            index.insert(module);
        }
        index
    }

    /// Add a module, replacing any earlier version with the same path.
    pub fn insert(&mut self, module: Arc<Module>) {
        if self.modules.contains_key(&module.path) {
            self.remove(&module.path);
        }

        for imported in module.table.imports() {
            let key = Binding::new(imported.source.module.clone(), imported.source.name.clone());
            self.importers.entry(key).or_default().push(Importer {
                module: module.path.clone(),
                name: imported.name.clone(),
                source_range: imported.source.range,
                aliased: imported.is_aliased(),
            });
        }
        self.modules.insert(module.path.clone(), module);
    }

    /// Remove a module and its import edges.
    pub fn remove(&mut self, path: &Path) {
        if self.modules.shift_remove(path).is_none() {
            return;
        }
        for importers in self.importers.values_mut() {
            importers.retain(|importer| importer.module != path);
        }
        self.importers.retain(|_, importers| !importers.is_empty());
    }

    pub fn module(&self, path: &Path) -> Option<&Arc<Module>> {
        self.modules.get(path)
    }

    pub fn modules(&self) -> impl Iterator<Item = &Arc<Module>> {
        self.modules.values()
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Modules that import `binding` directly.
    pub fn importers_of(&self, binding: &Binding) -> &[Importer] {
        self.importers
            .get(binding)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Climb unaliased imports from `start` to the binding that owns the name:
    /// a declaration, an aliasing import, or the last binding before a cycle.
    pub fn root_binding(&self, start: Binding) -> Result<Binding, MissingModule> {
        let mut visited = FxHashSet::default();
        let mut current = start;

        loop {
            let module = self
                .module(&current.module)
                .ok_or_else(|| MissingModule(current.module.clone()))?;
            let next = match module.table.lookup(&current.name) {
                Some(Symbol::Imported(imported)) if !imported.is_aliased() => {
                    Binding::new(imported.source.module.clone(), imported.source.name.clone())
                }
                _ => return Ok(current),
            };
            debug!(
                from = %current.module.display(),
                to = %next.module.display(),
                name = %current.name,
                "climbing import"
            );
            visited.insert(current.clone());
            if visited.contains(&next) {
                return Ok(current);
            }
            current = next;
        }
    }

    /// Every location bound to `root`: its occurrences in its own module, the
    /// occurrences of unaliased re-imports (recursively), and the source-name
    /// token of aliased imports.
    ///
    /// Modules missing from the index contribute no occurrences, but their
    /// importers are still followed. Locations are sorted per module and
    /// deduplicated.
    pub fn propagate(&self, root: &Binding) -> BTreeMap<PathBuf, Vec<SourceRange>> {
        let mut found: BTreeMap<PathBuf, Vec<SourceRange>> = BTreeMap::new();
        let mut visited = FxHashSet::default();
        let mut pending = vec![root.clone()];

        while let Some(binding) = pending.pop() {
            if !visited.insert(binding.clone()) {
                continue;
            }

            match self.module(&binding.module) {
                Some(module) => {
                    let occurrences = module.table.occurrences(&binding.name);
                    debug!(
                        module = %binding.module.display(),
                        name = %binding.name,
                        count = occurrences.len(),
                        "collecting occurrences"
                    );
                    found
                        .entry(binding.module.clone())
                        .or_default()
                        .extend_from_slice(occurrences);
                }
                None => debug!(module = %binding.module.display(), "module not indexed"),
            }

            for importer in self.importers_of(&binding) {
                if importer.aliased {
                    found
                        .entry(importer.module.clone())
                        .or_default()
                        .push(importer.source_range);
                } else {
                    pending.push(Binding::new(importer.module.clone(), importer.name.clone()));
                }
            }
        }

        found.retain(|_, ranges| !ranges.is_empty());
        for ranges in found.values_mut() {
            ranges.sort();
            ranges.dedup();
        }
        found
    }
}
