//! Module compilation: source text → [`Module`] with a symbol table.
//!
//! [`ModuleCompiler`] is the seam the rest of the crate is written against.
//! [`SourceCompiler`] is the implementation for `.ol` modules. It crawls
//! imports so that every imported symbol carries an origin pointer to the
//! module that actually declares it.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use rustc_hash::FxHashMap;
use smol_str::SmolStr;

use super::fault::ParseFault;
use super::packages::resolve_package;
use super::symbols::{ImportSource, ImportedSymbol, LocalSymbol, Module, Origin, Symbol, SymbolTable};
use crate::syntax;

/// Default module file extension.
pub const MODULE_EXTENSION: &str = "ol";

/// Compiles one module into a symbol table and reference index.
///
/// Implementations must be stateless between calls as far as callers can
/// observe: every call reflects the source passed in (or the file on disk).
pub trait ModuleCompiler: Send + Sync {
    /// Compile the module at `path`. When `source` is `None` the file is read
    /// from disk. `include_paths` are searched for absolute package paths.
    fn compile(
        &self,
        path: &Path,
        source: Option<&str>,
        include_paths: &[PathBuf],
    ) -> Result<Module, ParseFault>;
}

/// Canonical form of a module path, falling back to the path as given when
/// it does not exist on disk.
pub fn canonical_path(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Compiler for Jolie-style `.ol` modules.
#[derive(Clone, Debug)]
pub struct SourceCompiler {
    packages_dir: Option<PathBuf>,
    extension: SmolStr,
}

impl SourceCompiler {
    pub fn new() -> Self {
        Self {
            packages_dir: None,
            extension: SmolStr::new_static(MODULE_EXTENSION),
        }
    }

    /// Directory holding the language's bundled packages, searched after
    /// the include paths.
    pub fn with_packages_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.packages_dir = Some(dir.into());
        self
    }

    pub fn with_extension(mut self, extension: impl Into<SmolStr>) -> Self {
        self.extension = extension.into();
        self
    }

    pub fn packages_dir(&self) -> Option<&Path> {
        self.packages_dir.as_deref()
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }
}

impl Default for SourceCompiler {
    fn default() -> Self {
        Self::new()
    }
}

impl ModuleCompiler for SourceCompiler {
    fn compile(
        &self,
        path: &Path,
        source: Option<&str>,
        include_paths: &[PathBuf],
    ) -> Result<Module, ParseFault> {
        let path = canonical_path(path);
        let source: Arc<str> = match source {
            Some(text) => Arc::from(text),
            None => read_source(&path)?,
        };
        let mut crawl = Crawl {
            compiler: self,
            include_paths,
            done: FxHashMap::default(),
            in_progress: Vec::new(),
        };
        crawl.build(path, source)
    }
}

fn read_source(path: &Path) -> Result<Arc<str>, ParseFault> {
    fs::read_to_string(path)
        .map(Arc::from)
        .map_err(|source| ParseFault::Io {
            path: path.to_path_buf(),
            source,
        })
}

/// State for one `compile` call. Dependencies are compiled once per call;
/// nothing survives the call.
struct Crawl<'a> {
    compiler: &'a SourceCompiler,
    include_paths: &'a [PathBuf],
    done: FxHashMap<PathBuf, Arc<Module>>,
    in_progress: Vec<PathBuf>,
}

impl Crawl<'_> {
    fn dependency(&mut self, importer: &Path, path: PathBuf) -> Result<Arc<Module>, ParseFault> {
        if let Some(module) = self.done.get(&path) {
            return Ok(module.clone());
        }
        if self.in_progress.contains(&path) {
            return Err(ParseFault::ImportCycle {
                path: importer.to_path_buf(),
                module: path,
            });
        }
        let source = read_source(&path)?;
        let module = Arc::new(self.build(path.clone(), source)?);
        self.done.insert(path, module.clone());
        Ok(module)
    }

    fn build(&mut self, path: PathBuf, source: Arc<str>) -> Result<Module, ParseFault> {
        let syntax = syntax::parse(&source).map_err(|source| ParseFault::Syntax {
            path: path.clone(),
            source,
        })?;

        self.in_progress.push(path.clone());
        let table = self.symbol_table(&path, &syntax);
        self.in_progress.pop();

        Ok(Module {
            path,
            source,
            table: table?,
        })
    }

    fn symbol_table(
        &mut self,
        path: &Path,
        syntax: &syntax::ModuleSyntax,
    ) -> Result<SymbolTable, ParseFault> {
        let mut table = SymbolTable::new(path);
        let duplicate = |name: &SmolStr, range| ParseFault::DuplicateSymbol {
            path: path.to_path_buf(),
            name: name.clone(),
            range,
        };

        for decl in &syntax.declarations {
            table
                .add_local(LocalSymbol {
                    name: decl.name.text.clone(),
                    kind: decl.kind,
                    range: decl.name.range,
                })
                .map_err(|_| duplicate(&decl.name.text, decl.name.range))?;
        }

        let importer_dir = path.parent().unwrap_or(Path::new(""));
        let compiler = self.compiler;
        for import in &syntax.imports {
            let search_dirs = self
                .include_paths
                .iter()
                .map(PathBuf::as_path)
                .chain(compiler.packages_dir());
            let Some(target) =
                resolve_package(importer_dir, &import.package, search_dirs, compiler.extension())
            else {
                let first = &import.items[0].name;
                return Err(ParseFault::ModuleNotFound {
                    path: path.to_path_buf(),
                    package: import.package.to_string(),
                    range: first.range,
                });
            };

            let dependency = self.dependency(path, canonical_path(&target))?;
            for item in &import.items {
                let origin = match dependency.table.lookup(&item.name.text) {
                    Some(Symbol::Local(local)) => Origin {
                        module: dependency.path.clone(),
                        name: local.name.clone(),
                        kind: local.kind,
                        range: local.range,
                    },
                    Some(Symbol::Imported(imported)) => imported.origin.clone(),
                    None => {
                        return Err(ParseFault::SymbolNotFound {
                            path: path.to_path_buf(),
                            module: dependency.path.clone(),
                            name: item.name.text.clone(),
                            range: item.name.range,
                        });
                    }
                };

                let binding = item.binding();
                table
                    .add_import(ImportedSymbol {
                        name: binding.text.clone(),
                        range: binding.range,
                        source: ImportSource {
                            module: dependency.path.clone(),
                            name: item.name.text.clone(),
                            range: item.name.range,
                        },
                        origin,
                        aliased: item.alias.is_some(),
                    })
                    .map_err(|_| duplicate(&binding.text, binding.range))?;
            }
        }

        for ident in &syntax.identifiers {
            if table.contains(&ident.text) {
                table.record_occurrence(&ident.text, ident.range);
            }
        }

        Ok(table)
    }
}
