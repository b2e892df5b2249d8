//! Inspector configuration.

use std::env;
use std::path::{Path, PathBuf};

use smol_str::SmolStr;

use crate::hir::{MODULE_EXTENSION, SourceCompiler};

/// Environment variable pointing at the language installation. Its
/// `packages` subdirectory holds the bundled library modules.
pub const HOME_VAR: &str = "JOLIE_HOME";

/// Where modules are looked up and what they are called.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InspectorConfig {
    /// Directories searched, in order, for absolute package paths
    pub include_paths: Vec<PathBuf>,
    /// Bundled library modules, searched after `include_paths`
    pub packages_dir: Option<PathBuf>,
    /// Module file extension, without the dot
    pub extension: SmolStr,
}

impl Default for InspectorConfig {
    fn default() -> Self {
        Self {
            include_paths: Vec::new(),
            packages_dir: None,
            extension: SmolStr::new_static(MODULE_EXTENSION),
        }
    }
}

impl InspectorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration taken from the environment: the packages directory is
    /// `$JOLIE_HOME/packages` when the variable is set.
    pub fn from_env() -> Self {
        let packages_dir = env::var_os(HOME_VAR).map(|home| Path::new(&home).join("packages"));
        Self {
            packages_dir,
            ..Self::default()
        }
    }

    pub fn with_include_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.include_paths.push(path.into());
        self
    }

    pub fn with_include_paths(mut self, paths: impl IntoIterator<Item = PathBuf>) -> Self {
        self.include_paths.extend(paths);
        self
    }

    pub fn with_packages_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.packages_dir = Some(dir.into());
        self
    }

    pub fn with_extension(mut self, extension: impl Into<SmolStr>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Whether `path` names a module file.
    pub fn is_module_file(&self, path: &Path) -> bool {
        path.extension().is_some_and(|ext| ext == self.extension.as_str())
    }

    /// The module compiler for this configuration.
    pub fn compiler(&self) -> SourceCompiler {
        let compiler = SourceCompiler::new().with_extension(self.extension.clone());
        match &self.packages_dir {
            Some(dir) => compiler.with_packages_dir(dir),
            None => compiler,
        }
    }
}
