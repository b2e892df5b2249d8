//! Project layer: configuration, workspace discovery and package paths.

mod config;
mod paths;
mod workspace_loader;

pub use config::{HOME_VAR, InspectorConfig};
pub use paths::{package_base, package_candidates, package_module};
pub use workspace_loader::{Workspace, WorkspaceError};
