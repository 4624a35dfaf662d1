//! Product configuration trait for CLI binaries
//!
//! The binary implements this trait to supply its identity, environment
//! overrides and post-setup instructions to the shared scaffolding flow.

use crate::project::ProjectConfig;
use crate::runtime::PackageManager;
use std::path::Path;

/// Configuration trait for the CLI product
pub trait ProductConfig: Clone + Send + Sync + 'static {
    /// Human-readable display name
    fn display_name(&self) -> &'static str;

    /// Environment variable that overrides package manager detection
    fn package_manager_env(&self) -> &'static str;

    /// Generate the "next steps" instructions after project creation
    fn next_steps(
        &self,
        dir: &Path,
        config: &ProjectConfig,
        package_manager: PackageManager,
        installed: bool,
    ) -> Vec<String>;
}

/// Resolve the package manager: explicit choice, then the product's env
/// override, then the invoking package manager's user agent, then npm
pub fn resolve_package_manager<C: ProductConfig>(
    config: &C,
    explicit: Option<PackageManager>,
) -> Result<PackageManager, crate::error::ScaffoldError> {
    if let Some(pm) = explicit {
        return Ok(pm);
    }
    match std::env::var(config.package_manager_env()) {
        Ok(value) if !value.trim().is_empty() => value.parse(),
        _ => Ok(PackageManager::detect()),
    }
}
