//! Nodeforge Core - Shared library for scaffolding TypeScript Node.js projects
//!
//! Given a project name and a few feature choices (web server framework,
//! lint/format tooling, test framework), this library creates the project
//! directory, writes the generated source and config files, installs
//! dependencies through the detected package manager, and initializes git.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Core Operations** - Name normalization, the feature registry,
//!   script composition, and package-manager command mapping
//! - **Layer 2: Workflow Orchestration** - `ProductConfig` trait and `ProjectBuilder`
//!   for custom UIs
//! - **Layer 3: CLI/TUI Interface** - Optional cliclack-based prompts (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based TUI prompts module
//!
//! # Example Usage (without TUI)
//!
//! ```no_run
//! use nodeforge_core::{PackageManager, ProjectBuilder, ProjectConfig, Server, ShellRunner};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = ProjectConfig::new("My API", Some(Server::Hono), [], true)?;
//! let dir = std::env::current_dir()?.join(config.name());
//! let report = ProjectBuilder::new(config, PackageManager::detect(), dir, ShellRunner::new())
//!     .build()
//!     .await?;
//! for warning in &report.warnings {
//!     eprintln!("{}", warning);
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod product;
pub mod project;
pub mod runtime;
pub mod scaffold;
pub mod templates;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use error::ScaffoldError;
pub use product::ProductConfig;
pub use project::{normalize_project_name, ProjectConfig};
pub use runtime::{CommandRunner, PackageManager, ShellRunner};
pub use scaffold::{
    Progress, ProjectBuilder, ScaffoldOptions, ScaffoldReport, Silent, Step, StepOutcome,
};
pub use templates::{FeatureDescriptor, Server, Tooling};

#[cfg(feature = "tui")]
pub use tui::run;
