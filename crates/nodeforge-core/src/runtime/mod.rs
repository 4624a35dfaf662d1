//! External tool integration
//!
//! This module provides:
//! - Package manager detection and command mapping (npm, pnpm, yarn, bun)
//! - Tool availability checks
//! - Shell command execution behind the `CommandRunner` seam

pub mod check;
pub mod package_manager;
pub mod shell;

pub use check::{check_git, check_package_manager, check_tools, RuntimeInfo};
pub use package_manager::PackageManager;
pub use shell::{CommandRunner, ShellRunner};
