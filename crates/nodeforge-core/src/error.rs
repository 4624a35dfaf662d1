//! Typed errors for the scaffolding core

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by configuration resolution and project generation
#[derive(Debug, Error)]
pub enum ScaffoldError {
    #[error("invalid project name '{name}': {reason}")]
    InvalidName { name: String, reason: &'static str },

    #[error("unknown package manager '{0}' (expected one of: npm, pnpm, yarn, bun)")]
    UnknownPackageManager(String),

    #[error("directory {} already exists and is not empty", .0.display())]
    DirectoryNotEmpty(PathBuf),

    #[error("`{command}` failed: {reason}")]
    CommandFailed { command: String, reason: String },

    #[error("`{command}` timed out after {seconds} seconds")]
    CommandTimedOut { command: String, seconds: u64 },

    #[error("failed to parse {path}: {source}", path = .path.display())]
    InvalidManifest {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
