//! Package manager detection and command mapping

use crate::error::ScaffoldError;
use clap::ValueEnum;
use std::fmt;
use std::str::FromStr;

/// Environment variable set by npm, pnpm, yarn and bun when they run a package binary
pub const USER_AGENT_ENV: &str = "npm_config_user_agent";

/// Supported package managers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, ValueEnum)]
pub enum PackageManager {
    #[default]
    Npm,
    Pnpm,
    Yarn,
    Bun,
}

impl PackageManager {
    pub const ALL: [PackageManager; 4] = [
        PackageManager::Npm,
        PackageManager::Pnpm,
        PackageManager::Yarn,
        PackageManager::Bun,
    ];

    /// Executable name
    pub fn binary(&self) -> &'static str {
        match self {
            PackageManager::Npm => "npm",
            PackageManager::Pnpm => "pnpm",
            PackageManager::Yarn => "yarn",
            PackageManager::Bun => "bun",
        }
    }

    /// Command that creates a fresh package manifest
    pub fn init_command(&self) -> String {
        match self {
            PackageManager::Npm => "npm init -y",
            PackageManager::Pnpm => "pnpm init",
            PackageManager::Yarn => "yarn init -y",
            PackageManager::Bun => "bun init -y",
        }
        .to_string()
    }

    /// Command that adds `deps` to the project, in the given order
    pub fn add_command<S: AsRef<str>>(&self, deps: &[S]) -> String {
        let base = match self {
            PackageManager::Npm => "npm install",
            PackageManager::Pnpm => "pnpm add",
            PackageManager::Yarn => "yarn add",
            PackageManager::Bun => "bun add",
        };
        append_args(base, deps)
    }

    /// Command that installs what the manifest already lists
    pub fn install_command(&self) -> String {
        format!("{} install", self.binary())
    }

    /// Command that runs a `package.json` script
    pub fn run_command(&self, script: &str) -> String {
        match self {
            PackageManager::Npm | PackageManager::Bun => {
                format!("{} run {}", self.binary(), script)
            }
            PackageManager::Pnpm | PackageManager::Yarn => format!("{} {}", self.binary(), script),
        }
    }

    /// Parse the package manager out of a user agent like `pnpm/9.1.0 npm/? node/v20.11.0`
    pub fn from_user_agent(user_agent: &str) -> Option<Self> {
        let first = user_agent.split_whitespace().next()?;
        let name = first.split('/').next()?;
        name.parse().ok()
    }

    /// Detect which package manager launched this process, defaulting to npm
    pub fn detect() -> Self {
        std::env::var(USER_AGENT_ENV)
            .ok()
            .and_then(|ua| Self::from_user_agent(&ua))
            .unwrap_or_default()
    }
}

fn append_args<S: AsRef<str>>(base: &str, args: &[S]) -> String {
    let mut command = base.to_string();
    for arg in args {
        command.push(' ');
        command.push_str(arg.as_ref());
    }
    command
}

impl FromStr for PackageManager {
    type Err = ScaffoldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "npm" => Ok(PackageManager::Npm),
            "pnpm" => Ok(PackageManager::Pnpm),
            "yarn" => Ok(PackageManager::Yarn),
            "bun" => Ok(PackageManager::Bun),
            _ => Err(ScaffoldError::UnknownPackageManager(s.to_string())),
        }
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.binary())
    }
}
