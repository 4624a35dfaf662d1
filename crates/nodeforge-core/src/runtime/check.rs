//! Detection of the external tools a scaffold run shells out to

use super::package_manager::PackageManager;
use super::shell::platform_shell;
use anyhow::Result;
use std::process::Stdio;

/// Tool detection result
#[derive(Debug, Clone)]
pub struct RuntimeInfo {
    pub name: &'static str,
    pub version: Option<String>,
    pub available: bool,
}

/// Check whether `binary --version` runs successfully through the platform shell
pub fn check_tool(binary: &str, name: &'static str) -> RuntimeInfo {
    check_command(&format!("{} --version", binary), name)
}

fn check_command(command: &str, name: &'static str) -> RuntimeInfo {
    let output = platform_shell(command)
        .stdin(Stdio::null())
        .stderr(Stdio::null())
        .output();

    match output {
        Ok(out) if out.status.success() => {
            let stdout = String::from_utf8_lossy(&out.stdout);
            let version = stdout
                .lines()
                .map(str::trim)
                .find(|line| !line.is_empty())
                .unwrap_or_default()
                .to_string();
            RuntimeInfo {
                name,
                version: Some(version),
                available: true,
            }
        }
        _ => RuntimeInfo {
            name,
            version: None,
            available: false,
        },
    }
}

/// Check if the given package manager is available
pub fn check_package_manager(package_manager: PackageManager) -> RuntimeInfo {
    check_tool(package_manager.binary(), package_manager.binary())
}

/// Check if git is available
pub fn check_git() -> RuntimeInfo {
    check_tool("git", "git")
}

/// Check the tools a run needs. A missing package manager fails unless it is
/// advisory (dependency install skipped); git is always advisory.
pub fn check_tools(
    package_manager: PackageManager,
    package_manager_advisory: bool,
) -> Result<Vec<RuntimeInfo>> {
    let pm = check_package_manager(package_manager);
    let git = check_git();
    evaluate(pm, git, package_manager_advisory)
}

fn evaluate(
    pm: RuntimeInfo,
    git: RuntimeInfo,
    package_manager_advisory: bool,
) -> Result<Vec<RuntimeInfo>> {
    if !pm.available && !package_manager_advisory {
        anyhow::bail!(
            "Missing required tools:\n  - {} (install it or choose another with --package-manager)",
            pm.name
        );
    }

    Ok(vec![pm, git])
}
