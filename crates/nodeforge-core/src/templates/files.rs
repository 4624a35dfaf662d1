//! Generated file set and writing it to the project directory

use super::{entry_point, sources, Tooling};
use crate::config::manifest::compose_scripts;
use crate::project::ProjectConfig;
use crate::runtime::PackageManager;
use anyhow::{Context, Result};
use std::borrow::Cow;
use std::path::Path;
use tokio::fs;

/// A file to write, relative to the project root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub path: &'static str,
    pub contents: Cow<'static, str>,
}

impl GeneratedFile {
    fn fixed(path: &'static str, contents: &'static str) -> Self {
        Self {
            path,
            contents: Cow::Borrowed(contents),
        }
    }
}

/// All source and config files for a project (the package manifest is handled separately)
pub fn generated_files(
    config: &ProjectConfig,
    package_manager: PackageManager,
) -> Vec<GeneratedFile> {
    let mut files = vec![
        GeneratedFile::fixed("src/index.ts", entry_point(config.server())),
        GeneratedFile::fixed("tsconfig.json", sources::TSCONFIG),
        GeneratedFile::fixed(".gitignore", sources::GITIGNORE),
        GeneratedFile {
            path: "README.md",
            contents: Cow::Owned(readme(config, package_manager)),
        },
    ];

    for tooling in config.tooling() {
        match tooling {
            Tooling::Lint => {
                files.push(GeneratedFile::fixed("eslint.config.js", sources::ESLINT_CONFIG));
                files.push(GeneratedFile::fixed(".prettierrc", sources::PRETTIERRC));
            }
            Tooling::Test => {
                files.push(GeneratedFile::fixed("vitest.config.ts", sources::VITEST_CONFIG));
                files.push(GeneratedFile::fixed("test/example.test.ts", sources::EXAMPLE_TEST));
            }
        }
    }

    files
}

fn readme(config: &ProjectConfig, package_manager: PackageManager) -> String {
    let mut out = format!("# {}\n\n## Getting started\n\n```sh\n", config.name());
    out.push_str(&package_manager.install_command());
    out.push('\n');
    if config.server().is_some() {
        out.push_str(&package_manager.run_command("dev"));
        out.push('\n');
    } else {
        out.push_str(&package_manager.run_command("build"));
        out.push('\n');
        out.push_str(&package_manager.run_command("start"));
        out.push('\n');
    }
    out.push_str("```\n\n## Scripts\n\n");

    for (name, command) in compose_scripts(config) {
        out.push_str(&format!(
            "- `{}` runs `{}`\n",
            package_manager.run_command(name),
            command
        ));
    }

    out
}

/// Write files under `target_dir`, creating parent directories as needed.
/// Existing files at the same paths are overwritten.
pub async fn write_files(target_dir: &Path, files: &[GeneratedFile]) -> Result<Vec<String>> {
    fs::create_dir_all(target_dir)
        .await
        .context("Failed to create target directory")?;

    let mut written = Vec::with_capacity(files.len());

    for file in files {
        let target_path = target_dir.join(file.path);
        if let Some(parent) = target_path.parent() {
            fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        fs::write(&target_path, file.contents.as_bytes())
            .await
            .with_context(|| format!("Failed to write file: {}", target_path.display()))?;

        written.push(file.path.to_string());
    }

    Ok(written)
}
