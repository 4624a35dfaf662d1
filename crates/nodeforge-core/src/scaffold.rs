//! Project generation workflow
//!
//! `ProjectBuilder` sequences the steps of a scaffold run. Each step is public so
//! a UI can report progress between them; `build` runs them all in order.
//!
//! Directory creation, manifest writing and file writes are fatal on failure.
//! Package-manager init, dependency install and git init only record warnings.
//! A [`Progress`] observer passed to `build_with` sees each step as it runs.

use crate::config::manifest::{generate_manifest, update_manifest, PACKAGE_JSON};
use crate::error::ScaffoldError;
use crate::project::ProjectConfig;
use crate::runtime::{CommandRunner, PackageManager};
use crate::templates::{self, dependencies, generated_files};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;

const GIT_VERSION: &str = "git --version";
const GIT_INSIDE_WORK_TREE: &str = "git rev-parse --is-inside-work-tree";
const GIT_INIT: &str = "git init";

/// Root entry point written by `bun init`; the project's entry is `src/index.ts`
const BUN_INIT_ENTRY: &str = "index.ts";

/// Optional steps of a scaffold run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScaffoldOptions {
    pub install: bool,
    pub git: bool,
}

impl Default for ScaffoldOptions {
    fn default() -> Self {
        Self {
            install: true,
            git: true,
        }
    }
}

/// Result of a step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    Done,
    Skipped(String),
    Failed(String),
}

/// Step of a scaffold run, as reported to a [`Progress`] observer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    CreateDirectory,
    InitPackage,
    WriteFiles,
    InstallDependencies,
    InitGit,
}

/// Summary of a completed run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScaffoldReport {
    /// Paths written, relative to the project directory
    pub files: Vec<String>,
    pub warnings: Vec<String>,
    /// Whether dependencies were installed
    pub installed: bool,
}

/// Observer notified as `ProjectBuilder::build_with` runs
///
/// `started` is only reported for steps that actually run; disabled install
/// and git steps go straight to `finished` with [`StepOutcome::Skipped`].
/// A fatal step reports `finished` with [`StepOutcome::Failed`] before the
/// error is returned.
pub trait Progress {
    fn started(&mut self, _step: Step) -> Result<()> {
        Ok(())
    }

    fn finished(
        &mut self,
        _step: Step,
        _outcome: &StepOutcome,
        _report: &ScaffoldReport,
    ) -> Result<()> {
        Ok(())
    }

    fn warning(&mut self, _message: &str) -> Result<()> {
        Ok(())
    }
}

/// Progress observer that ignores every event
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl Progress for Silent {}

pub struct ProjectBuilder<R> {
    config: ProjectConfig,
    package_manager: PackageManager,
    target_dir: PathBuf,
    options: ScaffoldOptions,
    runner: R,
}

impl<R: CommandRunner> ProjectBuilder<R> {
    pub fn new(
        config: ProjectConfig,
        package_manager: PackageManager,
        target_dir: PathBuf,
        runner: R,
    ) -> Self {
        Self {
            config,
            package_manager,
            target_dir,
            options: ScaffoldOptions::default(),
            runner,
        }
    }

    pub fn with_options(mut self, options: ScaffoldOptions) -> Self {
        self.options = options;
        self
    }

    pub fn config(&self) -> &ProjectConfig {
        &self.config
    }

    pub fn package_manager(&self) -> PackageManager {
        self.package_manager
    }

    pub fn target_dir(&self) -> &Path {
        &self.target_dir
    }

    pub fn options(&self) -> ScaffoldOptions {
        self.options
    }

    /// Create the project directory; an existing non-empty directory is an error
    pub async fn create_directory(&self) -> Result<()> {
        let dir = &self.target_dir;

        if fs::try_exists(dir).await.unwrap_or(false) {
            let mut entries = fs::read_dir(dir)
                .await
                .with_context(|| format!("Failed to read directory: {}", dir.display()))?;
            if entries.next_entry().await?.is_some() {
                return Err(ScaffoldError::DirectoryNotEmpty(dir.clone()).into());
            }
            return Ok(());
        }

        fs::create_dir_all(dir)
            .await
            .with_context(|| format!("Failed to create directory: {}", dir.display()))
    }

    /// Run the package manager's init command
    pub async fn init_package(&self) -> StepOutcome {
        let command = self.package_manager.init_command();
        match self.runner.run(&command, &self.target_dir).await {
            Ok(()) => StepOutcome::Done,
            Err(e) => StepOutcome::Failed(format!("{:#}", e)),
        }
    }

    /// Remove the root entry point `bun init` writes, whether or not init
    /// succeeded. Returns a warning when the file exists but can't be removed.
    pub async fn remove_init_leftovers(&self) -> Option<String> {
        if self.package_manager != PackageManager::Bun {
            return None;
        }

        let leftover = self.target_dir.join(BUN_INIT_ENTRY);
        match fs::remove_file(&leftover).await {
            Ok(()) => None,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => Some(format!("Failed to remove {} ({})", leftover.display(), e)),
        }
    }

    /// Create or update `package.json` with the project's name and scripts.
    /// With `from_scratch`, whatever a failed init left behind is discarded.
    pub async fn write_manifest(&self, from_scratch: bool) -> Result<PathBuf> {
        if from_scratch {
            generate_manifest(&self.target_dir, &self.config).await
        } else {
            update_manifest(&self.target_dir, &self.config).await
        }
    }

    /// Write the entry point and config files
    pub async fn write_files(&self) -> Result<Vec<String>> {
        let files = generated_files(&self.config, self.package_manager);
        templates::write_files(&self.target_dir, &files).await
    }

    /// Command that adds every dependency of the project
    pub fn add_command(&self) -> String {
        self.package_manager.add_command(&dependencies(&self.config))
    }

    /// Add the base and feature dependencies
    pub async fn install_dependencies(&self) -> StepOutcome {
        if !self.options.install {
            return StepOutcome::Skipped("dependency install disabled".to_string());
        }

        match self.runner.run(&self.add_command(), &self.target_dir).await {
            Ok(()) => StepOutcome::Done,
            Err(e) => StepOutcome::Failed(format!("{:#}", e)),
        }
    }

    /// Initialize a git repository unless disabled, unavailable, or already inside one
    pub async fn init_git(&self) -> StepOutcome {
        if !self.options.git {
            return StepOutcome::Skipped("git init disabled".to_string());
        }
        if !self.runner.succeeds(GIT_VERSION, &self.target_dir).await {
            return StepOutcome::Skipped("git is not installed".to_string());
        }
        if self
            .runner
            .succeeds(GIT_INSIDE_WORK_TREE, &self.target_dir)
            .await
        {
            return StepOutcome::Skipped("already inside a git repository".to_string());
        }

        match self.runner.run(GIT_INIT, &self.target_dir).await {
            Ok(()) => StepOutcome::Done,
            Err(e) => StepOutcome::Failed(format!("{:#}", e)),
        }
    }

    /// Run every step in order
    pub async fn build(&self) -> Result<ScaffoldReport> {
        self.build_with(&mut Silent).await
    }

    /// Run every step in order, reporting each one to `progress`
    pub async fn build_with<P: Progress>(&self, progress: &mut P) -> Result<ScaffoldReport> {
        let mut report = ScaffoldReport::default();

        progress.started(Step::CreateDirectory)?;
        let created = self.create_directory().await;
        fatal(progress, Step::CreateDirectory, created, &report)?;
        progress.finished(Step::CreateDirectory, &StepOutcome::Done, &report)?;

        progress.started(Step::InitPackage)?;
        let init = self.init_package().await;
        let init_failed = matches!(init, StepOutcome::Failed(_));
        if let StepOutcome::Failed(reason) = &init {
            warn(progress, &mut report, init_warning(reason))?;
        }
        if let Some(warning) = self.remove_init_leftovers().await {
            warn(progress, &mut report, warning)?;
        }
        progress.finished(Step::InitPackage, &init, &report)?;

        progress.started(Step::WriteFiles)?;
        let written: Result<Vec<String>> = async {
            self.write_manifest(init_failed).await?;
            let mut files = vec![PACKAGE_JSON.to_string()];
            files.extend(self.write_files().await?);
            Ok(files)
        }
        .await;
        report.files = fatal(progress, Step::WriteFiles, written, &report)?;
        progress.finished(Step::WriteFiles, &StepOutcome::Done, &report)?;

        if self.options.install {
            progress.started(Step::InstallDependencies)?;
        }
        let install = self.install_dependencies().await;
        match &install {
            StepOutcome::Done => report.installed = true,
            StepOutcome::Failed(reason) => {
                warn(progress, &mut report, install_warning(reason, &self.add_command()))?
            }
            StepOutcome::Skipped(_) => {}
        }
        progress.finished(Step::InstallDependencies, &install, &report)?;

        if self.options.git {
            progress.started(Step::InitGit)?;
        }
        let git = self.init_git().await;
        if let StepOutcome::Failed(reason) = &git {
            warn(progress, &mut report, git_warning(reason))?;
        }
        progress.finished(Step::InitGit, &git, &report)?;

        Ok(report)
    }
}

/// Report a fatal step's error to `progress` before propagating it
fn fatal<T, P: Progress>(
    progress: &mut P,
    step: Step,
    result: Result<T>,
    report: &ScaffoldReport,
) -> Result<T> {
    if let Err(e) = &result {
        progress.finished(step, &StepOutcome::Failed(format!("{:#}", e)), report)?;
    }
    result
}

fn warn<P: Progress>(
    progress: &mut P,
    report: &mut ScaffoldReport,
    warning: String,
) -> Result<()> {
    progress.warning(&warning)?;
    report.warnings.push(warning);
    Ok(())
}

fn init_warning(reason: &str) -> String {
    format!(
        "Package init failed, generated {} from scratch ({})",
        PACKAGE_JSON, reason
    )
}

fn install_warning(reason: &str, add_command: &str) -> String {
    format!(
        "Dependency install failed ({}). Run `{}` in the project directory to retry",
        reason, add_command
    )
}

fn git_warning(reason: &str) -> String {
    format!("git init failed ({})", reason)
}
