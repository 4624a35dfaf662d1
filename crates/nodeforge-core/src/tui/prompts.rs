//! Charm-style CLI prompts using cliclack

use crate::product::{resolve_package_manager, ProductConfig};
use crate::project::{validate_project_name, ProjectConfig, DEFAULT_PROJECT_NAME};
use crate::runtime::{check, PackageManager, ShellRunner};
use crate::scaffold::{
    Progress, ProjectBuilder, ScaffoldOptions, ScaffoldReport, Step, StepOutcome,
};
use crate::templates::{Server, Tooling};
use anyhow::Result;
use std::path::{Path, PathBuf};

/// CLI arguments for the create command
#[derive(Debug, Clone, Default)]
pub struct CreateArgs {
    /// Project name (also the directory name)
    pub name: Option<String>,

    /// Web server framework
    pub server: Option<Server>,

    /// Tooling bundles to include
    pub tooling: Option<Vec<Tooling>>,

    /// Package manager to use instead of the detected one
    pub package_manager: Option<PackageManager>,

    /// Auto-confirm all prompts (non-interactive mode)
    pub yes: bool,

    /// Skip dependency installation
    pub no_install: bool,

    /// Skip git repository initialization
    pub no_git: bool,
}

/// Run the CLI with interactive prompts
pub async fn run<C: ProductConfig>(config: &C, args: CreateArgs) -> Result<()> {
    cliclack::intro(config.display_name())?;

    // Step 1: Resolve package manager
    let package_manager = resolve_package_manager(config, args.package_manager)?;
    cliclack::log::info(format!("Package manager: {}", package_manager))?;

    // Step 2: Resolve project configuration
    let project = resolve_project(&args)?;
    let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let project_dir = current_dir.join(project.name());

    // Step 3: Check tools
    let options = ScaffoldOptions {
        install: !args.no_install,
        git: !args.no_git,
    };
    check_tools(package_manager, &options)?;

    // Step 4: Confirm
    if !project.skip_prompts() {
        confirm_summary(&project, package_manager, &project_dir)?;
    }

    // Step 5: Create project
    let builder = ProjectBuilder::new(project, package_manager, project_dir, ShellRunner::new())
        .with_options(options);
    let mut progress = StepLog::new(package_manager, builder.target_dir());
    let report = builder.build_with(&mut progress).await?;

    // Step 6: Show next steps
    print_next_steps(
        config,
        builder.target_dir(),
        builder.config(),
        package_manager,
        &report,
    )?;

    Ok(())
}

fn resolve_project(args: &CreateArgs) -> Result<ProjectConfig> {
    let skip = args.yes;

    let raw_name = match &args.name {
        Some(name) => name.clone(),
        None if skip => DEFAULT_PROJECT_NAME.to_string(),
        None => cliclack::input("Project name")
            .placeholder(DEFAULT_PROJECT_NAME)
            .default_input(DEFAULT_PROJECT_NAME)
            .validate(|input: &String| validate_project_name(input).map(|_| ()))
            .interact()?,
    };

    let server = match args.server {
        Some(server) => Some(server),
        None if skip => None,
        None => select_server()?,
    };

    let tooling = match &args.tooling {
        Some(tooling) => tooling.clone(),
        None if skip => Vec::new(),
        None => select_tooling()?,
    };

    let project = ProjectConfig::new(&raw_name, server, tooling, skip)?;

    if project.name() != raw_name {
        cliclack::log::info(format!("Project name: {}", project.name()))?;
    }

    Ok(project)
}

fn select_server() -> Result<Option<Server>> {
    let mut select = cliclack::select("Select a web server framework")
        .item(None, "None", "Plain TypeScript entry point");
    for server in Server::ALL {
        let descriptor = server.descriptor();
        select = select.item(Some(server), descriptor.label, descriptor.description);
    }

    Ok(select.interact()?)
}

fn select_tooling() -> Result<Vec<Tooling>> {
    let mut multi = cliclack::multiselect("Select tooling (optional)");
    for tooling in Tooling::ALL {
        let descriptor = tooling.descriptor();
        multi = multi.item(tooling, descriptor.label, descriptor.description);
    }

    Ok(multi.required(false).interact()?)
}

fn check_tools(package_manager: PackageManager, options: &ScaffoldOptions) -> Result<()> {
    let spinner = cliclack::spinner();
    spinner.start("Checking tools...");

    match check::check_tools(package_manager, !options.install) {
        Ok(tools) => {
            let tool_info: Vec<String> = tools
                .iter()
                .map(|t| {
                    if t.available {
                        format!("{} ({})", t.name, t.version.as_deref().unwrap_or("unknown"))
                    } else {
                        format!("{} (not installed)", t.name)
                    }
                })
                .collect();
            spinner.stop(format!("Detected tools: {}", tool_info.join(", ")));
            Ok(())
        }
        Err(e) => {
            spinner.stop("Missing tools");
            cliclack::log::error(format!("{}", e))?;
            anyhow::bail!("Please install the missing tools and try again.");
        }
    }
}

fn confirm_summary(
    project: &ProjectConfig,
    package_manager: PackageManager,
    project_dir: &Path,
) -> Result<()> {
    let server = project
        .server()
        .map(|s| s.to_string())
        .unwrap_or_else(|| "None".to_string());
    let tooling: Vec<String> = project.tooling().map(|t| t.to_string()).collect();
    let tooling = if tooling.is_empty() {
        "None".to_string()
    } else {
        tooling.join(", ")
    };

    cliclack::note(
        "Summary",
        format!(
            "Directory: {}\nServer: {}\nTooling: {}\nPackage manager: {}",
            project_dir.display(),
            server,
            tooling,
            package_manager
        ),
    )?;

    let confirm: bool = cliclack::confirm("Create project?")
        .initial_value(true)
        .interact()?;
    if !confirm {
        anyhow::bail!("Setup cancelled.");
    }

    Ok(())
}

/// Logs each scaffold step as it runs
struct StepLog {
    package_manager: PackageManager,
    target_dir: PathBuf,
    spinner: Option<cliclack::ProgressBar>,
}

impl StepLog {
    fn new(package_manager: PackageManager, target_dir: &Path) -> Self {
        Self {
            package_manager,
            target_dir: target_dir.to_path_buf(),
            spinner: None,
        }
    }
}

impl Progress for StepLog {
    fn started(&mut self, step: Step) -> Result<()> {
        match step {
            Step::InitPackage => {
                cliclack::log::step(format!("Initializing package with {}", self.package_manager))?
            }
            Step::WriteFiles => {
                let spinner = cliclack::spinner();
                spinner.start("Writing files...");
                self.spinner = Some(spinner);
            }
            Step::InstallDependencies => cliclack::log::step("Installing dependencies")?,
            Step::CreateDirectory | Step::InitGit => {}
        }
        Ok(())
    }

    fn finished(
        &mut self,
        step: Step,
        outcome: &StepOutcome,
        report: &ScaffoldReport,
    ) -> Result<()> {
        match (step, outcome) {
            (Step::WriteFiles, StepOutcome::Failed(_)) => {
                if let Some(spinner) = self.spinner.take() {
                    spinner.stop("Failed to write files");
                }
            }
            (Step::WriteFiles, _) => {
                if let Some(spinner) = self.spinner.take() {
                    spinner.stop(format!(
                        "Created {} files in {}",
                        report.files.len(),
                        self.target_dir.display()
                    ));
                }
            }
            (Step::InstallDependencies, StepOutcome::Done) => {
                cliclack::log::success("Dependencies installed")?
            }
            (Step::InstallDependencies, StepOutcome::Skipped(reason)) => {
                cliclack::log::info(format!("Skipping dependency install ({})", reason))?
            }
            (Step::InitGit, StepOutcome::Done) => {
                cliclack::log::success("Initialized git repository")?
            }
            (Step::InitGit, StepOutcome::Skipped(reason)) => {
                cliclack::log::info(format!("Skipping git init ({})", reason))?
            }
            _ => {}
        }
        Ok(())
    }

    fn warning(&mut self, message: &str) -> Result<()> {
        cliclack::log::warning(message)?;
        Ok(())
    }
}

fn print_next_steps<C: ProductConfig>(
    config: &C,
    project_dir: &Path,
    project: &ProjectConfig,
    package_manager: PackageManager,
    report: &ScaffoldReport,
) -> Result<()> {
    let steps = config.next_steps(project_dir, project, package_manager, report.installed);

    println!();
    println!("  Next steps");
    println!();

    for (i, step) in steps.iter().enumerate() {
        println!("  {}.  {}", i + 1, step);
    }

    if report.warnings.is_empty() {
        cliclack::outro("Happy coding!")?;
    } else {
        cliclack::outro(format!(
            "Done with {} warning(s), see above",
            report.warnings.len()
        ))?;
    }

    Ok(())
}
