//! Nodeforge CLI - Project scaffolding for TypeScript Node.js apps

use anyhow::Result;
use clap::{Parser, Subcommand};
use nodeforge_core::tui::CreateArgs;
use nodeforge_core::{PackageManager, ProductConfig, ProjectConfig, Server, Tooling};
use std::path::Path;

/// Nodeforge product configuration
#[derive(Clone)]
pub struct NodeforgeConfig;

impl ProductConfig for NodeforgeConfig {
    fn display_name(&self) -> &'static str {
        "nodeforge"
    }

    fn package_manager_env(&self) -> &'static str {
        "NODEFORGE_PACKAGE_MANAGER"
    }

    fn next_steps(
        &self,
        dir: &Path,
        config: &ProjectConfig,
        package_manager: PackageManager,
        installed: bool,
    ) -> Vec<String> {
        let mut steps = Vec::new();
        let current = std::env::current_dir().ok();

        // Step 1: cd to directory if not current
        if current.as_deref() != Some(dir) {
            steps.push(format!("cd {}", dir.display()));
        }

        // Step 2: Install dependencies if that didn't happen
        if !installed {
            steps.push(package_manager.install_command());
        }

        // Step 3: Start the app
        if config.server().is_some() {
            steps.push(package_manager.run_command("dev"));
        } else {
            steps.push(format!(
                "{} && {}",
                package_manager.run_command("build"),
                package_manager.run_command("start")
            ));
        }

        steps
    }
}

#[derive(Parser, Debug)]
#[command(name = "nodeforge")]
#[command(about = "CLI for scaffolding TypeScript Node.js projects")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new project
    Create(CliCreateArgs),
}

#[derive(Parser, Debug)]
pub struct CliCreateArgs {
    /// Project name, normalized to lowercase-hyphenated form (also the directory name)
    pub name: Option<String>,

    /// Web server framework
    #[arg(short, long, value_enum)]
    pub server: Option<Server>,

    /// Tooling to include (comma-separated: lint,test)
    #[arg(short, long, value_enum, value_delimiter = ',')]
    pub tooling: Option<Vec<Tooling>>,

    /// Package manager to use instead of the detected one
    #[arg(short, long = "package-manager", value_enum)]
    pub package_manager: Option<PackageManager>,

    /// Auto-confirm all prompts (non-interactive mode)
    #[arg(short, long)]
    pub yes: bool,

    /// Skip dependency installation
    #[arg(long = "no-install")]
    pub no_install: bool,

    /// Skip git repository initialization
    #[arg(long = "no-git")]
    pub no_git: bool,
}

impl From<CliCreateArgs> for CreateArgs {
    fn from(args: CliCreateArgs) -> Self {
        CreateArgs {
            name: args.name,
            server: args.server,
            tooling: args.tooling,
            package_manager: args.package_manager,
            yes: args.yes,
            no_install: args.no_install,
            no_git: args.no_git,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();
    let config = NodeforgeConfig;

    // No subcommand provided, default to create behavior (interactive mode)
    let create_args = match args.command {
        Some(Command::Create(create_args)) => create_args.into(),
        None => CreateArgs::default(),
    };

    let result = nodeforge_core::run(&config, create_args).await;

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_create_flags() {
        let args = Args::try_parse_from([
            "nodeforge",
            "create",
            "My App",
            "--server",
            "hono",
            "--tooling",
            "lint,test",
            "-p",
            "pnpm",
            "--yes",
            "--no-git",
        ])
        .unwrap();

        let Some(Command::Create(create)) = args.command else {
            panic!("expected create subcommand");
        };
        let create: CreateArgs = create.into();
        assert_eq!(create.name.as_deref(), Some("My App"));
        assert_eq!(create.server, Some(Server::Hono));
        assert_eq!(create.tooling, Some(vec![Tooling::Lint, Tooling::Test]));
        assert_eq!(create.package_manager, Some(PackageManager::Pnpm));
        assert!(create.yes);
        assert!(create.no_git);
        assert!(!create.no_install);
    }

    #[test]
    fn test_rejects_unknown_server() {
        assert!(Args::try_parse_from(["nodeforge", "create", "app", "--server", "koa"]).is_err());
    }

    #[test]
    fn test_next_steps_with_server() {
        let config = ProjectConfig::new("demo", Some(Server::Express), [], true).unwrap();
        let dir = std::env::temp_dir().join("nodeforge-next-steps-demo");
        let steps = NodeforgeConfig.next_steps(&dir, &config, PackageManager::Pnpm, true);

        assert_eq!(
            steps,
            vec![format!("cd {}", dir.display()), "pnpm dev".to_string()]
        );
    }

    #[test]
    fn test_next_steps_without_install_or_server() {
        let config = ProjectConfig::new("demo", None, [], true).unwrap();
        let dir = std::env::temp_dir().join("nodeforge-next-steps-plain");
        let steps = NodeforgeConfig.next_steps(&dir, &config, PackageManager::Npm, false);

        assert_eq!(
            steps[1..],
            [
                "npm install".to_string(),
                "npm run build && npm run start".to_string()
            ]
        );
    }
}
