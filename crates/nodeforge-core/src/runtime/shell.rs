//! Running external commands (package manager, git) through the platform shell

use crate::error::ScaffoldError;
use anyhow::{Context, Result};
use colored::Colorize;
use std::future::Future;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command as TokioCommand;
use tokio::time::timeout;

/// Timeout for a single command (dependency installs can be slow)
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(600);

/// Executes shell command strings on behalf of the scaffolder
pub trait CommandRunner {
    /// Run `command` in `cwd`, failing on a non-zero exit status
    fn run(&self, command: &str, cwd: &Path) -> impl Future<Output = Result<()>> + Send;

    /// Run `command` silently and report whether it succeeded
    fn succeeds(&self, command: &str, cwd: &Path) -> impl Future<Output = bool> + Send;
}

/// Runs commands via `sh -c` (`cmd /C` on Windows), streaming their output
#[derive(Debug, Clone)]
pub struct ShellRunner {
    timeout: Duration,
}

impl Default for ShellRunner {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ShellRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self { timeout }
    }
}

/// `sh -c <command>` (`cmd /C` on Windows), so `.cmd` shims like `npm.cmd` resolve
pub(crate) fn platform_shell(command: &str) -> std::process::Command {
    let mut cmd = if cfg!(windows) {
        let mut cmd = std::process::Command::new("cmd");
        cmd.arg("/C");
        cmd
    } else {
        let mut cmd = std::process::Command::new("sh");
        cmd.arg("-c");
        cmd
    };
    cmd.arg(command);
    cmd
}

fn shell(command: &str) -> TokioCommand {
    TokioCommand::from(platform_shell(command))
}

fn failed(command: &str, reason: impl ToString) -> ScaffoldError {
    ScaffoldError::CommandFailed {
        command: command.to_string(),
        reason: reason.to_string(),
    }
}

impl CommandRunner for ShellRunner {
    async fn run(&self, command: &str, cwd: &Path) -> Result<()> {
        println!("{} {}", "Running:".dimmed(), command.yellow());

        let mut child = shell(command)
            .current_dir(cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| failed(command, e))?;

        let stdout = child.stdout.take().context("Failed to capture stdout")?;
        let stderr = child.stderr.take().context("Failed to capture stderr")?;

        let mut stdout_reader = BufReader::new(stdout).lines();
        let mut stderr_reader = BufReader::new(stderr).lines();

        let output_task = async {
            let mut stdout_done = false;
            let mut stderr_done = false;

            while !(stdout_done && stderr_done) {
                tokio::select! {
                    line = stdout_reader.next_line(), if !stdout_done => {
                        match line {
                            Ok(Some(line)) => println!("  {}", line.dimmed()),
                            Ok(None) => stdout_done = true,
                            Err(e) => {
                                eprintln!("{} {}", "Error reading stdout:".red(), e);
                                stdout_done = true;
                            }
                        }
                    }
                    line = stderr_reader.next_line(), if !stderr_done => {
                        match line {
                            Ok(Some(line)) => eprintln!("  {}", line.yellow()),
                            Ok(None) => stderr_done = true,
                            Err(e) => {
                                eprintln!("{} {}", "Error reading stderr:".red(), e);
                                stderr_done = true;
                            }
                        }
                    }
                }
            }

            child.wait().await
        };

        // On timeout the child is dropped, and kill_on_drop terminates it
        match timeout(self.timeout, output_task).await {
            Ok(Ok(status)) if status.success() => Ok(()),
            Ok(Ok(status)) => {
                let reason = match status.code() {
                    Some(code) => format!("exit code {}", code),
                    None => "terminated by signal".to_string(),
                };
                Err(failed(command, reason).into())
            }
            Ok(Err(e)) => Err(failed(command, e).into()),
            Err(_) => Err(ScaffoldError::CommandTimedOut {
                command: command.to_string(),
                seconds: self.timeout.as_secs(),
            }
            .into()),
        }
    }

    async fn succeeds(&self, command: &str, cwd: &Path) -> bool {
        let status = shell(command)
            .current_dir(cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .status();

        matches!(timeout(self.timeout, status).await, Ok(Ok(s)) if s.success())
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_run_succeeds_in_cwd() {
        let temp = tempfile::tempdir().unwrap();
        let runner = ShellRunner::new();

        runner.run("echo hi > marker.txt", temp.path()).await.unwrap();

        let contents = std::fs::read_to_string(temp.path().join("marker.txt")).unwrap();
        assert_eq!(contents.trim(), "hi");
    }

    #[tokio::test]
    async fn test_run_reports_exit_code() {
        let temp = tempfile::tempdir().unwrap();
        let err = ShellRunner::new()
            .run("exit 3", temp.path())
            .await
            .unwrap_err();

        match err.downcast_ref::<ScaffoldError>() {
            Some(ScaffoldError::CommandFailed { command, reason }) => {
                assert_eq!(command, "exit 3");
                assert_eq!(reason, "exit code 3");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_run_times_out() {
        let temp = tempfile::tempdir().unwrap();
        let runner = ShellRunner::with_timeout(Duration::from_millis(200));

        let err = runner.run("sleep 5", temp.path()).await.unwrap_err();

        assert!(matches!(
            err.downcast_ref::<ScaffoldError>(),
            Some(ScaffoldError::CommandTimedOut { .. })
        ));
    }

    #[tokio::test]
    async fn test_succeeds() {
        let temp = tempfile::tempdir().unwrap();
        let runner = ShellRunner::new();

        assert!(runner.succeeds("true", temp.path()).await);
        assert!(!runner.succeeds("false", temp.path()).await);
    }
}
