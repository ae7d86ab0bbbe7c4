//! Hands package files over to the desktop for opening.

use std::path::Path;
use std::process::{Command, Stdio};

use crate::domain::errors::LaunchError;
use crate::infra::config::Config;

/// Successful results of an open request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchOutcome {
    Launched,
    /// The handler for the package was already active and took the request.
    AlreadyRunning,
}

/// Requests the host environment to act on a file, as if it was double-clicked.
pub trait Launcher {
    fn launch(&mut self, path: &Path) -> Result<LaunchOutcome, LaunchError>;
}

/// Launcher backed by an opener executable.
///
/// A configured command is used as-is; otherwise the platform openers are tried in turn.
#[derive(Debug, Clone, Default)]
pub struct SystemLauncher {
    command: Vec<String>,
}

impl SystemLauncher {
    pub fn new(command: Vec<String>) -> Self {
        Self { command }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.launcher.command.clone())
    }
}

impl Launcher for SystemLauncher {
    fn launch(&mut self, path: &Path) -> Result<LaunchOutcome, LaunchError> {
        if !self.command.is_empty() {
            let command: Vec<&str> = self.command.iter().map(String::as_str).collect();
            return run_opener(&command, path);
        }

        let mut last_error = LaunchError::NoOpener;
        for command in fallback_commands() {
            match run_opener(command, path) {
                Ok(outcome) => return Ok(outcome),
                Err(err) => {
                    tracing::debug!(error = %err, "opener failed, trying next");
                    last_error = err;
                }
            }
        }
        Err(last_error)
    }
}

fn run_opener(command: &[&str], path: &Path) -> Result<LaunchOutcome, LaunchError> {
    let (program, args) = command.split_first().ok_or(LaunchError::NoOpener)?;

    let status = Command::new(program)
        .args(args)
        .arg(path)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .status()
        .map_err(|source| LaunchError::Spawn {
            program: (*program).to_owned(),
            source,
        })?;

    if status.success() {
        Ok(LaunchOutcome::Launched)
    } else {
        Err(LaunchError::Failed {
            program: (*program).to_owned(),
            status: status.to_string(),
        })
    }
}

#[cfg(any(target_os = "haiku", target_os = "macos"))]
fn fallback_commands() -> &'static [&'static [&'static str]] {
    &[&["open"]]
}

#[cfg(all(unix, not(any(target_os = "haiku", target_os = "macos"))))]
fn fallback_commands() -> &'static [&'static [&'static str]] {
    &[&["xdg-open"], &["gio", "open"]]
}

#[cfg(target_os = "windows")]
fn fallback_commands() -> &'static [&'static [&'static str]] {
    &[&["cmd", "/C", "start", ""]]
}

#[cfg(not(any(unix, target_os = "windows")))]
fn fallback_commands() -> &'static [&'static [&'static str]] {
    &[]
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    use std::fs;

    #[test]
    fn configured_command_receives_path() -> anyhow::Result<()> {
        let temp = tempfile::tempdir()?;
        let package = temp.path().join("foo.hpkg");
        fs::write(&package, b"hpkg")?;
        let log = temp.path().join("opened.log");

        let script = format!("echo \"$0\" >> '{}'", log.display());
        let mut launcher = SystemLauncher::new(vec!["sh".into(), "-c".into(), script]);

        assert_eq!(launcher.launch(&package)?, LaunchOutcome::Launched);
        let logged = fs::read_to_string(&log)?;
        assert_eq!(logged.trim(), package.display().to_string());
        Ok(())
    }

    #[test]
    fn failing_command_reports_status() {
        let mut launcher = SystemLauncher::new(vec!["false".into()]);
        let err = launcher
            .launch(Path::new("/tmp/foo.hpkg"))
            .expect_err("false exits with failure");
        assert!(matches!(err, LaunchError::Failed { .. }));
    }

    #[test]
    fn missing_program_is_a_spawn_error() {
        let mut launcher = SystemLauncher::new(vec!["origin-package-no-such-opener".into()]);
        let err = launcher
            .launch(Path::new("/tmp/foo.hpkg"))
            .expect_err("program does not exist");
        assert!(matches!(err, LaunchError::Spawn { .. }));
    }
}
