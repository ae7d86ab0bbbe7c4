use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Script directories of the file managers that pass the selection through the environment.
const SCRIPT_DIRS: &[&str] = &["nautilus/scripts", "nemo/scripts", "caja/scripts"];
const SCRIPT_NAME: &str = "Open Origin Package";

#[derive(Parser)]
#[command(author, version, about = "Project automation commands", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run cargo nextest with default configuration
    Nextest {
        #[arg(long)]
        profile: Option<String>,
        #[arg(long)]
        release: bool,
        /// Build without the native dialog front-end
        #[arg(long)]
        headless: bool,
    },
    /// Register the add-on as a context-menu script for installed file managers
    InstallScripts {
        /// Path of the installed origin-package binary
        #[arg(long, default_value = "origin-package")]
        bin: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Nextest {
            profile,
            release,
            headless,
        } => run_nextest(profile, release, headless)?,
        Commands::InstallScripts { bin } => install_scripts(&bin)?,
    }
    Ok(())
}

fn run_nextest(profile: Option<String>, release: bool, headless: bool) -> Result<()> {
    let mut cmd = Command::new("cargo");
    cmd.arg("nextest").arg("run");
    if let Some(profile) = profile {
        cmd.arg("--profile").arg(profile);
    }
    if release {
        cmd.arg("--release");
    }
    if headless {
        cmd.arg("--no-default-features");
    }
    let status = cmd.status()?;
    if !status.success() {
        anyhow::bail!("cargo nextest run failed");
    }
    Ok(())
}

fn install_scripts(bin: &Path) -> Result<()> {
    let data_dir = dirs_next::data_dir().context("no user data directory")?;
    let script = format!("#!/bin/sh\nexec '{}' \"$@\"\n", bin.display());

    for dir in SCRIPT_DIRS {
        let target_dir = data_dir.join(dir);
        if !target_dir.parent().is_some_and(Path::exists) {
            continue;
        }
        fs::create_dir_all(&target_dir)
            .with_context(|| format!("failed to create {}", target_dir.display()))?;
        let target = target_dir.join(SCRIPT_NAME);
        fs::write(&target, &script)
            .with_context(|| format!("failed to write {}", target.display()))?;
        make_executable(&target)?;
        println!("installed {}", target.display());
    }
    Ok(())
}

#[cfg(unix)]
fn make_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, fs::Permissions::from_mode(0o755))
        .with_context(|| format!("failed to mark {} executable", path.display()))
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> Result<()> {
    Ok(())
}
