//! Command-line entry point used by file-manager hosts.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use crate::app::opener::{OpenerOptions, OriginPackageOpener, SelectionHandler};
use crate::app::request::selection_from_host;
use crate::infra::attributes::XattrStore;
use crate::infra::config::Config;
use crate::infra::launcher::SystemLauncher;
use crate::infra::locations::ConfiguredLocations;
use crate::ui::dialog::presenter_for;

/// Printed when started without a selection from a file manager.
pub const STANDALONE_MESSAGE: &str =
    "'Open Origin Package' can only be used as a file manager add-on.";

#[derive(Debug, Parser)]
#[command(
    name = "origin-package",
    version,
    about = "Open the packages the selected files were installed from"
)]
pub struct Cli {
    /// Selected files, as passed by the file manager.
    pub files: Vec<PathBuf>,

    /// Configuration file layered over the user configuration.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// Handle one invocation from the host.
pub fn run(cli: Cli) -> Result<ExitCode> {
    let Some(selection) = selection_from_host(cli.files) else {
        eprintln!("{STANDALONE_MESSAGE}");
        return Ok(ExitCode::FAILURE);
    };

    let config = Config::load(cli.config.as_deref())?;
    let mut opener = OriginPackageOpener::new(
        XattrStore::new(config.defaults.attribute()),
        ConfiguredLocations::from_config(&config),
        SystemLauncher::from_config(&config),
        presenter_for(config.ui.presenter()),
        OpenerOptions::from_config(&config),
    );
    opener.handle(&selection);
    Ok(ExitCode::SUCCESS)
}
