use std::process::ExitCode;

use clap::Parser;

fn main() -> anyhow::Result<ExitCode> {
    origin_package::init();

    let cli = origin_package::cli::Cli::parse();
    origin_package::cli::run(cli)
}
