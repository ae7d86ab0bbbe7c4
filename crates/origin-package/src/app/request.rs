//! Extracting the selection from the host's invocation payload.

use std::env;
use std::path::PathBuf;

use crate::domain::model::SelectionBatch;

/// Environment variables file-manager script hosts use to pass the selection, one path per line.
pub const SELECTION_ENV_VARS: &[&str] = &[
    "NAUTILUS_SCRIPT_SELECTED_FILE_PATHS",
    "NEMO_SCRIPT_SELECTED_FILE_PATHS",
    "CAJA_SCRIPT_SELECTED_FILE_PATHS",
];

/// Build the selection from command-line paths, falling back to the script-host environment.
///
/// Returns `None` when neither carries any path, meaning the program was not started by a host.
pub fn selection_from_host(args: Vec<PathBuf>) -> Option<SelectionBatch> {
    selection_from(args, |name| env::var(name).ok())
}

fn selection_from<F>(args: Vec<PathBuf>, lookup: F) -> Option<SelectionBatch>
where
    F: Fn(&str) -> Option<String>,
{
    if !args.is_empty() {
        return Some(SelectionBatch::from_paths(args));
    }

    SELECTION_ENV_VARS.iter().find_map(|name| {
        let value = lookup(name)?;
        let paths: Vec<PathBuf> = value
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(PathBuf::from)
            .collect();
        if paths.is_empty() {
            None
        } else {
            tracing::debug!(var = *name, count = paths.len(), "selection from environment");
            Some(SelectionBatch::from_paths(paths))
        }
    })
}
