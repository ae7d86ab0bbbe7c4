//! Errors raised at the service seams.

use std::io;

use thiserror::Error;

/// Failure to read a file's origin-package attribute.
#[derive(Debug, Error)]
pub enum AttributeError {
    #[error("failed to read attribute '{name}': {source}")]
    Read {
        name: String,
        #[source]
        source: io::Error,
    },
    #[error("attribute '{0}' is not valid UTF-8")]
    InvalidValue(String),
}

/// Failure to hand a package over to the desktop.
#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("failed to spawn opener '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("opener '{program}' exited with status {status}")]
    Failed { program: String, status: String },
    #[error("no opener command available on this platform")]
    NoOpener,
}
