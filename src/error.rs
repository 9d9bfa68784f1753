//! Errors raised while staging artifacts.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failure during a collect run.
///
/// Every variant is fatal: the walk stops at the first one.
#[derive(Error, Debug)]
pub enum StageError {
    /// Reading `source` or writing `dest` failed.
    #[error("failed to copy {} to {}: {err}", source.display(), dest.display())]
    Copy {
        source: PathBuf,
        dest: PathBuf,
        #[source]
        err: io::Error,
    },

    /// Writing a progress record failed.
    #[error("failed to write progress output: {0}")]
    Output(#[from] io::Error),
}
