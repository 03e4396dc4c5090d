//! Errors reported by the CLI.

use thiserror::Error;

use erd::ErdError;

use crate::config::ConfigError;

/// Everything that can stop a CLI run.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The input is not a datamodel; `src` is kept to point at the problem.
    #[error("Invalid datamodel: {err}")]
    Input { err: serde_json::Error, src: String },

    #[error(transparent)]
    Erd(#[from] ErdError),
}
