//! Error types for the commit-bench CLI

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// CLI-specific error types
#[derive(Error, Debug)]
pub enum Error {
    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),

    #[error("Failed to write file: {path}")]
    FileWrite {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid command: {0}")]
    InvalidCommand(String),
}
