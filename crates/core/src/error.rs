//! Error types for commit-bench-core

use thiserror::Error;

/// Result type alias for commit-bench-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while loading history or bringing a dashboard up.
///
/// Once a [`crate::Dashboard`] is initialized, state mutations never fail;
/// only the chart collaborator can still report an error from a redraw.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to read file: {path}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Benchmark history contains no commits")]
    EmptyHistory,

    #[error("Required UI element is missing: {0}")]
    MissingElement(String),

    #[error("Invalid zoom window {left}..{right} for {commit_count} commits")]
    InvalidWindow {
        left: usize,
        right: usize,
        commit_count: usize,
    },

    #[error("Invalid browse URL: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("Chart rendering failed: {0}")]
    RenderError(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("Invalid configuration: {0}")]
    ConfigError(String),
}
