//! Error types for pyramid-vis.

use thiserror::Error;

/// Result type for pyramid-vis operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while driving the pyramid.
#[derive(Debug, Error)]
pub enum Error {
    /// Bad configuration value
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Rule engine error
    #[error(transparent)]
    Rules(#[from] pyramid_rules::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Terminal IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
