//! Error types for pyramid-rules.

use thiserror::Error;

/// Result type for pyramid-rules operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while validating or repairing a pyramid.
#[derive(Debug, Error)]
pub enum Error {
    /// The pyramid could not be built.
    #[error("topology error: {0}")]
    Topology(#[from] pyramid_topology::Error),

    /// Repair gave up before every rule was satisfied.
    #[error("pyramid still invalid after {rounds} repair rounds")]
    NotConverged { rounds: usize },
}
