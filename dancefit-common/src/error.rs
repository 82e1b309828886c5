//! Common error types for dancefit

use thiserror::Error;

/// Common result type for dancefit operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across the dancefit crates
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Dataset file could not be parsed as CSV
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Requested resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid input, or a pipeline stage invoked on data it cannot accept
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
