//! Error types for the CLI application.

use thiserror::Error;
use vigil_sdk::VigilError;
use vigil_store::StoreError;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Store or watcher error
    #[error("{}", describe(.0))]
    Vigil(#[from] VigilError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Line editor error
    #[error("Line editor error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),

    /// A value could not be parsed for the requested type
    #[error("Incorrect value")]
    IncorrectValue(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// User-facing text for a store or watcher error
fn describe(err: &VigilError) -> String {
    match err.as_store_error() {
        Some(StoreError::NotFound(_)) => "Key does not exist in store".to_string(),
        Some(StoreError::TypeMismatch { .. }) => "Incorrect type".to_string(),
        Some(StoreError::StoreFull { .. }) => "Store is full".to_string(),
        Some(StoreError::EmptyKey) => "Incorrect value".to_string(),
        Some(other) => other.to_string(),
        None => err.to_string(),
    }
}
