//! Error types for the Vigil SDK.

use thiserror::Error;
use vigil_store::StoreError;
use vigil_watcher::WatcherError;

/// SDK operation errors
#[derive(Debug, Error)]
pub enum VigilError {
    /// A typed get or set failed
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The watcher could not be started
    #[error(transparent)]
    Watcher(#[from] WatcherError),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error while reading configuration
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// initialize() was already called
    #[error("Store is already initialized")]
    AlreadyInitialized,

    /// finalize() was called; the watcher cannot be started again
    #[error("Store has been finalized")]
    Finalized,
}

impl VigilError {
    /// The store error behind this error, if any
    pub fn as_store_error(&self) -> Option<&StoreError> {
        match self {
            VigilError::Store(e) => Some(e),
            _ => None,
        }
    }
}
