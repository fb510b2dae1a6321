//! Error types for watcher operations

use thiserror::Error;

/// Errors that can occur while starting a watcher
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WatcherError {
    /// Resources could not be captured or the thread could not be spawned.
    /// The watcher has been rolled back to its unstarted state.
    #[error("Watcher setup failed: {0}")]
    SetupFailure(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
