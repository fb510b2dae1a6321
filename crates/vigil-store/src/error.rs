//! Error types for store operations

use thiserror::Error;
use vigil_domain::StoreType;

/// Errors that can occur during storage operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// No entry exists for the key
    #[error("Key does not exist: {0}")]
    NotFound(String),

    /// The entry exists but holds a different type
    #[error("Invalid type for key '{key}': expected {expected}, found {actual}")]
    TypeMismatch {
        /// Key that was looked up
        key: String,
        /// Type the caller asked for
        expected: StoreType,
        /// Type the entry holds
        actual: StoreType,
    },

    /// Every slot is taken by another key
    #[error("Store is full (capacity {capacity})")]
    StoreFull {
        /// Capacity of the store
        capacity: usize,
    },

    /// Keys must not be empty
    #[error("Key must not be empty")]
    EmptyKey,

    /// Requested capacity is zero or above the maximum
    #[error("Invalid capacity {requested}: must be between 1 and {max}")]
    InvalidCapacity {
        /// Capacity that was requested
        requested: usize,
        /// Largest capacity allowed
        max: usize,
    },
}
