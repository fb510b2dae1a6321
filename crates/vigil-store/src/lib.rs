//! Vigil Storage Layer
//!
//! A fixed-capacity table of key to typed-value entries.
//!
//! # Architecture
//!
//! - Entries live in a vector bounded by a capacity chosen at construction
//!   (at most [`STORE_MAX_CAPACITY`](vigil_domain::reserved::STORE_MAX_CAPACITY))
//! - Lookup is a linear scan in insertion order
//! - Writing an existing key replaces the value in place; the table never reorders
//!
//! # Thread Safety
//!
//! The store has no locking of its own. Callers share it through the
//! watcher's monitor and hold that lock for every operation.
//!
//! # Examples
//!
//! ```
//! use vigil_store::{Store, StoreError};
//!
//! let mut store = Store::with_capacity(2).unwrap();
//! store.set_integer("answer", 42).unwrap();
//! store.set_integer_array("primes", vec![2, 3, 5]).unwrap();
//!
//! assert_eq!(store.get_integer("answer").unwrap(), 42);
//! assert!(matches!(store.get_string("answer"), Err(StoreError::TypeMismatch { .. })));
//! assert!(matches!(store.set_integer("third", 3), Err(StoreError::StoreFull { .. })));
//! ```

#![warn(missing_docs)]

mod entry;
mod error;
mod store;

pub use entry::Entry;
pub use error::StoreError;
pub use store::Store;
