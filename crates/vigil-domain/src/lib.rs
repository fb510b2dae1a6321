//! Vigil Domain Layer
//!
//! This crate contains the value model shared by the store, the watcher and
//! every front end. It has ZERO external dependencies and defines the typed
//! values an entry can hold, the reserved identifiers both the store and the
//! watcher agree on, and the trait a front end implements to receive alerts.
//!
//! ## Key Concepts
//!
//! - **Entry value**: a tagged union over Integer, String, Color, IntegerArray
//!   and ColorArray; the tag and the payload can never disagree
//! - **Color**: a comparable ARGB value, held through a reference-counted
//!   [`ColorRef`] so releasing a hold is dropping it
//! - **Front end**: the collaborator that supplies the reference color, the
//!   color-equality capability and the three alert callbacks
//! - **Reserved identifiers**: the counter key, the string sentinel, the
//!   integer threshold and the poll interval

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod color;
pub mod reserved;
pub mod traits;
pub mod value;

// Re-exports for convenience
pub use color::{Color, ColorParseError, ColorRef};
pub use traits::{FrontEnd, FrontEndError};
pub use value::{StoreType, StoreValue};
