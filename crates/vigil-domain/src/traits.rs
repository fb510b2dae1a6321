//! Trait definitions for external interactions
//!
//! The front end is whatever hosts the store: a UI, a test harness, a
//! console. Implementations live in other crates.

use crate::color::{Color, ColorRef};
use std::fmt;

/// Collaborator that receives the watcher's alerts
///
/// Alert callbacks and [`FrontEnd::colors_equal`] are only ever invoked from
/// the watcher thread, never while the store lock is held.
/// [`FrontEnd::reference_color`] is invoked once, on the thread that starts
/// the watcher.
pub trait FrontEnd: Send + Sync {
    /// Supply the color the watcher compares Color entries against
    fn reference_color(&self) -> Result<ColorRef, FrontEndError>;

    /// An integer entry holds a value outside the allowed range
    fn on_alert_integer(&self, value: i32);

    /// A string entry holds something other than the sentinel
    fn on_alert_string(&self, value: &str);

    /// A color entry equals the reference color
    fn on_alert_color(&self, value: &ColorRef);

    /// Equality capability over colors
    fn colors_equal(&self, reference: &Color, candidate: &Color) -> bool {
        reference == candidate
    }
}

/// Error reported by a front end that cannot provide a resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontEndError(String);

impl FrontEndError {
    /// Create a new error with a message
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FrontEndError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Front end error: {}", self.0)
    }
}

impl std::error::Error for FrontEndError {}
