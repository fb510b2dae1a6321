//! Vigil Rust SDK
//!
//! A small typed key-value store watched by a background thread that raises
//! alerts through a [`FrontEnd`](vigil_domain::FrontEnd).
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use vigil_domain::{Color, ColorRef, FrontEnd, FrontEndError};
//! use vigil_sdk::{Vigil, VigilConfig};
//!
//! struct Console;
//!
//! impl FrontEnd for Console {
//!     fn reference_color(&self) -> Result<ColorRef, FrontEndError> {
//!         Ok(Color::parse("white").unwrap().into_ref())
//!     }
//!     fn on_alert_integer(&self, value: i32) { println!("{} is not an allowed integer", value); }
//!     fn on_alert_string(&self, value: &str) { println!("{} is not an allowed string", value); }
//!     fn on_alert_color(&self, value: &ColorRef) { println!("{} is not an allowed color", value); }
//! }
//!
//! let mut vigil = Vigil::new(VigilConfig::default()).expect("Invalid configuration");
//! vigil.initialize(Arc::new(Console)).expect("Failed to start watcher");
//!
//! vigil.set_integer("watcherCounter", 0).expect("Failed to set counter");
//! vigil.set_integer("pressure", 1500).expect("Failed to set pressure");
//!
//! vigil.finalize();
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod vigil;

pub use config::{StoreConfig, VigilConfig};
pub use error::VigilError;
pub use vigil::Vigil;
