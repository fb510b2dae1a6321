//! Vigil Watcher
//!
//! Background change-watcher that polls the store and notifies the front end.
//!
//! # Overview
//!
//! The watcher is responsible for:
//! - **Sweeping**: visiting every entry of the store in table order, once per poll interval
//! - **Integer rule**: alerting on values outside `[-1000, 1000]`
//! - **String rule**: alerting on any value other than the sentinel
//! - **Color rule**: alerting on colors equal to the front end's reference color
//! - **Counter rule**: incrementing the reserved counter entry on every sweep
//!
//! # Concurrency
//!
//! The store, the watcher's state flag and its metrics sit behind one
//! [`Monitor`]. Foreground callers hold the lock for a whole operation; the
//! watcher takes it once per entry and never holds it while calling into the
//! front end.
//!
//! | State | Entered by | Left by |
//! |-------|-----------|---------|
//! | **Unwatched** | construction, failed start | `start` |
//! | **Running** | `start` | `stop` |
//! | **Stopping** | `stop` | thread exit |
//! | **Stopped** | thread exit | never |
//!
//! # Usage
//!
//! ## One-time Sweep
//!
//! ```
//! use std::sync::Arc;
//! use vigil_domain::{Color, ColorRef, FrontEnd, FrontEndError};
//! use vigil_store::Store;
//! use vigil_watcher::{Monitor, Sweeper};
//!
//! struct Silent;
//!
//! impl FrontEnd for Silent {
//!     fn reference_color(&self) -> Result<ColorRef, FrontEndError> {
//!         Ok(Color::parse("white").unwrap().into_ref())
//!     }
//!     fn on_alert_integer(&self, _value: i32) {}
//!     fn on_alert_string(&self, _value: &str) {}
//!     fn on_alert_color(&self, _value: &ColorRef) {}
//! }
//!
//! let monitor = Monitor::new(Store::new());
//! let sweeper = Sweeper::new(Arc::new(Silent), Color::parse("white").unwrap().into_ref());
//!
//! // Nothing is swept until a watcher has claimed the store
//! let outcome = sweeper.sweep(&monitor);
//! assert!(matches!(outcome, vigil_watcher::SweepOutcome::Aborted { visited: 0 }));
//! ```
//!
//! ## Background Watcher
//!
//! See [`StoreWatcher`].
//!
//! # Configuration
//!
//! The watcher can be configured via TOML:
//!
//! ```toml
//! [watcher]
//! poll_interval_ms = 5000
//! thread_name = "vigil-watcher"
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod metrics;
mod monitor;
mod sweeper;
mod worker;

pub use config::WatcherConfig;
pub use error::WatcherError;
pub use metrics::{AlertKind, WatcherMetrics};
pub use monitor::{Monitor, WatchState, WatchedStore};
pub use sweeper::{SweepOutcome, Sweeper};
pub use worker::StoreWatcher;
