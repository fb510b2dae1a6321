//! Vigil CLI library.
//!
//! This library provides the core functionality for the Vigil command-line interface,
//! including configuration management, the console front end, REPL command execution,
//! and output formatting.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod front_end;
pub mod output;
pub mod repl;

pub use cli::{Cli, Command};
pub use config::Config;
pub use error::{CliError, Result};
pub use front_end::ConsoleFrontEnd;
pub use output::Formatter;
