//! Configuration for the watcher
//!
//! Defines the poll interval and the name of the background thread.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use vigil_domain::reserved::POLL_INTERVAL;

use crate::WatcherError;

/// Configuration for the store watcher
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use vigil_watcher::WatcherConfig;
///
/// let config = WatcherConfig::default();
/// assert_eq!(config.poll_interval(), Duration::from_secs(5));
///
/// let config = WatcherConfig::default().with_poll_interval(Duration::from_millis(50));
/// assert_eq!(config.poll_interval_ms, 50);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatcherConfig {
    /// Pause between two sweeps (in milliseconds)
    /// Default: 5000
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Name given to the background thread
    /// Default: "vigil-watcher"
    #[serde(default = "default_thread_name")]
    pub thread_name: String,
}

fn default_poll_interval_ms() -> u64 {
    POLL_INTERVAL.as_millis() as u64
}

fn default_thread_name() -> String {
    "vigil-watcher".to_string()
}

impl Default for WatcherConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_poll_interval_ms(),
            thread_name: default_thread_name(),
        }
    }
}

impl WatcherConfig {
    /// Replace the poll interval
    ///
    /// Intervals are kept in whole milliseconds. A non-zero interval shorter
    /// than that becomes 1 ms rather than 0.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        let millis = match interval.as_millis() {
            0 if !interval.is_zero() => 1,
            millis => millis,
        };
        self.poll_interval_ms = u64::try_from(millis).unwrap_or(u64::MAX);
        self
    }

    /// Get poll interval as Duration
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Check the configuration before a watcher is started
    pub fn validate(&self) -> Result<(), WatcherError> {
        if self.poll_interval_ms == 0 {
            return Err(WatcherError::Config(
                "poll_interval_ms must be greater than zero".to_string(),
            ));
        }
        if self.thread_name.trim().is_empty() {
            return Err(WatcherError::Config("thread_name must not be empty".to_string()));
        }
        Ok(())
    }
}
