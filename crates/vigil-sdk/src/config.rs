//! Configuration for a Vigil store

use crate::VigilError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use vigil_domain::reserved::STORE_MAX_CAPACITY;
use vigil_watcher::WatcherConfig;

/// Store and watcher configuration
///
/// # Examples
///
/// ```
/// use vigil_sdk::VigilConfig;
///
/// let config = VigilConfig::from_toml_str(r#"
/// [store]
/// capacity = 8
///
/// [watcher]
/// poll_interval_ms = 1000
/// "#).unwrap();
///
/// assert_eq!(config.store.capacity, 8);
/// assert_eq!(config.watcher.poll_interval_ms, 1000);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VigilConfig {
    /// Store settings
    #[serde(default)]
    pub store: StoreConfig,

    /// Watcher settings
    #[serde(default)]
    pub watcher: WatcherConfig,
}

/// Store settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Maximum number of entries
    /// Default: 16 (the maximum)
    #[serde(default = "default_capacity")]
    pub capacity: usize,
}

fn default_capacity() -> usize {
    STORE_MAX_CAPACITY
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
        }
    }
}

impl VigilConfig {
    /// Parse configuration from TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self, VigilError> {
        let config: VigilConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, VigilError> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Check the configuration
    pub fn validate(&self) -> Result<(), VigilError> {
        if self.store.capacity == 0 || self.store.capacity > STORE_MAX_CAPACITY {
            return Err(VigilError::Config(format!(
                "store.capacity must be between 1 and {}, got {}",
                STORE_MAX_CAPACITY, self.store.capacity
            )));
        }
        self.watcher.validate()?;
        Ok(())
    }
}
