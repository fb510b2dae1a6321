//! Vigil store implementation.

use crate::config::VigilConfig;
use crate::error::VigilError;
use std::sync::Arc;
use vigil_domain::{ColorRef, FrontEnd, StoreValue};
use vigil_store::{Store, StoreError};
use vigil_watcher::{Monitor, StoreWatcher, WatcherMetrics};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lifecycle {
    Created,
    Initialized,
    Finalized,
}

/// Typed key-value store with a background watcher
///
/// Every typed operation takes the store lock once and holds it for its
/// whole lookup or find/allocate/assign sequence, so the watcher never sees a
/// half-written entry. Getters and setters take `&self`; share a `Vigil`
/// between threads through an `Arc`.
#[derive(Debug)]
pub struct Vigil {
    monitor: Arc<Monitor>,
    watcher: Option<StoreWatcher>,
    lifecycle: Lifecycle,
    config: VigilConfig,
}

impl Default for Vigil {
    fn default() -> Self {
        Self {
            monitor: Monitor::shared(Store::new()),
            watcher: None,
            lifecycle: Lifecycle::Created,
            config: VigilConfig::default(),
        }
    }
}

impl Vigil {
    /// Create a store with the given configuration
    ///
    /// The watcher is not started until [`Vigil::initialize`].
    pub fn new(config: VigilConfig) -> Result<Self, VigilError> {
        config.validate()?;
        let store = Store::with_capacity(config.store.capacity)?;
        Ok(Self {
            monitor: Monitor::shared(store),
            watcher: None,
            lifecycle: Lifecycle::Created,
            config,
        })
    }

    /// Start the watcher, notifying `front_end`
    ///
    /// # Errors
    ///
    /// [`VigilError::AlreadyInitialized`] on a second call,
    /// [`VigilError::Finalized`] after [`Vigil::finalize`], and
    /// [`VigilError::Watcher`] when the watcher cannot be set up. After a
    /// setup failure the store is still usable and `initialize` may be retried.
    pub fn initialize(&mut self, front_end: Arc<dyn FrontEnd>) -> Result<(), VigilError> {
        match self.lifecycle {
            Lifecycle::Initialized => return Err(VigilError::AlreadyInitialized),
            Lifecycle::Finalized => return Err(VigilError::Finalized),
            Lifecycle::Created => {}
        }

        let watcher = StoreWatcher::start(
            Arc::clone(&self.monitor),
            front_end,
            self.config.watcher.clone(),
        )?;
        self.watcher = Some(watcher);
        self.lifecycle = Lifecycle::Initialized;

        tracing::info!(
            "Store initialized (capacity: {})",
            self.config.store.capacity
        );
        Ok(())
    }

    /// Stop the watcher and release every entry
    ///
    /// Blocks until the watcher thread has exited. Calling it again does
    /// nothing.
    pub fn finalize(&mut self) {
        if self.lifecycle == Lifecycle::Finalized {
            return;
        }

        if let Some(mut watcher) = self.watcher.take() {
            watcher.stop();
        }

        let released = {
            let mut table = self.monitor.lock();
            let count = table.store().len();
            table.store_mut().clear();
            count
        };
        self.lifecycle = Lifecycle::Finalized;

        tracing::info!("Store finalized ({} entries released)", released);
    }

    fn read<T>(&self, op: impl FnOnce(&Store) -> Result<T, StoreError>) -> Result<T, VigilError> {
        let table = self.monitor.lock();
        Ok(op(table.store())?)
    }

    fn write(&self, op: impl FnOnce(&mut Store) -> Result<(), StoreError>) -> Result<(), VigilError> {
        let mut table = self.monitor.lock();
        Ok(op(table.store_mut())?)
    }

    /// Get the integer stored under `key`
    pub fn get_integer(&self, key: &str) -> Result<i32, VigilError> {
        self.read(|store| store.get_integer(key))
    }

    /// Store an integer under `key`
    pub fn set_integer(&self, key: &str, value: i32) -> Result<(), VigilError> {
        self.write(|store| store.set_integer(key, value))
    }

    /// Get the string stored under `key`
    pub fn get_string(&self, key: &str) -> Result<String, VigilError> {
        self.read(|store| store.get_string(key))
    }

    /// Store a string under `key`
    pub fn set_string(&self, key: &str, value: &str) -> Result<(), VigilError> {
        self.write(|store| store.set_string(key, value))
    }

    /// Get the color stored under `key`
    pub fn get_color(&self, key: &str) -> Result<ColorRef, VigilError> {
        self.read(|store| store.get_color(key))
    }

    /// Store a color under `key`
    pub fn set_color(&self, key: &str, color: ColorRef) -> Result<(), VigilError> {
        self.write(|store| store.set_color(key, color))
    }

    /// Get the integer array stored under `key`
    pub fn get_integer_array(&self, key: &str) -> Result<Vec<i32>, VigilError> {
        self.read(|store| store.get_integer_array(key))
    }

    /// Store an integer array under `key`
    pub fn set_integer_array(&self, key: &str, values: Vec<i32>) -> Result<(), VigilError> {
        self.write(|store| store.set_integer_array(key, values))
    }

    /// Get the color array stored under `key`
    pub fn get_color_array(&self, key: &str) -> Result<Vec<ColorRef>, VigilError> {
        self.read(|store| store.get_color_array(key))
    }

    /// Store a color array under `key`
    pub fn set_color_array(&self, key: &str, colors: Vec<ColorRef>) -> Result<(), VigilError> {
        self.write(|store| store.set_color_array(key, colors))
    }

    /// Snapshot of every entry in table order
    pub fn entries(&self) -> Vec<(String, StoreValue)> {
        let table = self.monitor.lock();
        table
            .store()
            .iter()
            .filter_map(|entry| {
                entry
                    .value()
                    .map(|value| (entry.key().to_string(), value.clone()))
            })
            .collect()
    }

    /// Current number of entries
    pub fn len(&self) -> usize {
        self.monitor.lock().store().len()
    }

    /// Whether the store is empty
    pub fn is_empty(&self) -> bool {
        self.monitor.lock().store().is_empty()
    }

    /// Maximum number of entries
    pub fn capacity(&self) -> usize {
        self.monitor.lock().store().capacity()
    }

    /// Snapshot of the watcher metrics
    pub fn metrics(&self) -> WatcherMetrics {
        self.monitor.lock().metrics().clone()
    }

    /// Clear the watcher metrics, returning the values they held
    pub fn reset_metrics(&self) -> WatcherMetrics {
        let mut table = self.monitor.lock();
        let previous = table.metrics().clone();
        table.reset_metrics();
        previous
    }

    /// Whether the watcher is running
    pub fn is_watching(&self) -> bool {
        self.watcher.as_ref().is_some_and(StoreWatcher::is_running)
    }

    /// The configuration this store was created with
    pub fn config(&self) -> &VigilConfig {
        &self.config
    }

    /// The lock shared with the watcher
    pub fn monitor(&self) -> &Arc<Monitor> {
        &self.monitor
    }
}

impl Drop for Vigil {
    fn drop(&mut self) {
        self.finalize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vigil_domain::{Color, FrontEndError};

    struct Quiet;

    impl FrontEnd for Quiet {
        fn reference_color(&self) -> Result<ColorRef, FrontEndError> {
            Ok(Color::parse("white").unwrap().into_ref())
        }
        fn on_alert_integer(&self, _value: i32) {}
        fn on_alert_string(&self, _value: &str) {}
        fn on_alert_color(&self, _value: &ColorRef) {}
    }

    struct Broken;

    impl FrontEnd for Broken {
        fn reference_color(&self) -> Result<ColorRef, FrontEndError> {
            Err(FrontEndError::new("no reference"))
        }
        fn on_alert_integer(&self, _value: i32) {}
        fn on_alert_string(&self, _value: &str) {}
        fn on_alert_color(&self, _value: &ColorRef) {}
    }

    #[test]
    fn test_lifecycle() {
        let mut vigil = Vigil::default();
        assert!(!vigil.is_watching());

        vigil.initialize(Arc::new(Quiet)).unwrap();
        assert!(vigil.is_watching());
        assert!(matches!(
            vigil.initialize(Arc::new(Quiet)),
            Err(VigilError::AlreadyInitialized)
        ));

        vigil.finalize();
        assert!(!vigil.is_watching());
        assert!(matches!(vigil.initialize(Arc::new(Quiet)), Err(VigilError::Finalized)));
        vigil.finalize();
    }

    #[test]
    fn test_failed_initialize_can_be_retried() {
        let mut vigil = Vigil::default();
        let err = vigil.initialize(Arc::new(Broken)).unwrap_err();
        assert!(matches!(err, VigilError::Watcher(_)));
        assert!(!vigil.is_watching());

        vigil.set_integer("still", 1).unwrap();
        vigil.initialize(Arc::new(Quiet)).unwrap();
        assert!(vigil.is_watching());
    }

    #[test]
    fn test_finalize_releases_entries() {
        let mut vigil = Vigil::default();
        let red = Color::parse("red").unwrap().into_ref();
        vigil.set_color("c", red.clone()).unwrap();
        vigil.set_integer("i", 3).unwrap();
        assert_eq!(Arc::strong_count(&red), 2);

        vigil.finalize();
        assert!(vigil.is_empty());
        assert_eq!(Arc::strong_count(&red), 1);
    }

    #[test]
    fn test_entries_snapshot() {
        let vigil = Vigil::default();
        vigil.set_integer("a", 1).unwrap();
        vigil.set_string("b", "two").unwrap();

        let entries = vigil.entries();
        assert_eq!(
            entries,
            vec![
                ("a".to_string(), StoreValue::Integer(1)),
                ("b".to_string(), StoreValue::String("two".into())),
            ]
        );
    }

    #[test]
    fn test_reset_metrics_returns_previous_counts() {
        let config = VigilConfig {
            watcher: vigil_watcher::WatcherConfig::default()
                .with_poll_interval(std::time::Duration::from_millis(1)),
            ..Default::default()
        };
        let mut vigil = Vigil::new(config).unwrap();
        vigil.initialize(Arc::new(Quiet)).unwrap();

        let deadline = std::time::Instant::now() + std::time::Duration::from_secs(10);
        while vigil.metrics().sweep_count == 0 {
            assert!(std::time::Instant::now() < deadline, "watcher did not sweep in time");
            std::thread::sleep(std::time::Duration::from_millis(1));
        }
        vigil.finalize();

        let previous = vigil.reset_metrics();
        assert!(previous.sweep_count >= 1);
        assert_eq!(vigil.metrics(), WatcherMetrics::default());
    }

    #[test]
    fn test_new_respects_capacity() {
        let mut config = VigilConfig::default();
        config.store.capacity = 2;
        let vigil = Vigil::new(config).unwrap();
        assert_eq!(vigil.capacity(), 2);

        vigil.set_integer("a", 1).unwrap();
        vigil.set_integer("b", 2).unwrap();
        let err = vigil.set_integer("c", 3).unwrap_err();
        assert_eq!(err.as_store_error(), Some(&StoreError::StoreFull { capacity: 2 }));
    }
}
