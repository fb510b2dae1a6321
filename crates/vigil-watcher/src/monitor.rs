//! The single lock shared by foreground callers and the watcher thread

use parking_lot::{Condvar, Mutex, MutexGuard};
use std::sync::Arc;
use std::time::{Duration, Instant};
use vigil_store::Store;

use crate::{WatcherError, WatcherMetrics};

/// Lifecycle of the watcher bound to a monitor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchState {
    /// No watcher has been started
    Unwatched,
    /// The watcher thread is sweeping
    Running,
    /// Stop was requested; the thread exits at its next lock acquisition
    Stopping,
    /// The watcher thread has exited. Terminal.
    Stopped,
}

/// Everything the lock protects: the entry table, the watcher state flag
/// and the watcher metrics
#[derive(Debug)]
pub struct WatchedStore {
    store: Store,
    state: WatchState,
    metrics: WatcherMetrics,
}

impl WatchedStore {
    /// Get the store
    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Get mutable access to the store
    pub fn store_mut(&mut self) -> &mut Store {
        &mut self.store
    }

    /// Get the watcher state
    pub fn state(&self) -> WatchState {
        self.state
    }

    /// Get the watcher metrics
    pub fn metrics(&self) -> &WatcherMetrics {
        &self.metrics
    }

    /// Reset the watcher metrics
    pub fn reset_metrics(&mut self) {
        self.metrics.reset();
    }

    pub(crate) fn parts_mut(&mut self) -> (&mut Store, &mut WatcherMetrics) {
        (&mut self.store, &mut self.metrics)
    }

    pub(crate) fn metrics_mut(&mut self) -> &mut WatcherMetrics {
        &mut self.metrics
    }
}

/// Exclusive-access guard wrapping the store
///
/// Foreground operations take the lock for their whole find/allocate/assign
/// sequence; the watcher takes it once per entry. The condition variable only
/// shortens the watcher's pause between sweeps when a stop is requested.
#[derive(Debug)]
pub struct Monitor {
    table: Mutex<WatchedStore>,
    wakeup: Condvar,
}

impl Monitor {
    /// Wrap a store
    pub fn new(store: Store) -> Self {
        Self {
            table: Mutex::new(WatchedStore {
                store,
                state: WatchState::Unwatched,
                metrics: WatcherMetrics::new(),
            }),
            wakeup: Condvar::new(),
        }
    }

    /// Wrap a store for sharing with a watcher
    pub fn shared(store: Store) -> Arc<Self> {
        Arc::new(Self::new(store))
    }

    /// Acquire the lock
    pub fn lock(&self) -> MutexGuard<'_, WatchedStore> {
        self.table.lock()
    }

    /// Current watcher state
    pub fn state(&self) -> WatchState {
        self.table.lock().state
    }

    /// Move from `Unwatched` to `Running`
    pub(crate) fn claim(&self) -> Result<(), WatcherError> {
        let mut table = self.table.lock();
        match table.state {
            WatchState::Unwatched => {
                table.state = WatchState::Running;
                Ok(())
            }
            WatchState::Running | WatchState::Stopping => Err(WatcherError::SetupFailure(
                "store is already being watched".to_string(),
            )),
            WatchState::Stopped => Err(WatcherError::SetupFailure(
                "store watcher was stopped and cannot be restarted".to_string(),
            )),
        }
    }

    /// Undo [`Monitor::claim`] after a failed start
    pub(crate) fn release_claim(&self) {
        let mut table = self.table.lock();
        if table.state == WatchState::Running {
            table.state = WatchState::Unwatched;
        }
    }

    /// Ask a running watcher to stop and wake it if it is pausing
    pub(crate) fn request_stop(&self) {
        let mut table = self.table.lock();
        if table.state == WatchState::Running {
            table.state = WatchState::Stopping;
        }
        self.wakeup.notify_all();
    }

    /// Record that the watcher thread has exited
    pub(crate) fn mark_stopped(&self) {
        self.table.lock().state = WatchState::Stopped;
    }

    /// Pause for `interval` unless a stop is requested first
    ///
    /// Returns whether the watcher is still running afterwards.
    pub(crate) fn pause(&self, interval: Duration) -> bool {
        let deadline = Instant::now() + interval;
        let mut table = self.table.lock();
        while table.state == WatchState::Running {
            if self.wakeup.wait_until(&mut table, deadline).timed_out() {
                break;
            }
        }
        table.state == WatchState::Running
    }
}
