//! Background thread running the sweeper on a schedule

use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use vigil_domain::FrontEnd;

use crate::monitor::{Monitor, WatchState};
use crate::sweeper::{SweepOutcome, Sweeper};
use crate::{WatcherConfig, WatcherError};

/// Watcher bound to one store for its entire life
///
/// Started once with [`StoreWatcher::start`], stopped once with
/// [`StoreWatcher::stop`]. A stopped watcher cannot be restarted, and the
/// store it watched cannot be given to another watcher.
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
/// use vigil_domain::{Color, ColorRef, FrontEnd, FrontEndError};
/// use vigil_store::Store;
/// use vigil_watcher::{Monitor, StoreWatcher, WatcherConfig};
///
/// struct Console;
///
/// impl FrontEnd for Console {
///     fn reference_color(&self) -> Result<ColorRef, FrontEndError> {
///         Ok(Color::parse("white").unwrap().into_ref())
///     }
///     fn on_alert_integer(&self, value: i32) { println!("{} is not allowed", value); }
///     fn on_alert_string(&self, value: &str) { println!("{} is not allowed", value); }
///     fn on_alert_color(&self, value: &ColorRef) { println!("{} is not allowed", value); }
/// }
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let monitor = Monitor::shared(Store::new());
/// let mut watcher = StoreWatcher::start(monitor.clone(), Arc::new(Console), WatcherConfig::default())?;
///
/// monitor.lock().store_mut().set_integer("temperature", 1500)?;
///
/// watcher.stop();
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct StoreWatcher {
    monitor: Arc<Monitor>,
    handle: Option<JoinHandle<()>>,
    config: WatcherConfig,
}

impl StoreWatcher {
    /// Capture the front end's resources and spawn the watcher thread
    ///
    /// The reference color is obtained here, on the caller's thread, before
    /// the background thread exists.
    ///
    /// # Errors
    ///
    /// Returns [`WatcherError::Config`] for an invalid configuration and
    /// [`WatcherError::SetupFailure`] when the reference color cannot be
    /// obtained, the store is or was already watched, or the thread cannot be
    /// spawned. On error nothing is left running and nothing captured is held.
    pub fn start(
        monitor: Arc<Monitor>,
        front_end: Arc<dyn FrontEnd>,
        config: WatcherConfig,
    ) -> Result<Self, WatcherError> {
        config.validate()?;

        let reference = front_end.reference_color().map_err(|e| {
            WatcherError::SetupFailure(format!("reference color unavailable: {}", e))
        })?;

        monitor.claim()?;

        let sweeper = Sweeper::new(front_end, reference);
        let interval = config.poll_interval();
        let thread_monitor = Arc::clone(&monitor);

        let spawned = thread::Builder::new()
            .name(config.thread_name.clone())
            .spawn(move || run(thread_monitor, sweeper, interval));

        match spawned {
            Ok(handle) => {
                tracing::info!(
                    "Store watcher started (interval: {:?}, thread: {})",
                    interval,
                    config.thread_name
                );
                Ok(Self {
                    monitor,
                    handle: Some(handle),
                    config,
                })
            }
            Err(e) => {
                monitor.release_claim();
                tracing::warn!("Store watcher thread could not be spawned: {}", e);
                Err(WatcherError::SetupFailure(format!(
                    "failed to spawn watcher thread: {}",
                    e
                )))
            }
        }
    }

    /// Stop the watcher and wait for its thread to exit
    ///
    /// The thread finishes any in-flight rule or callback before it observes
    /// the request. Once this returns, the front end and the reference color
    /// captured by [`StoreWatcher::start`] have been released. Calling it
    /// again does nothing.
    pub fn stop(&mut self) {
        let Some(handle) = self.handle.take() else {
            return;
        };

        self.monitor.request_stop();
        if handle.join().is_err() {
            tracing::error!("Store watcher thread panicked");
        }
        self.monitor.mark_stopped();

        let metrics = self.monitor.lock().metrics().clone();
        tracing::info!("Store watcher stopped. Final metrics:\n{}", metrics.summary());
    }

    /// Whether the watcher thread is running
    pub fn is_running(&self) -> bool {
        self.handle.is_some() && self.monitor.state() == WatchState::Running
    }

    /// The monitor this watcher is bound to
    pub fn monitor(&self) -> &Arc<Monitor> {
        &self.monitor
    }

    /// The configuration the watcher was started with
    pub fn config(&self) -> &WatcherConfig {
        &self.config
    }
}

impl Drop for StoreWatcher {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Body of the watcher thread: pause, sweep, repeat until stopped
fn run(monitor: Arc<Monitor>, sweeper: Sweeper, interval: Duration) {
    tracing::debug!("Watcher thread running");

    while monitor.pause(interval) {
        match sweeper.sweep(&monitor) {
            SweepOutcome::Completed { visited } => {
                tracing::debug!("Sweep completed: {} entries visited", visited);
            }
            SweepOutcome::Aborted { visited } => {
                tracing::debug!("Sweep aborted after {} entries: stop requested", visited);
            }
        }
    }

    tracing::debug!("Watcher thread exiting");
}
