//! Integration tests for vigil-watcher
//!
//! These tests run the real background thread against a recording front end.

use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::mpsc::{self, Sender};
use std::thread;
use std::time::{Duration, Instant};
use vigil_domain::reserved::{STORE_MAX_CAPACITY, STRING_ALERT_SENTINEL, WATCHER_COUNTER_KEY};
use vigil_domain::{Color, ColorRef, FrontEnd, FrontEndError};
use vigil_store::{Store, StoreError};
use vigil_watcher::{AlertKind, Monitor, StoreWatcher, WatchState, WatcherConfig, WatcherMetrics};

#[derive(Debug, Clone, PartialEq)]
enum Alert {
    Integer(i32),
    String(String),
    Color(String),
}

struct Recorder {
    reference: &'static str,
    alerts: Mutex<Vec<Alert>>,
    callback_threads: Mutex<Vec<Option<String>>>,
}

impl Recorder {
    fn new(reference: &'static str) -> Arc<Self> {
        Arc::new(Self {
            reference,
            alerts: Mutex::new(Vec::new()),
            callback_threads: Mutex::new(Vec::new()),
        })
    }

    fn record(&self, alert: Alert) {
        self.callback_threads
            .lock()
            .push(thread::current().name().map(str::to_string));
        self.alerts.lock().push(alert);
    }

    fn alerts(&self) -> Vec<Alert> {
        self.alerts.lock().clone()
    }
}

impl FrontEnd for Recorder {
    fn reference_color(&self) -> Result<ColorRef, FrontEndError> {
        Color::parse(self.reference)
            .map(Color::into_ref)
            .map_err(|e| FrontEndError::new(e.to_string()))
    }

    fn on_alert_integer(&self, value: i32) {
        self.record(Alert::Integer(value));
    }

    fn on_alert_string(&self, value: &str) {
        self.record(Alert::String(value.to_string()));
    }

    fn on_alert_color(&self, value: &ColorRef) {
        self.record(Alert::Color(value.to_string()));
    }
}

fn fast_config() -> WatcherConfig {
    WatcherConfig::default().with_poll_interval(Duration::from_millis(2))
}

fn wait_for_sweeps(monitor: &Monitor, sweeps: usize) -> WatcherMetrics {
    let deadline = Instant::now() + Duration::from_secs(10);
    loop {
        let metrics = monitor.lock().metrics().clone();
        if metrics.sweep_count >= sweeps {
            return metrics;
        }
        assert!(Instant::now() < deadline, "watcher did not sweep in time");
        thread::sleep(Duration::from_millis(1));
    }
}

#[test]
fn test_counter_advances_once_per_sweep() {
    let monitor = Monitor::shared(Store::new());
    monitor
        .lock()
        .store_mut()
        .set_integer(WATCHER_COUNTER_KEY, 41)
        .unwrap();

    let recorder = Recorder::new("white");
    let mut watcher = StoreWatcher::start(monitor.clone(), recorder.clone(), fast_config()).unwrap();
    wait_for_sweeps(&monitor, 1);
    watcher.stop();

    let table = monitor.lock();
    let increments = table.metrics().counter_increments as i32;
    assert!(increments >= 1);
    assert_eq!(
        table.store().get_integer(WATCHER_COUNTER_KEY).unwrap(),
        41 + increments
    );
    assert!(recorder.alerts().is_empty(), "counter never alerts");
}

#[test]
fn test_out_of_range_integer_alerts() {
    let monitor = Monitor::shared(Store::new());
    monitor.lock().store_mut().set_integer("pressure", 1500).unwrap();

    let recorder = Recorder::new("white");
    let mut watcher = StoreWatcher::start(monitor.clone(), recorder.clone(), fast_config()).unwrap();
    wait_for_sweeps(&monitor, 1);
    watcher.stop();

    let alerts = recorder.alerts();
    assert!(!alerts.is_empty());
    assert!(alerts.iter().all(|a| *a == Alert::Integer(1500)));
    assert_eq!(
        monitor.lock().metrics().alerts_of(AlertKind::Integer),
        alerts.len()
    );
}

#[test]
fn test_in_range_integer_is_quiet() {
    let monitor = Monitor::shared(Store::new());
    monitor.lock().store_mut().set_integer("pressure", 500).unwrap();

    let recorder = Recorder::new("white");
    let mut watcher = StoreWatcher::start(monitor.clone(), recorder.clone(), fast_config()).unwrap();
    wait_for_sweeps(&monitor, 2);
    watcher.stop();

    assert!(recorder.alerts().is_empty());
}

#[test]
fn test_string_sentinel_is_quiet() {
    let monitor = Monitor::shared(Store::new());
    {
        let mut table = monitor.lock();
        table.store_mut().set_string("allowed", STRING_ALERT_SENTINEL).unwrap();
        table.store_mut().set_string("other", "banana").unwrap();
    }

    let recorder = Recorder::new("white");
    let mut watcher = StoreWatcher::start(monitor.clone(), recorder.clone(), fast_config()).unwrap();
    wait_for_sweeps(&monitor, 1);
    watcher.stop();

    let alerts = recorder.alerts();
    assert!(!alerts.is_empty());
    assert!(alerts.iter().all(|a| *a == Alert::String("banana".into())));
}

#[test]
fn test_color_equal_to_reference_alerts() {
    let monitor = Monitor::shared(Store::new());
    {
        let mut table = monitor.lock();
        let store = table.store_mut();
        store.set_color("match", Color::parse("#FF0000").unwrap().into_ref()).unwrap();
        store.set_color("other", Color::parse("blue").unwrap().into_ref()).unwrap();
    }

    let recorder = Recorder::new("red");
    let mut watcher = StoreWatcher::start(monitor.clone(), recorder.clone(), fast_config()).unwrap();
    wait_for_sweeps(&monitor, 1);
    watcher.stop();

    let alerts = recorder.alerts();
    assert!(!alerts.is_empty());
    assert!(alerts.iter().all(|a| *a == Alert::Color("#FF0000".into())));
}

#[test]
fn test_callbacks_run_on_watcher_thread() {
    let monitor = Monitor::shared(Store::new());
    monitor.lock().store_mut().set_string("s", "plum").unwrap();

    let recorder = Recorder::new("white");
    let config = fast_config();
    let thread_name = config.thread_name.clone();
    let mut watcher = StoreWatcher::start(monitor.clone(), recorder.clone(), config).unwrap();
    wait_for_sweeps(&monitor, 1);
    watcher.stop();

    let threads = recorder.callback_threads.lock().clone();
    assert!(!threads.is_empty());
    assert!(threads.iter().all(|name| name.as_deref() == Some(thread_name.as_str())));
}

#[test]
fn test_entries_added_while_running_are_swept() {
    let monitor = Monitor::shared(Store::new());
    let recorder = Recorder::new("white");
    let mut watcher = StoreWatcher::start(monitor.clone(), recorder.clone(), fast_config()).unwrap();

    let before = wait_for_sweeps(&monitor, 1).sweep_count;
    monitor.lock().store_mut().set_integer("late", -2000).unwrap();
    wait_for_sweeps(&monitor, before + 2);
    watcher.stop();

    assert!(recorder.alerts().contains(&Alert::Integer(-2000)));
}

#[test]
fn test_stop_then_start_is_refused() {
    let monitor = Monitor::shared(Store::new());
    let mut watcher =
        StoreWatcher::start(monitor.clone(), Recorder::new("white"), fast_config()).unwrap();
    watcher.stop();
    watcher.stop();

    assert_eq!(monitor.state(), WatchState::Stopped);
    assert!(StoreWatcher::start(monitor, Recorder::new("white"), fast_config()).is_err());
}

#[test]
fn test_unknown_reference_color_is_setup_failure() {
    let monitor = Monitor::shared(Store::new());
    let result = StoreWatcher::start(monitor.clone(), Recorder::new("not-a-color"), fast_config());
    assert!(result.is_err());
    assert_eq!(monitor.state(), WatchState::Unwatched);
}

#[test]
fn test_concurrent_foreground_writers() {
    const WRITERS: usize = 7;
    const ROUNDS: i32 = 200;

    let monitor = Monitor::shared(Store::new());
    monitor
        .lock()
        .store_mut()
        .set_integer(WATCHER_COUNTER_KEY, 0)
        .unwrap();

    let recorder = Recorder::new("white");
    let config = WatcherConfig::default().with_poll_interval(Duration::from_millis(1));
    let mut watcher = StoreWatcher::start(monitor.clone(), recorder, config).unwrap();

    let handles: Vec<_> = (0..WRITERS)
        .map(|id| {
            let monitor = Arc::clone(&monitor);
            thread::spawn(move || {
                let int_key = format!("int-{}", id);
                let array_key = format!("array-{}", id);
                for round in 0..ROUNDS {
                    {
                        let mut table = monitor.lock();
                        let store = table.store_mut();
                        store.set_integer(&int_key, round * 10).unwrap();
                        store.set_integer_array(&array_key, vec![round; 3]).unwrap();
                    }

                    let table = monitor.lock();
                    assert_eq!(table.store().get_integer(&int_key).unwrap(), round * 10);
                    assert_eq!(table.store().get_integer_array(&array_key).unwrap(), vec![round; 3]);
                    drop(table);

                    // Shared key rewritten with alternating types by every writer
                    let mut table = monitor.lock();
                    let store = table.store_mut();
                    if round % 2 == 0 {
                        store.set_string("shared", "kiwi").unwrap();
                        assert_eq!(store.get_string("shared").unwrap(), "kiwi");
                    } else {
                        store.set_integer("shared", round).unwrap();
                        assert_eq!(store.get_integer("shared").unwrap(), round);
                    }
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
    wait_for_sweeps(&monitor, 1);
    watcher.stop();

    let table = monitor.lock();
    let store = table.store();
    // counter + shared + two keys per writer fills the store exactly
    assert_eq!(store.len(), 2 + WRITERS * 2);
    assert_eq!(store.len(), STORE_MAX_CAPACITY);
    assert!(store.len() <= store.capacity());
    for id in 0..WRITERS {
        assert_eq!(
            store.get_integer(&format!("int-{}", id)).unwrap(),
            (ROUNDS - 1) * 10
        );
    }
    assert!(!matches!(
        store.get_integer(WATCHER_COUNTER_KEY),
        Err(StoreError::TypeMismatch { .. })
    ));
}

/// Front end that reports each integer alert and then stalls inside it
struct SlowAlerts {
    delivered: Mutex<Vec<i32>>,
    signal: Sender<i32>,
    stall: Duration,
}

impl FrontEnd for SlowAlerts {
    fn reference_color(&self) -> Result<ColorRef, FrontEndError> {
        Ok(Color::parse("white").unwrap().into_ref())
    }

    fn on_alert_integer(&self, value: i32) {
        self.delivered.lock().push(value);
        let _ = self.signal.send(value);
        thread::sleep(self.stall);
    }

    fn on_alert_string(&self, _value: &str) {}
    fn on_alert_color(&self, _value: &ColorRef) {}
}

#[test]
fn test_stop_during_sweep_aborts_after_inflight_callback() {
    let monitor = Monitor::shared(Store::new());
    {
        let mut table = monitor.lock();
        for i in 0..8 {
            table
                .store_mut()
                .set_integer(&format!("hot-{}", i), 2000 + i)
                .unwrap();
        }
    }

    let (tx, rx) = mpsc::channel();
    let front_end = Arc::new(SlowAlerts {
        delivered: Mutex::new(Vec::new()),
        signal: tx,
        stall: Duration::from_millis(200),
    });
    let mut watcher =
        StoreWatcher::start(monitor.clone(), front_end.clone(), fast_config()).unwrap();

    let first = rx.recv_timeout(Duration::from_secs(10)).unwrap();
    assert_eq!(first, 2000);
    watcher.stop();

    assert_eq!(*front_end.delivered.lock(), vec![2000]);
    assert!(rx.try_recv().is_err(), "no alert after the in-flight one");

    let table = monitor.lock();
    let metrics = table.metrics();
    assert_eq!(metrics.alerts_of(AlertKind::Integer), 1);
    assert_eq!(metrics.entries_visited, 1);
    assert_eq!(metrics.aborted_sweeps, 1);
    assert_eq!(metrics.sweep_count, 0);
    assert_eq!(table.state(), WatchState::Stopped);
}
