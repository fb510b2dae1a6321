//! Per-type watch rules and the sweep over the table

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use vigil_domain::reserved::{is_integer_out_of_range, STRING_ALERT_SENTINEL, WATCHER_COUNTER_KEY};
use vigil_domain::{ColorRef, FrontEnd, StoreValue};

use crate::monitor::{Monitor, WatchState, WatchedStore};
use crate::AlertKind;

/// How a sweep ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepOutcome {
    /// Every entry present at the time was visited
    Completed {
        /// Entries visited
        visited: usize,
    },
    /// A stop request was observed before the end of the table
    Aborted {
        /// Entries visited before the stop was observed
        visited: usize,
    },
}

/// Work a rule leaves for after the lock is released
#[derive(Debug)]
enum Pending {
    Integer(i32),
    String(String),
    Color(ColorRef),
}

/// Applies the watch rules to every entry and notifies the front end
///
/// Holds the resources captured when the watcher started: the front end and
/// the reference color. Dropping the sweeper releases both.
pub struct Sweeper {
    front_end: Arc<dyn FrontEnd>,
    reference: ColorRef,
}

impl Sweeper {
    /// Create a sweeper comparing color entries against `reference`
    pub fn new(front_end: Arc<dyn FrontEnd>, reference: ColorRef) -> Self {
        Self {
            front_end,
            reference,
        }
    }

    /// The color that triggers color alerts
    pub fn reference_color(&self) -> &ColorRef {
        &self.reference
    }

    /// Perform one sweep over the table
    ///
    /// The lock is taken once per entry. Rules run under the lock; front-end
    /// calls happen after it is released. The sweep ends at the current end
    /// of the table, or as soon as the watcher is no longer running.
    pub fn sweep(&self, monitor: &Monitor) -> SweepOutcome {
        let mut index = 0;
        loop {
            let pending = {
                let mut table = monitor.lock();
                let still_running = table.state() == WatchState::Running;
                let has_more = index < table.store().len();

                if !still_running {
                    table.metrics_mut().record_aborted_sweep();
                    return SweepOutcome::Aborted { visited: index };
                }
                if !has_more {
                    table.metrics_mut().record_sweep();
                    return SweepOutcome::Completed { visited: index };
                }
                apply_rule(&mut table, index)
            };

            if let Some(pending) = pending {
                self.dispatch(monitor, pending);
            }
            index += 1;
        }
    }

    /// Deliver a pending alert outside the lock
    fn dispatch(&self, monitor: &Monitor, pending: Pending) {
        let front_end = &self.front_end;
        let (kind, delivered) = match pending {
            Pending::Integer(value) => {
                tracing::trace!("Integer alert: {}", value);
                let delivered = guard_callback(|| front_end.on_alert_integer(value));
                (AlertKind::Integer, delivered)
            }
            Pending::String(value) => {
                tracing::trace!("String alert: {}", value);
                let delivered = guard_callback(|| front_end.on_alert_string(&value));
                (AlertKind::String, delivered)
            }
            Pending::Color(color) => {
                let matched =
                    match guard_call(|| front_end.colors_equal(&self.reference, &color)) {
                        Some(matched) => matched,
                        None => {
                            monitor.lock().metrics_mut().record_callback_failure();
                            return;
                        }
                    };
                if !matched {
                    return;
                }
                tracing::trace!("Color alert: {}", color);
                let delivered = guard_callback(|| front_end.on_alert_color(&color));
                (AlertKind::Color, delivered)
            }
        };

        let mut table = monitor.lock();
        if delivered {
            table.metrics_mut().record_alert(kind);
        } else {
            table.metrics_mut().record_callback_failure();
        }
    }
}

/// Apply the rule for the entry at `index`, under the lock
fn apply_rule(table: &mut WatchedStore, index: usize) -> Option<Pending> {
    let (store, metrics) = table.parts_mut();
    let entry = store.entry_at_mut(index)?;
    metrics.record_visit();

    let is_counter = entry.key() == WATCHER_COUNTER_KEY;
    match entry.value_mut()? {
        StoreValue::Integer(value) if is_counter => {
            advance_watcher_counter(value);
            metrics.record_counter_increment();
            None
        }
        StoreValue::Integer(value) => {
            is_integer_out_of_range(*value).then_some(Pending::Integer(*value))
        }
        StoreValue::String(value) => {
            (value.as_str() != STRING_ALERT_SENTINEL).then(|| Pending::String(value.clone()))
        }
        StoreValue::Color(color) => Some(Pending::Color(ColorRef::clone(color))),
        StoreValue::IntegerArray(_) | StoreValue::ColorArray(_) => None,
    }
}

/// The one rule that writes to the store: the counter entry counts sweeps
fn advance_watcher_counter(value: &mut i32) {
    *value = value.wrapping_add(1);
}

/// Run a front-end callback, logging instead of unwinding into the watcher
fn guard_callback(callback: impl FnOnce()) -> bool {
    guard_call(callback).is_some()
}

fn guard_call<T>(call: impl FnOnce() -> T) -> Option<T> {
    match panic::catch_unwind(AssertUnwindSafe(call)) {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!("Front-end callback panicked; continuing sweep");
            None
        }
    }
}
