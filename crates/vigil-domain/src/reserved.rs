//! Reserved identifiers shared by the store and the watcher
//!
//! These are part of the contract with the front end, not configuration.
//! [`POLL_INTERVAL`] is the default the watcher configuration starts from.

use std::time::Duration;

/// Integer entry the watcher increments on every sweep instead of alerting on
pub const WATCHER_COUNTER_KEY: &str = "watcherCounter";

/// String value that does not raise a string alert; every other value does
pub const STRING_ALERT_SENTINEL: &str = "apple";

/// Integers strictly outside `[-INTEGER_ALERT_THRESHOLD, INTEGER_ALERT_THRESHOLD]` raise an alert
pub const INTEGER_ALERT_THRESHOLD: i32 = 1000;

/// Pause between two sweeps of the watcher
pub const POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Upper bound for the capacity of any store
pub const STORE_MAX_CAPACITY: usize = 16;

/// Color the front end supplies as the reference color unless configured otherwise
pub const DEFAULT_REFERENCE_COLOR: &str = "white";

/// Returns true when `value` lies outside the allowed integer range
pub fn is_integer_out_of_range(value: i32) -> bool {
    value > INTEGER_ALERT_THRESHOLD || value < -INTEGER_ALERT_THRESHOLD
}
