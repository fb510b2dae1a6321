//! Metrics collection for watcher sweeps

use std::collections::HashMap;
use std::fmt;

/// Kind of alert delivered to the front end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlertKind {
    /// Integer outside the allowed range
    Integer,
    /// String other than the sentinel
    String,
    /// Color equal to the reference color
    Color,
}

impl fmt::Display for AlertKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AlertKind::Integer => "integer",
            AlertKind::String => "string",
            AlertKind::Color => "color",
        };
        f.write_str(name)
    }
}

/// Metrics collected by the watcher
///
/// Lives under the store lock, next to the entries it describes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WatcherMetrics {
    /// Alerts delivered per kind
    pub alerts: HashMap<AlertKind, usize>,

    /// Sweeps that reached the end of the table
    pub sweep_count: usize,

    /// Sweeps cut short by a stop request
    pub aborted_sweeps: usize,

    /// Entries a rule was applied to, across all sweeps
    pub entries_visited: usize,

    /// Times the watcher counter entry was incremented
    pub counter_increments: usize,

    /// Alert callbacks that panicked
    pub callback_failures: usize,
}

impl WatcherMetrics {
    /// Create new empty metrics
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an alert delivered to the front end
    pub fn record_alert(&mut self, kind: AlertKind) {
        *self.alerts.entry(kind).or_insert(0) += 1;
    }

    /// Record an alert callback that panicked
    pub fn record_callback_failure(&mut self) {
        self.callback_failures += 1;
    }

    /// Record a rule application
    pub fn record_visit(&mut self) {
        self.entries_visited += 1;
    }

    /// Record a watcher counter increment
    pub fn record_counter_increment(&mut self) {
        self.counter_increments += 1;
    }

    /// Record a sweep that reached the end of the table
    pub fn record_sweep(&mut self) {
        self.sweep_count += 1;
    }

    /// Record a sweep cut short by a stop request
    pub fn record_aborted_sweep(&mut self) {
        self.aborted_sweeps += 1;
    }

    /// Alerts delivered of one kind
    pub fn alerts_of(&self, kind: AlertKind) -> usize {
        self.alerts.get(&kind).copied().unwrap_or(0)
    }

    /// Alerts delivered across all kinds
    pub fn total_alerts(&self) -> usize {
        self.alerts.values().sum()
    }

    /// Reset all metrics
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Generate a summary report of metrics
    pub fn summary(&self) -> String {
        let mut lines = vec![
            "Watcher Metrics Summary".to_string(),
            "=======================".to_string(),
            format!("Sweeps: {}", self.sweep_count),
            format!("Aborted sweeps: {}", self.aborted_sweeps),
            format!("Entries visited: {}", self.entries_visited),
            format!("Counter increments: {}", self.counter_increments),
        ];

        if !self.alerts.is_empty() {
            lines.push(String::new());
            lines.push("Alerts by kind:".to_string());
            for kind in [AlertKind::Integer, AlertKind::String, AlertKind::Color] {
                let count = self.alerts_of(kind);
                if count > 0 {
                    lines.push(format!("  {}: {}", kind, count));
                }
            }
            lines.push(format!("  Total: {}", self.total_alerts()));
        }

        if self.callback_failures > 0 {
            lines.push(format!("Callback failures: {}", self.callback_failures));
        }

        lines.join("\n")
    }
}
