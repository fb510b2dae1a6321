//! Stats command implementation.

use crate::error::Result;
use crate::output::Formatter;
use vigil_sdk::Vigil;

/// Execute the stats command.
pub fn execute_stats(vigil: &Vigil, formatter: &Formatter) -> Result<String> {
    formatter.format_metrics(&vigil.metrics(), vigil.len(), vigil.capacity())
}

/// Execute `stats reset`: clear the watcher metrics.
pub fn execute_stats_reset(vigil: &Vigil, formatter: &Formatter) -> Result<String> {
    let previous = vigil.reset_metrics();
    Ok(formatter.success(&format!(
        "Metrics reset ({} sweeps, {} alerts cleared)",
        previous.sweep_count,
        previous.total_alerts()
    )))
}
