//! List command implementation.

use crate::error::Result;
use crate::output::Formatter;
use vigil_sdk::Vigil;

/// Execute the list command.
pub fn execute_list(vigil: &Vigil, formatter: &Formatter) -> Result<String> {
    formatter.format_entries(&vigil.entries())
}
