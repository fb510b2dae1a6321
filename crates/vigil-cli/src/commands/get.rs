//! Get command implementation.

use crate::cli::GetArgs;
use crate::error::Result;
use crate::output::Formatter;
use vigil_domain::{StoreType, StoreValue};
use vigil_sdk::Vigil;

/// Execute the get command.
pub fn execute_get(args: GetArgs, vigil: &Vigil, formatter: &Formatter) -> Result<String> {
    let key = args.key.as_str();
    let value = match args.kind {
        StoreType::Integer => StoreValue::Integer(vigil.get_integer(key)?),
        StoreType::String => StoreValue::String(vigil.get_string(key)?),
        StoreType::Color => StoreValue::Color(vigil.get_color(key)?),
        StoreType::IntegerArray => StoreValue::IntegerArray(vigil.get_integer_array(key)?),
        StoreType::ColorArray => StoreValue::ColorArray(vigil.get_color_array(key)?),
    };

    formatter.format_value(key, &value)
}
