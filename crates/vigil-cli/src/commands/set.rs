//! Set command implementation.

use crate::cli::SetArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use vigil_domain::{Color, ColorRef, StoreType, StoreValue};
use vigil_sdk::Vigil;

/// Execute the set command.
pub fn execute_set(args: SetArgs, vigil: &Vigil, formatter: &Formatter) -> Result<String> {
    let value = parse_value(args.kind, &args.value)?;

    match value {
        StoreValue::Integer(v) => vigil.set_integer(&args.key, v)?,
        StoreValue::String(v) => vigil.set_string(&args.key, &v)?,
        StoreValue::Color(c) => vigil.set_color(&args.key, c)?,
        StoreValue::IntegerArray(values) => vigil.set_integer_array(&args.key, values)?,
        StoreValue::ColorArray(colors) => vigil.set_color_array(&args.key, colors)?,
    }

    tracing::debug!("Set {} entry '{}'", args.kind, args.key);
    Ok(formatter.success(&format!("{} set", args.key)))
}

/// Parse raw input into a value of the requested type.
///
/// Strings are kept exactly as given. Arrays are `;`-separated with trailing
/// empty items ignored; any other empty item, including an empty input, is
/// an incorrect value.
pub fn parse_value(kind: StoreType, raw: &str) -> Result<StoreValue> {
    let value = match kind {
        StoreType::Integer => StoreValue::Integer(parse_integer(raw)?),
        StoreType::String => StoreValue::String(raw.to_string()),
        StoreType::Color => StoreValue::Color(parse_color(raw)?),
        StoreType::IntegerArray => StoreValue::IntegerArray(
            split_array(raw)
                .into_iter()
                .map(parse_integer)
                .collect::<Result<Vec<_>>>()?,
        ),
        StoreType::ColorArray => StoreValue::ColorArray(
            split_array(raw)
                .into_iter()
                .map(parse_color)
                .collect::<Result<Vec<_>>>()?,
        ),
    };
    Ok(value)
}

fn split_array(raw: &str) -> Vec<&str> {
    let mut items: Vec<&str> = raw.split(';').collect();
    while items.len() > 1 && items.last().is_some_and(|item| item.trim().is_empty()) {
        items.pop();
    }
    items
}

fn parse_integer(raw: &str) -> Result<i32> {
    raw.trim()
        .parse()
        .map_err(|_| CliError::IncorrectValue(raw.to_string()))
}

fn parse_color(raw: &str) -> Result<ColorRef> {
    Color::parse(raw.trim())
        .map(Color::into_ref)
        .map_err(|e| CliError::IncorrectValue(e.input().to_string()))
}
