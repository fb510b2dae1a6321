//! Value module - the typed payload of a store entry

use crate::color::ColorRef;
use std::fmt;

/// Type of the value held by an entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreType {
    /// A 32-bit signed integer
    Integer,

    /// An owned UTF-8 string
    String,

    /// A held color reference
    Color,

    /// An owned buffer of integers
    IntegerArray,

    /// An owned buffer of held color references
    ColorArray,
}

impl StoreType {
    /// All types, in declaration order
    pub const ALL: [StoreType; 5] = [
        StoreType::Integer,
        StoreType::String,
        StoreType::Color,
        StoreType::IntegerArray,
        StoreType::ColorArray,
    ];

    /// Get the type name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreType::Integer => "integer",
            StoreType::String => "string",
            StoreType::Color => "color",
            StoreType::IntegerArray => "integer-array",
            StoreType::ColorArray => "color-array",
        }
    }

    /// Parse a type from its name
    ///
    /// Accepts the names returned by [`StoreType::as_str`] case-insensitively,
    /// with or without the dash.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().replace(['-', '_'], "").as_str() {
            "integer" | "int" => Some(StoreType::Integer),
            "string" | "str" => Some(StoreType::String),
            "color" => Some(StoreType::Color),
            "integerarray" | "intarray" => Some(StoreType::IntegerArray),
            "colorarray" => Some(StoreType::ColorArray),
            _ => None,
        }
    }

    /// Whether the watcher applies a rule to entries of this type
    pub fn is_watched(&self) -> bool {
        matches!(self, StoreType::Integer | StoreType::String | StoreType::Color)
    }
}

impl fmt::Display for StoreType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for StoreType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid type: {}", s))
    }
}

/// Typed value held by an entry
///
/// The variant is the entry's type; there is no separate tag that could
/// disagree with the payload.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreValue {
    /// Integer payload
    Integer(i32),

    /// String payload
    String(String),

    /// Held color reference
    Color(ColorRef),

    /// Integer buffer; its length is the element count
    IntegerArray(Vec<i32>),

    /// Buffer of held color references; its length is the element count
    ColorArray(Vec<ColorRef>),
}

impl StoreValue {
    /// Get the type of this value
    pub fn kind(&self) -> StoreType {
        match self {
            StoreValue::Integer(_) => StoreType::Integer,
            StoreValue::String(_) => StoreType::String,
            StoreValue::Color(_) => StoreType::Color,
            StoreValue::IntegerArray(_) => StoreType::IntegerArray,
            StoreValue::ColorArray(_) => StoreType::ColorArray,
        }
    }

    /// Element count for array values, `None` for scalars
    pub fn array_len(&self) -> Option<usize> {
        match self {
            StoreValue::IntegerArray(values) => Some(values.len()),
            StoreValue::ColorArray(values) => Some(values.len()),
            StoreValue::Integer(_) | StoreValue::String(_) | StoreValue::Color(_) => None,
        }
    }
}

impl fmt::Display for StoreValue {
    /// Arrays are rendered `;`-separated, the same format front ends parse
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreValue::Integer(value) => write!(f, "{}", value),
            StoreValue::String(value) => f.write_str(value),
            StoreValue::Color(color) => write!(f, "{}", color),
            StoreValue::IntegerArray(values) => {
                let parts: Vec<String> = values.iter().map(|v| v.to_string()).collect();
                f.write_str(&parts.join(";"))
            }
            StoreValue::ColorArray(colors) => {
                let parts: Vec<String> = colors.iter().map(|c| c.to_string()).collect();
                f.write_str(&parts.join(";"))
            }
        }
    }
}
