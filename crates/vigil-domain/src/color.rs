//! Color module - the comparable value Color entries hold

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Held reference to a color owned outside the store
///
/// The store and the watcher keep colors through this handle. Releasing a
/// hold is dropping the handle, so a hold can never be released twice.
pub type ColorRef = Arc<Color>;

/// A 32-bit ARGB color
///
/// Equality compares the full ARGB value, so `#FFFFFF` and `white` are equal
/// while a translucent white is not.
///
/// # Examples
///
/// ```
/// use vigil_domain::Color;
///
/// let white: Color = "white".parse().unwrap();
/// assert_eq!(white, "#FFFFFF".parse().unwrap());
/// assert_eq!(white.to_string(), "#FFFFFF");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color(u32);

/// Named colors accepted by [`Color::parse`]
const NAMED_COLORS: &[(&str, u32)] = &[
    ("black", 0xFF00_0000),
    ("darkgray", 0xFF44_4444),
    ("gray", 0xFF88_8888),
    ("lightgray", 0xFFCC_CCCC),
    ("white", 0xFFFF_FFFF),
    ("red", 0xFFFF_0000),
    ("green", 0xFF00_FF00),
    ("blue", 0xFF00_00FF),
    ("yellow", 0xFFFF_FF00),
    ("cyan", 0xFF00_FFFF),
    ("magenta", 0xFFFF_00FF),
    ("aqua", 0xFF00_FFFF),
    ("fuchsia", 0xFFFF_00FF),
    ("darkgrey", 0xFF44_4444),
    ("grey", 0xFF88_8888),
    ("lightgrey", 0xFFCC_CCCC),
    ("lime", 0xFF00_FF00),
    ("maroon", 0xFF80_0000),
    ("navy", 0xFF00_0080),
    ("olive", 0xFF80_8000),
    ("purple", 0xFF80_0080),
    ("silver", 0xFFC0_C0C0),
    ("teal", 0xFF00_8080),
];

impl Color {
    /// Create a color from a raw ARGB value
    pub const fn from_argb(argb: u32) -> Self {
        Self(argb)
    }

    /// Create an opaque color from its red, green and blue components
    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self(0xFF00_0000 | (red as u32) << 16 | (green as u32) << 8 | blue as u32)
    }

    /// Get the raw ARGB value
    pub fn argb(&self) -> u32 {
        self.0
    }

    /// Get the alpha component
    pub fn alpha(&self) -> u8 {
        (self.0 >> 24) as u8
    }

    /// Check whether the color is fully opaque
    pub fn is_opaque(&self) -> bool {
        self.alpha() == 0xFF
    }

    /// Wrap the color in a held reference
    pub fn into_ref(self) -> ColorRef {
        Arc::new(self)
    }

    /// Parse a color from `#RRGGBB`, `#AARRGGBB` or a color name
    ///
    /// Names are matched case-insensitively. Surrounding whitespace is ignored.
    pub fn parse(input: &str) -> Result<Self, ColorParseError> {
        let trimmed = input.trim();

        if let Some(hex) = trimmed.strip_prefix('#') {
            if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
                return Err(ColorParseError::new(input));
            }
            let value = u32::from_str_radix(hex, 16).map_err(|_| ColorParseError::new(input))?;
            return match hex.len() {
                6 => Ok(Self(0xFF00_0000 | value)),
                8 => Ok(Self(value)),
                _ => Err(ColorParseError::new(input)),
            };
        }

        let lower = trimmed.to_ascii_lowercase();
        NAMED_COLORS
            .iter()
            .find(|(name, _)| *name == lower)
            .map(|(_, argb)| Self(*argb))
            .ok_or_else(|| ColorParseError::new(input))
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_opaque() {
            write!(f, "#{:06X}", self.0 & 0x00FF_FFFF)
        } else {
            write!(f, "#{:08X}", self.0)
        }
    }
}

/// Error returned when a string is not a recognizable color
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorParseError {
    input: String,
}

impl ColorParseError {
    fn new(input: &str) -> Self {
        Self {
            input: input.to_string(),
        }
    }

    /// The text that failed to parse
    pub fn input(&self) -> &str {
        &self.input
    }
}

impl fmt::Display for ColorParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown color: {}", self.input)
    }
}

impl std::error::Error for ColorParseError {}
