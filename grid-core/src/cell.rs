//! Cell contents - the unit of grid state.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{GridError, GridResult};

/// A `#RRGGBB` color, normalized to upper case.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor(String);

impl HexColor {
    /// Parse a hex triplet, with or without the leading `#`.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidColor`] if the string is not six hex digits.
    pub fn parse(input: &str) -> GridResult<Self> {
        let trimmed = input.trim();
        let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(GridError::InvalidColor(input.to_string()));
        }
        Ok(Self(format!("#{}", digits.to_ascii_uppercase())))
    }

    /// Build a color from its channels.
    #[must_use]
    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self(format!("#{r:02X}{g:02X}{b:02X}"))
    }

    /// The red, green and blue channels.
    #[must_use]
    pub fn rgb(&self) -> [u8; 3] {
        let channel = |i: usize| u8::from_str_radix(&self.0[i..i + 2], 16).unwrap_or(0);
        [channel(1), channel(3), channel(5)]
    }

    /// The normalized `#RRGGBB` string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Pure white, the background of every empty or symbol-bearing cell.
    #[must_use]
    pub fn white() -> Self {
        Self::from_rgb(255, 255, 255)
    }
}

impl FromStr for HexColor {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for HexColor {
    type Error = GridError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<HexColor> for String {
    fn from(color: HexColor) -> Self {
        color.0
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Contents of one painted grid position.
///
/// An empty position is represented by `None` in the [`Matrix`](crate::Matrix),
/// so a painted cell always carries a color. A symbol is optional and is
/// tinted with that color.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    /// Flat fill color, or the tint of the symbol when one is present.
    pub color: HexColor,
    /// Symbol registry identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
}

impl Cell {
    /// A flat-filled cell without a symbol.
    #[must_use]
    pub fn filled(color: HexColor) -> Self {
        Self {
            color,
            symbol: None,
        }
    }

    /// A cell holding a symbol tinted with `color`.
    #[must_use]
    pub fn with_symbol(color: HexColor, symbol: impl Into<String>) -> Self {
        Self {
            color,
            symbol: Some(symbol.into()),
        }
    }

    /// Whether the cell carries a symbol.
    #[must_use]
    pub fn has_symbol(&self) -> bool {
        self.symbol.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_normalizes_case_and_prefix() {
        let color = HexColor::parse("ff00aa").expect("valid color");
        assert_eq!(color.as_str(), "#FF00AA");
        assert_eq!(color, HexColor::parse("#FF00aa").expect("valid color"));
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        for bad in ["", "#FFF", "#GG0000", "#FF00000", "red"] {
            assert!(HexColor::parse(bad).is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn test_parse_allows_single_hash_only() {
        assert!(HexColor::parse("##FF0000").is_err());
        assert!(HexColor::parse("#FF0000#").is_err());
        assert_eq!(HexColor::parse("ff0000").expect("bare").as_str(), "#FF0000");
    }

    #[test]
    fn test_rgb_channels() {
        let color = HexColor::parse("#4ECDC4").expect("valid color");
        assert_eq!(color.rgb(), [0x4E, 0xCD, 0xC4]);
        assert_eq!(HexColor::from_rgb(0x4E, 0xCD, 0xC4), color);
    }

    #[test]
    fn test_cell_serde_roundtrip_omits_empty_symbol() {
        let cell = Cell::filled(HexColor::parse("#00FF00").expect("valid color"));
        let json = serde_json::to_string(&cell).expect("serialize");
        assert_eq!(json, r##"{"color":"#00FF00"}"##);

        let parsed: Cell =
            serde_json::from_str(r##"{"color":"#00ff00","symbol":"star"}"##).expect("parse");
        assert_eq!(parsed.symbol.as_deref(), Some("star"));
        assert_eq!(parsed.color.as_str(), "#00FF00");
    }

    #[test]
    fn test_cell_deserialize_rejects_invalid_color() {
        let result: Result<Cell, _> = serde_json::from_str(r#"{"color":"blue"}"#);
        assert!(result.is_err());
    }
}
