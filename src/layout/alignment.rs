//! Horizontal alignment modes

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a row sits between x = 0 and the maximum row width
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    #[default]
    Left,
    Right,
    Center,
    /// Stretch the gaps between words so the row fills the maximum width
    Justify,
}

/// What justified alignment does with a row that ends a paragraph
///
/// A row ends a paragraph when it is the last row or when an explicit line
/// break closed it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LastRowPolicy {
    /// Leave it left aligned, as typeset text usually does
    #[default]
    Left,
    /// Stretch it like every other row
    Justify,
}

impl Alignment {
    /// Start of a row of natural width `row_width` when rows may be `max_width` wide
    ///
    /// Justified rows start at 0; their stretching is handled separately.
    pub fn row_start(self, max_width: f64, row_width: f64) -> f64 {
        match self {
            Alignment::Left | Alignment::Justify => 0.0,
            Alignment::Right => max_width - row_width,
            Alignment::Center => (max_width - row_width) / 2.0,
        }
    }
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Alignment::Left => "left",
            Alignment::Right => "right",
            Alignment::Center => "center",
            Alignment::Justify => "justify",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_start() {
        assert_eq!(Alignment::Left.row_start(100.0, 40.0), 0.0);
        assert_eq!(Alignment::Right.row_start(100.0, 40.0), 60.0);
        assert_eq!(Alignment::Center.row_start(100.0, 40.0), 30.0);
        assert_eq!(Alignment::Justify.row_start(100.0, 40.0), 0.0);
    }

    #[test]
    fn test_overflowing_row_starts_left_of_zero() {
        assert_eq!(Alignment::Right.row_start(100.0, 130.0), -30.0);
    }

    #[test]
    fn test_serde_names() {
        let parsed: Alignment = serde_json::from_str("\"center\"").expect("lowercase name");
        assert_eq!(parsed, Alignment::Center);
        assert_eq!(Alignment::Justify.to_string(), "justify");
    }
}
