//! Font metrics and measurement data
//!
//! The baseline is always at y = 0 and y grows downward, so `top` and
//! `capital_top` are normally negative.

use serde::{Deserialize, Serialize};

/// Vertical and horizontal measurements shared by every glyph of one font
///
/// Two metrics values describe the same font when every field is equal;
/// there is no identity beyond the values themselves.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FontMetrics {
    /// The height of a capital M. This is the font's unit of size.
    pub m_height: f64,
    /// Space added between adjacent characters
    pub default_kerning: f64,
    /// The font reserves everything between `top` and `bottom` for itself
    pub top: f64,
    /// The font reserves everything between `top` and `bottom` for itself
    pub bottom: f64,
    /// The y coordinate of the top of most capital letters
    pub capital_top: f64,
    /// The stroke width this font was designed for
    pub stroke_width: f64,
    /// The recommended width of a normal space
    pub space_width: f64,
}

impl FontMetrics {
    /// Every field multiplied by `ratio`
    pub fn scaled(&self, ratio: f64) -> Self {
        Self {
            m_height: self.m_height * ratio,
            default_kerning: self.default_kerning * ratio,
            top: self.top * ratio,
            bottom: self.bottom * ratio,
            capital_top: self.capital_top * ratio,
            stroke_width: self.stroke_width * ratio,
            space_width: self.space_width * ratio,
        }
    }

    /// Metrics for a font whose capital M is exactly `new_size` tall
    ///
    /// `m_height` is set directly rather than multiplied so that it lands on
    /// `new_size` without rounding error.
    pub fn resized(&self, new_size: f64) -> Self {
        let ratio = new_size / self.m_height;
        Self {
            m_height: new_size,
            ..self.scaled(ratio)
        }
    }

    /// Height reserved for one row of text
    pub fn line_height(&self) -> f64 {
        self.bottom - self.top
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> FontMetrics {
        FontMetrics {
            m_height: 100.0,
            default_kerning: 5.0,
            top: -125.0,
            bottom: 50.0,
            capital_top: -100.0,
            stroke_width: 10.0,
            space_width: 50.0,
        }
    }

    #[test]
    fn test_scaled_multiplies_every_field() {
        let half = sample().scaled(0.5);
        assert_eq!(half.m_height, 50.0);
        assert_eq!(half.default_kerning, 2.5);
        assert_eq!(half.top, -62.5);
        assert_eq!(half.bottom, 25.0);
        assert_eq!(half.capital_top, -50.0);
        assert_eq!(half.stroke_width, 5.0);
        assert_eq!(half.space_width, 25.0);
    }

    #[test]
    fn test_resized_hits_requested_size_exactly() {
        let resized = sample().resized(37.3);
        assert_eq!(resized.m_height, 37.3);
        assert!((resized.space_width - 50.0 * 0.373).abs() < 1e-12);
    }

    #[test]
    fn test_independent_values_compare_equal() {
        assert_eq!(sample(), sample());
        assert_ne!(sample(), sample().scaled(2.0));
    }

    #[test]
    fn test_json_uses_camel_case() {
        let json = serde_json::to_string(&sample()).expect("serialize");
        assert!(json.contains("\"mHeight\""));
        assert!(json.contains("\"spaceWidth\""));
        let back: FontMetrics = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, sample());
    }

    #[test]
    fn test_line_height() {
        assert_eq!(sample().line_height(), 175.0);
    }
}
