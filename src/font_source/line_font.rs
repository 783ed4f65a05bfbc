//! The built-in single-line stroke font
//!
//! Every glyph is a handful of strokes drawn on a design grid where a capital
//! letter is 100 units tall, the baseline is at y = 0 and y grows downward.
//! Shapes are scaled to the requested size lazily, the first time a glyph
//! is drawn or measured.

use crate::font_source::font::{Font, FontError};
use crate::font_source::glyph::Glyph;
use crate::font_source::metrics::FontMetrics;
use crate::geometry::PathShape;
use kurbo::Affine;
use std::sync::Arc;
use tracing::debug;

/// Capital height of the design grid
const DESIGN_M_HEIGHT: f64 = 100.0;

/// `(character, advance, path data)` in design units
const GLYPHS: &[(char, f64, &str)] = &[
    ('A', 60.0, "M0 0 L30 -100 L60 0 M11 -36 L49 -36"),
    ('B', 55.0, "M0 0 L0 -100 L30 -100 C60 -100 60 -52 30 -52 L0 -52 M30 -52 C65 -52 65 0 30 0 L0 0"),
    ('C', 60.0, "M60 -85 C45 -105 0 -105 0 -50 C0 5 45 5 60 -15"),
    ('D', 60.0, "M0 0 L0 -100 L20 -100 C75 -100 75 0 20 0 Z"),
    ('E', 55.0, "M55 -100 L0 -100 L0 0 L55 0 M0 -50 L40 -50"),
    ('F', 55.0, "M55 -100 L0 -100 L0 0 M0 -50 L40 -50"),
    ('G', 60.0, "M60 -85 C45 -105 0 -105 0 -50 C0 5 60 5 60 -40 L35 -40"),
    ('H', 60.0, "M0 -100 L0 0 M60 -100 L60 0 M0 -50 L60 -50"),
    ('I', 30.0, "M0 -100 L30 -100 M15 -100 L15 0 M0 0 L30 0"),
    ('J', 50.0, "M50 -100 L50 -30 C50 10 0 10 0 -25"),
    ('K', 55.0, "M0 -100 L0 0 M55 -100 L0 -45 M17 -62 L55 0"),
    ('L', 50.0, "M0 -100 L0 0 L50 0"),
    ('M', 70.0, "M0 0 L0 -100 L35 -40 L70 -100 L70 0"),
    ('N', 60.0, "M0 0 L0 -100 L60 0 L60 -100"),
    ('O', 70.0, "M35 -100 C-12 -100 -12 0 35 0 C82 0 82 -100 35 -100 Z"),
    ('P', 55.0, "M0 0 L0 -100 L30 -100 C65 -100 65 -45 30 -45 L0 -45"),
    ('Q', 70.0, "M35 -100 C-12 -100 -12 0 35 0 C82 0 82 -100 35 -100 Z M45 -25 L72 5"),
    ('R', 55.0, "M0 0 L0 -100 L30 -100 C65 -100 65 -45 30 -45 L0 -45 M25 -45 L55 0"),
    ('S', 55.0, "M55 -85 C45 -105 0 -105 0 -75 C0 -50 55 -55 55 -25 C55 5 5 5 0 -15"),
    ('T', 60.0, "M0 -100 L60 -100 M30 -100 L30 0"),
    ('U', 60.0, "M0 -100 L0 -35 C0 10 60 10 60 -35 L60 -100"),
    ('V', 60.0, "M0 -100 L30 0 L60 -100"),
    ('W', 80.0, "M0 -100 L20 0 L40 -70 L60 0 L80 -100"),
    ('X', 60.0, "M0 -100 L60 0 M60 -100 L0 0"),
    ('Y', 60.0, "M0 -100 L30 -50 L60 -100 M30 -50 L30 0"),
    ('Z', 60.0, "M0 -100 L60 -100 L0 0 L60 0"),
    ('0', 50.0, "M25 -100 C-8 -100 -8 0 25 0 C58 0 58 -100 25 -100 Z"),
    ('1', 45.0, "M5 -80 L25 -100 L25 0 M5 0 L45 0"),
    ('2', 50.0, "M0 -80 C5 -105 50 -105 50 -72 C50 -45 0 -30 0 0 L50 0"),
    ('3', 52.0, "M0 -90 C15 -105 50 -100 50 -77 C50 -55 30 -52 20 -52 C35 -52 52 -45 52 -25 C52 5 10 5 0 -10"),
    ('4', 55.0, "M40 0 L40 -100 L0 -30 L55 -30"),
    ('5', 52.0, "M50 -100 L5 -100 L0 -55 C20 -65 52 -62 52 -30 C52 5 10 5 0 -10"),
    ('6', 50.0, "M45 -95 C20 -105 0 -85 0 -40 C0 5 50 5 50 -30 C50 -65 5 -65 0 -35"),
    ('7', 50.0, "M0 -100 L50 -100 L15 0"),
    ('8', 50.0, "M25 -52 C-3 -52 -3 -100 25 -100 C53 -100 53 -52 25 -52 C-7 -52 -7 0 25 0 C57 0 57 -52 25 -52 Z"),
    ('9', 50.0, "M50 -65 C45 -35 0 -35 0 -68 C0 -103 50 -103 50 -60 C50 -15 30 5 5 -5"),
    ('.', 10.0, "M5 -2 L5 0"),
    (',', 10.0, "M8 -5 L3 12"),
    ('!', 10.0, "M5 -100 L5 -30 M5 -3 L5 0"),
    ('?', 50.0, "M0 -80 C5 -105 50 -105 50 -75 C50 -50 25 -55 25 -30 M25 -3 L25 0"),
    ('\'', 10.0, "M5 -100 L5 -75"),
    ('"', 25.0, "M5 -100 L5 -75 M20 -100 L20 -75"),
    ('-', 35.0, "M0 -45 L35 -45"),
    (':', 10.0, "M5 -62 L5 -60 M5 -2 L5 0"),
    (';', 10.0, "M8 -62 L8 -60 M8 -5 L3 12"),
    ('+', 50.0, "M0 -45 L50 -45 M25 -70 L25 -20"),
    ('=', 45.0, "M0 -60 L45 -60 M0 -30 L45 -30"),
    ('/', 40.0, "M0 10 L40 -100"),
    ('(', 25.0, "M25 -105 C0 -75 0 -15 25 15"),
    (')', 25.0, "M0 -105 C25 -75 25 -15 0 15"),
];

/// Size and stroke width for the built-in line font
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineFontMetrics {
    pub font_size: f64,
    pub stroke_width: f64,
}

impl LineFontMetrics {
    pub fn new(font_size: f64, stroke_width: f64) -> Self {
        Self {
            font_size,
            stroke_width,
        }
    }

    /// The line width this font looks best with at `font_size`
    pub fn recommended_stroke_width(font_size: f64) -> f64 {
        font_size / 10.0
    }

    /// Full metrics for this size
    ///
    /// Letters are spaced so that neighbouring strokes of the given width
    /// never touch.
    pub fn metrics(&self) -> FontMetrics {
        let size = self.font_size;
        FontMetrics {
            m_height: size,
            default_kerning: 0.2 * size + self.stroke_width,
            top: -1.25 * size,
            bottom: 0.5 * size,
            capital_top: -size,
            stroke_width: self.stroke_width,
            space_width: 0.5 * size,
        }
    }
}

/// Build the line font at the requested size
///
/// Lowercase letters share the capitals' strokes.
pub fn make_line_font(line_metrics: LineFontMetrics) -> Result<Font, FontError> {
    let metrics = line_metrics.metrics();
    let scale = line_metrics.font_size / DESIGN_M_HEIGHT;
    let mut letters = Vec::with_capacity(GLYPHS.len() * 2);
    for &(ch, advance, data) in GLYPHS {
        let design = PathShape::from_svg(data)
            .map_err(|source| FontError::InvalidGlyphPath { ch, source })?;
        let design = Arc::new(design);
        let glyph = Glyph::derived(
            move || design.transform(Affine::scale(scale)),
            advance * scale,
            metrics,
        );
        if ch.is_ascii_uppercase() {
            letters.push((ch.to_ascii_lowercase(), glyph.clone()));
        }
        letters.push((ch, glyph));
    }
    debug!(
        "Built line font: {} glyphs, size {}, stroke width {}",
        letters.len(),
        line_metrics.font_size,
        line_metrics.stroke_width
    );
    Font::new(metrics, letters)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_glyph_parses() {
        let font = make_line_font(LineFontMetrics::new(100.0, 10.0)).expect("valid glyph table");
        assert_eq!(font.len(), GLYPHS.len() + 26);
        for (ch, glyph) in font.iter() {
            assert!(glyph.length() > 0.0, "glyph {ch:?} has no ink");
            assert!(glyph.advance() > 0.0, "glyph {ch:?} has no advance");
        }
    }

    #[test]
    fn test_design_units_at_size_100() {
        let font = make_line_font(LineFontMetrics::new(100.0, 10.0)).expect("font");
        let l = font.get_char('L').expect("L");
        assert_eq!(l.advance(), 50.0);
        assert!((l.length() - 150.0).abs() < 1e-9);
    }

    #[test]
    fn test_scaling_with_font_size() {
        let font = make_line_font(LineFontMetrics::new(20.0, 2.0)).expect("font");
        assert_eq!(font.m_height(), 20.0);
        assert_eq!(font.top(), -25.0);
        assert_eq!(font.bottom(), 10.0);
        assert_eq!(font.space_width(), 10.0);
        assert!((font.kerning() - 6.0).abs() < 1e-12);
        let t = font.get_char('T').expect("T");
        assert!((t.advance() - 12.0).abs() < 1e-12);
        assert!((t.length() - 32.0).abs() < 1e-9);
    }

    #[test]
    fn test_lowercase_shares_capital_strokes() {
        let font = make_line_font(LineFontMetrics::new(40.0, 4.0)).expect("font");
        let upper = font.get_char('K').expect("K");
        let lower = font.get_char('k').expect("k");
        assert_eq!(upper.shape(), lower.shape());
        assert_eq!(upper.advance(), lower.advance());
    }

    #[test]
    fn test_recommended_stroke_width() {
        assert_eq!(LineFontMetrics::recommended_stroke_width(30.0), 3.0);
    }
}
