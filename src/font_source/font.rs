//! Stroke fonts
//!
//! Almost all modern fonts are drawn by filling a path. A [`Font`] here is
//! meant to be stroked instead, which is what makes the handwriting reveal
//! possible: every glyph has a natural drawing order and a length.

use crate::font_source::glyph::Glyph;
use crate::font_source::metrics::FontMetrics;
use crate::geometry::GeometryError;
use std::collections::HashMap;
use std::path::PathBuf;
use thiserror::Error;
use tracing::debug;

/// A bare character table, as produced by older font builders
///
/// Order is explicitly undefined.
pub type FontMap = HashMap<char, Glyph>;

#[derive(Debug, Error)]
pub enum FontError {
    /// Glyphs from different fonts were mixed into one table
    #[error("glyph {ch:?} does not share the font's metrics (expected {expected:?}, found {found:?})")]
    MetricsMismatch {
        ch: char,
        expected: Box<FontMetrics>,
        found: Box<FontMetrics>,
    },
    #[error("glyph {ch:?} has invalid path data: {source}")]
    InvalidGlyphPath {
        ch: char,
        #[source]
        source: GeometryError,
    },
    #[error("font file key {0:?} is not exactly one character")]
    InvalidGlyphKey(String),
    #[error("failed to access font file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse font file: {0}")]
    Json(#[from] serde_json::Error),
}

/// An immutable stroke font: shared metrics plus a character table
#[derive(Debug, Clone)]
pub struct Font {
    metrics: FontMetrics,
    letters: FontMap,
}

/// The result of looking up every character of a word
#[derive(Debug, Clone, Default)]
pub struct WordLookup {
    /// Glyphs for the characters the font knows, in word order
    pub glyphs: Vec<Glyph>,
    /// Characters the font has no glyph for, in word order
    pub skipped: Vec<char>,
}

impl WordLookup {
    /// True when no character had to be dropped
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }

    /// Sum of advances plus `kerning` between adjacent glyphs
    pub fn width(&self, kerning: f64) -> f64 {
        let advances: f64 = self.glyphs.iter().map(Glyph::advance).sum();
        let gaps = self.glyphs.len().saturating_sub(1) as f64;
        advances + gaps * kerning
    }
}

impl Font {
    /// Build a font from its metrics and letters
    ///
    /// Every glyph must carry exactly these metrics.
    pub fn new(
        metrics: FontMetrics,
        letters: impl IntoIterator<Item = (char, Glyph)>,
    ) -> Result<Self, FontError> {
        let letters: FontMap = letters.into_iter().collect();
        check_uniform_metrics(&letters, &metrics)?;
        Ok(Self { metrics, letters })
    }

    pub fn metrics(&self) -> &FontMetrics {
        &self.metrics
    }

    /// Everything between `top` and `bottom` is reserved for text.
    /// `top` is typically negative because the baseline is always 0.
    pub fn top(&self) -> f64 {
        self.metrics.top
    }

    pub fn bottom(&self) -> f64 {
        self.metrics.bottom
    }

    pub fn m_height(&self) -> f64 {
        self.metrics.m_height
    }

    pub fn space_width(&self) -> f64 {
        self.metrics.space_width
    }

    /// The recommended line width for stroking this font
    pub fn stroke_width(&self) -> f64 {
        self.metrics.stroke_width
    }

    /// Space added after each letter
    pub fn kerning(&self) -> f64 {
        self.metrics.default_kerning
    }

    pub fn len(&self) -> usize {
        self.letters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    pub fn get_char(&self, ch: char) -> Option<&Glyph> {
        self.letters.get(&ch)
    }

    /// Look up every character of `word`
    ///
    /// Characters without a glyph are left out of [`WordLookup::glyphs`], so
    /// they contribute neither ink nor advance. They are reported in
    /// [`WordLookup::skipped`] for callers that want to warn about them.
    pub fn get_word(&self, word: &str) -> WordLookup {
        let mut lookup = WordLookup::default();
        for ch in word.chars() {
            match self.get_char(ch) {
                Some(glyph) => lookup.glyphs.push(glyph.clone()),
                None => lookup.skipped.push(ch),
            }
        }
        lookup
    }

    /// Iterate over the character table, in no particular order
    pub fn iter(&self) -> impl Iterator<Item = (char, &Glyph)> {
        self.letters.iter().map(|(ch, glyph)| (*ch, glyph))
    }

    pub fn letters(&self) -> &FontMap {
        &self.letters
    }
}

/// Fail if any glyph carries metrics other than `expected`
fn check_uniform_metrics(letters: &FontMap, expected: &FontMetrics) -> Result<(), FontError> {
    for (ch, glyph) in letters {
        if glyph.metrics() != expected {
            return Err(FontError::MetricsMismatch {
                ch: *ch,
                expected: Box::new(*expected),
                found: Box::new(*glyph.metrics()),
            });
        }
    }
    Ok(())
}

/// Scale every glyph of `letters` from `metrics` to a capital M height of `new_size`
fn resize_letters(
    letters: &FontMap,
    metrics: &FontMetrics,
    new_size: f64,
) -> Result<(FontMetrics, FontMap), FontError> {
    check_uniform_metrics(letters, metrics)?;
    let ratio = new_size / metrics.m_height;
    let new_metrics = metrics.resized(new_size);
    let resized = letters
        .iter()
        .map(|(ch, glyph)| (*ch, glyph.rescaled(ratio, new_metrics)))
        .collect();
    Ok((new_metrics, resized))
}

/// A copy of `font` whose capital M is `new_size` tall
///
/// Shapes, advances and every metrics field are scaled by
/// `new_size / font.m_height()`.
pub fn resize_font(font: &Font, new_size: f64) -> Result<Font, FontError> {
    let (metrics, letters) = resize_letters(&font.letters, &font.metrics, new_size)?;
    debug!(
        "Resized font with {} glyphs from {} to {}",
        letters.len(),
        font.m_height(),
        new_size
    );
    Ok(Font { metrics, letters })
}

/// Resize a bare character table
///
/// The metrics are taken from an arbitrary glyph; the table is rejected if
/// the glyphs do not all agree on them. An empty table stays empty.
pub fn resize_font_map(letters: &FontMap, new_size: f64) -> Result<FontMap, FontError> {
    let Some(metrics) = letters.values().next().map(|glyph| *glyph.metrics()) else {
        return Ok(FontMap::new());
    };
    let (_, resized) = resize_letters(letters, &metrics, new_size)?;
    Ok(resized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::PathShape;

    fn metrics() -> FontMetrics {
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

    fn line(length: f64) -> PathShape {
        PathShape::from_svg(&format!("M0 0 L{length} 0")).expect("valid path data")
    }

    fn sample_font() -> Font {
        Font::new(
            metrics(),
            [
                ('A', Glyph::new(line(140.0), 60.0, metrics())),
                ('B', Glyph::new(line(120.0), 55.0, metrics())),
            ],
        )
        .expect("uniform metrics")
    }

    #[test]
    fn test_get_char() {
        let font = sample_font();
        assert_eq!(font.get_char('A').map(Glyph::advance), Some(60.0));
        assert!(font.get_char('Z').is_none());
    }

    #[test]
    fn test_get_word_skips_unmapped_characters() {
        let lookup = sample_font().get_word("AxB?");
        assert_eq!(lookup.glyphs.len(), 2);
        assert_eq!(lookup.skipped, vec!['x', '?']);
        assert!(!lookup.is_complete());
        assert_eq!(lookup.width(5.0), 120.0);
    }

    #[test]
    fn test_get_word_complete() {
        let lookup = sample_font().get_word("BA");
        assert!(lookup.is_complete());
        assert_eq!(lookup.glyphs[0].advance(), 55.0);
    }

    #[test]
    fn test_new_rejects_mixed_metrics() {
        let other = metrics().scaled(2.0);
        let result = Font::new(
            metrics(),
            [
                ('A', Glyph::new(line(140.0), 60.0, metrics())),
                ('B', Glyph::new(line(120.0), 55.0, other)),
            ],
        );
        assert!(matches!(result, Err(FontError::MetricsMismatch { ch: 'B', .. })));
    }

    #[test]
    fn test_resize_font_scales_everything() {
        let font = sample_font();
        let resized = resize_font(&font, 50.0).expect("resize");
        assert_eq!(resized.m_height(), 50.0);
        assert_eq!(resized.kerning(), 2.5);
        assert_eq!(resized.top(), -62.5);
        assert_eq!(resized.space_width(), 25.0);
        let a = resized.get_char('A').expect("A survives resize");
        assert_eq!(a.advance(), 30.0);
        assert!((a.length() - 70.0).abs() < 1e-9);
        assert_eq!(a.metrics(), resized.metrics());
    }

    #[test]
    fn test_resize_font_hits_size_exactly() {
        let resized = resize_font(&sample_font(), 33.3).expect("resize");
        assert_eq!(resized.m_height(), 33.3);
    }

    #[test]
    fn test_resize_font_map_rejects_mixed_metrics() {
        let mut letters = FontMap::new();
        letters.insert('A', Glyph::new(line(140.0), 60.0, metrics()));
        letters.insert('B', Glyph::new(line(120.0), 55.0, metrics().scaled(3.0)));
        assert!(matches!(
            resize_font_map(&letters, 20.0),
            Err(FontError::MetricsMismatch { .. })
        ));
    }

    #[test]
    fn test_resize_font_map_accepts_equal_but_distinct_metrics() {
        let mut letters = FontMap::new();
        letters.insert('A', Glyph::new(line(140.0), 60.0, metrics()));
        letters.insert('B', Glyph::new(line(120.0), 55.0, metrics()));
        let resized = resize_font_map(&letters, 200.0).expect("same values");
        assert_eq!(resized[&'B'].advance(), 110.0);
        assert_eq!(resized[&'A'].metrics().m_height, 200.0);
    }

    #[test]
    fn test_resize_empty_font_map() {
        assert!(resize_font_map(&FontMap::new(), 20.0).expect("empty").is_empty());
    }
}
