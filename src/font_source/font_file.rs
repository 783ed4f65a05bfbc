//! JSON stroke font files
//!
//! ```json
//! {
//!   "metrics": { "mHeight": 100, "defaultKerning": 5, "top": -125, "bottom": 50,
//!                "capitalTop": -100, "strokeWidth": 10, "spaceWidth": 50 },
//!   "glyphs": { "A": { "path": "M0 0 L30 -100 L60 0", "advance": 60 } }
//! }
//! ```

use crate::font_source::font::{Font, FontError};
use crate::font_source::glyph::Glyph;
use crate::font_source::metrics::FontMetrics;
use crate::geometry::PathShape;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::debug;

/// On-disk representation of a [`Font`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontFile {
    pub metrics: FontMetrics,
    /// Keyed by the character, which must be a single `char`
    pub glyphs: BTreeMap<String, GlyphEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlyphEntry {
    /// SVG path data
    pub path: String,
    pub advance: f64,
}

impl FontFile {
    /// Capture a font so it can be written out
    pub fn from_font(font: &Font) -> Self {
        let glyphs = font
            .iter()
            .map(|(ch, glyph)| {
                (
                    ch.to_string(),
                    GlyphEntry {
                        path: glyph.shape().to_svg(),
                        advance: glyph.advance(),
                    },
                )
            })
            .collect();
        Self {
            metrics: *font.metrics(),
            glyphs,
        }
    }

    /// Build the font, validating keys and path data
    pub fn into_font(self) -> Result<Font, FontError> {
        let metrics = self.metrics;
        let mut letters = Vec::with_capacity(self.glyphs.len());
        for (key, entry) in self.glyphs {
            let mut chars = key.chars();
            let (Some(ch), None) = (chars.next(), chars.next()) else {
                return Err(FontError::InvalidGlyphKey(key));
            };
            let shape = PathShape::from_svg(&entry.path)
                .map_err(|source| FontError::InvalidGlyphPath { ch, source })?;
            letters.push((ch, Glyph::new(shape, entry.advance, metrics)));
        }
        Font::new(metrics, letters)
    }

    pub fn from_json(json: &str) -> Result<Self, FontError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, FontError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Read a font from a JSON font file
pub fn load_font(path: &Path) -> Result<Font, FontError> {
    let contents = fs::read_to_string(path).map_err(|source| FontError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let font = FontFile::from_json(&contents)?.into_font()?;
    debug!("Loaded {} glyphs from {:?}", font.len(), path);
    Ok(font)
}

/// Write a font as a JSON font file
pub fn save_font(font: &Font, path: &Path) -> Result<(), FontError> {
    let contents = FontFile::from_font(font).to_json()?;
    fs::write(path, contents).map_err(|source| FontError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("Saved {} glyphs to {:?}", font.len(), path);
    Ok(())
}
