//! Font source data structures
//!
//! This module contains everything related to the stroke fonts being laid
//! out: metrics, glyphs, fonts, the built-in line font and font files.

pub mod font;
pub mod font_file;
pub mod glyph;
pub mod line_font;
pub mod metrics;

// Explicit re-exports for public API
pub use font::{resize_font, resize_font_map, Font, FontError, FontMap, WordLookup};
pub use font_file::{load_font, save_font, FontFile, GlyphEntry};
pub use glyph::Glyph;
pub use line_font::{make_line_font, LineFontMetrics};
pub use metrics::FontMetrics;
