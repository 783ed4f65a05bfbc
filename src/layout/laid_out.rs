//! The result of laying out a paragraph
//!
//! A [`LaidOutParagraph`] is an immutable snapshot: rows with their vertical
//! metrics and the glyphs placed on them. It can be drawn in full or handed
//! to a [`PartialRenderer`] for length-bounded drawing.

use crate::font_source::Glyph;
use crate::rendering::context::DrawingContext;
use crate::rendering::partial::{draw_positioned, PartialRenderer};
use kurbo::Point;

/// Extent of one row, in paragraph coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowMetrics {
    /// Top of the space the font reserves for this row
    pub top: f64,
    /// Bottom of the space the font reserves for this row
    pub bottom: f64,
    /// y coordinate of this row's baseline
    pub baseline: f64,
    /// x coordinate where the row's first glyph starts
    pub left: f64,
    /// Horizontal space the row occupies, after justification
    pub width: f64,
}

impl RowMetrics {
    pub fn right(&self) -> f64 {
        self.left + self.width
    }
}

/// A glyph placed in the paragraph
///
/// `(x, y)` is where the glyph's own origin (left edge, on the baseline) lands.
#[derive(Debug, Clone)]
pub struct PositionedGlyph {
    pub glyph: Glyph,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone)]
pub struct LaidOutRow {
    pub metrics: RowMetrics,
    pub glyphs: Vec<PositionedGlyph>,
}

/// Rows in top to bottom order, glyphs left to right within each row
#[derive(Debug, Clone, Default)]
pub struct LaidOutParagraph {
    rows: Vec<LaidOutRow>,
}

impl LaidOutParagraph {
    pub(crate) fn new(rows: Vec<LaidOutRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[LaidOutRow] {
        &self.rows
    }

    /// Vertical (and horizontal) metrics of every row, in row order
    ///
    /// The last entry's `bottom` is the bottom of the paragraph.
    pub fn all_row_metrics(&self) -> Vec<RowMetrics> {
        self.rows.iter().map(|row| row.metrics).collect()
    }

    /// Every placed glyph in reading order
    pub fn glyphs(&self) -> impl Iterator<Item = &PositionedGlyph> {
        self.rows.iter().flat_map(|row| row.glyphs.iter())
    }

    /// Distance from the first row's top to the last row's bottom
    pub fn height(&self) -> f64 {
        match (self.rows.first(), self.rows.last()) {
            (Some(first), Some(last)) => last.metrics.bottom - first.metrics.top,
            _ => 0.0,
        }
    }

    /// Stroke every glyph, with the paragraph's origin at `(origin_x, origin_y)`
    pub fn draw_all(&self, context: &mut dyn DrawingContext, origin_x: f64, origin_y: f64) {
        let origin = Point::new(origin_x, origin_y);
        for placed in self.glyphs() {
            draw_positioned(placed, origin, None, context);
        }
    }

    /// Measure the paragraph as one continuous stroke, for drawing prefixes of it
    pub fn draw_partial(&self, origin_x: f64, origin_y: f64) -> PartialRenderer<'_> {
        PartialRenderer::new(self, Point::new(origin_x, origin_y))
    }
}
