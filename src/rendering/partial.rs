//! Length-bounded drawing of a whole paragraph
//!
//! The paragraph's glyphs are put end to end, in reading order, on a single
//! distance axis. Only ink counts: the gaps between glyphs and words add no
//! length. [`PartialRenderer::draw_to`] then strokes everything up to a given
//! distance along that axis, which is one frame of the handwriting reveal.

use crate::layout::laid_out::{LaidOutParagraph, PositionedGlyph};
use crate::rendering::context::DrawingContext;
use kurbo::Point;

/// Stroke one placed glyph, in full or up to `budget` units of its length
pub(crate) fn draw_positioned(
    placed: &PositionedGlyph,
    origin: Point,
    budget: Option<f64>,
    context: &mut dyn DrawingContext,
) {
    context.save();
    context.translate(origin.x + placed.x, origin.y + placed.y);
    match budget {
        None => placed.glyph.shape().draw(context),
        Some(budget) => placed.glyph.shape().draw_up_to(budget, context),
    }
    context.restore();
}

/// A laid out paragraph measured as one continuous stroke
///
/// Holds no drawing state: every call to [`draw_to`](Self::draw_to) starts
/// from scratch, so frames can be drawn in any order, any number of times.
#[derive(Debug, Clone)]
pub struct PartialRenderer<'a> {
    paragraph: &'a LaidOutParagraph,
    origin: Point,
    /// Distance along the axis at which each glyph, in reading order, ends
    glyph_ends: Vec<f64>,
}

impl<'a> PartialRenderer<'a> {
    pub(crate) fn new(paragraph: &'a LaidOutParagraph, origin: Point) -> Self {
        let mut along = 0.0;
        let glyph_ends = paragraph
            .glyphs()
            .map(|placed| {
                along += placed.glyph.length();
                along
            })
            .collect();
        Self {
            paragraph,
            origin,
            glyph_ends,
        }
    }

    /// Sum of the ink length of every placed glyph
    pub fn total_length(&self) -> f64 {
        self.glyph_ends.last().copied().unwrap_or(0.0)
    }

    pub fn origin(&self) -> Point {
        self.origin
    }

    /// Stroke the first `length` units of ink
    ///
    /// Glyphs that end at or before `length` are stroked exactly as
    /// [`LaidOutParagraph::draw_all`] strokes them; the glyph that straddles
    /// `length` is cut short and nothing after it is drawn. Non-positive
    /// lengths draw nothing, and lengths past [`total_length`](Self::total_length)
    /// draw everything.
    pub fn draw_to(&self, length: f64, context: &mut dyn DrawingContext) {
        if length <= 0.0 {
            return;
        }
        let mut glyph_start = 0.0;
        for (placed, &glyph_end) in self.paragraph.glyphs().zip(&self.glyph_ends) {
            if glyph_end <= length {
                draw_positioned(placed, self.origin, None, context);
                glyph_start = glyph_end;
                continue;
            }
            let budget = length - glyph_start;
            if budget > 0.0 {
                draw_positioned(placed, self.origin, Some(budget), context);
            }
            return;
        }
    }

    /// Stroke `progress` (0 to 1) of the paragraph
    pub fn draw_progress(&self, progress: f64, context: &mut dyn DrawingContext) {
        self.draw_to(progress * self.total_length(), context);
    }

    /// Stroke the whole paragraph
    pub fn draw_all(&self, context: &mut dyn DrawingContext) {
        self.paragraph
            .draw_all(context, self.origin.x, self.origin.y);
    }
}
