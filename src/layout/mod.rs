//! Paragraph layout
//!
//! Turns text into rows of positioned glyphs: word wrapping against a
//! maximum row width, alignment, and vertical stacking of rows.

pub mod alignment;
pub mod laid_out;
pub mod paragraph;

pub use alignment::{Alignment, LastRowPolicy};
pub use laid_out::{LaidOutParagraph, LaidOutRow, PositionedGlyph, RowMetrics};
pub use paragraph::ParagraphLayout;
