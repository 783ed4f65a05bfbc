//! Paragraph layout: word wrapping and alignment
//!
//! Text is accumulated as a stream of words and explicit line breaks. Every
//! call to [`ParagraphLayout::align`] lays the whole stream out again from
//! scratch, so text can be added between calls freely.

use crate::font_source::{Font, Glyph};
use crate::layout::alignment::{Alignment, LastRowPolicy};
use crate::layout::laid_out::{LaidOutParagraph, LaidOutRow, PositionedGlyph, RowMetrics};
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Word(String),
    LineBreak,
}

/// A word resolved against the font
#[derive(Debug, Clone)]
struct MeasuredWord {
    glyphs: Vec<Glyph>,
    width: f64,
}

/// A row being filled during line breaking
#[derive(Debug, Default)]
struct RowInProgress {
    words: Vec<MeasuredWord>,
    /// Natural width: words plus one space between each pair
    width: f64,
    /// Closed by an explicit line break rather than by running out of room
    ends_with_break: bool,
}

/// Accumulates text for one font and lays it out on demand
#[derive(Debug, Clone)]
pub struct ParagraphLayout<'f> {
    font: &'f Font,
    tokens: Vec<Token>,
}

impl<'f> ParagraphLayout<'f> {
    pub fn new(font: &'f Font) -> Self {
        Self {
            font,
            tokens: Vec::new(),
        }
    }

    pub fn font(&self) -> &'f Font {
        self.font
    }

    /// Append `text` to the paragraph
    ///
    /// Words are maximal runs of non-whitespace characters. Every newline
    /// forces a row break; any other whitespace only separates words.
    pub fn add_text(&mut self, text: &str) {
        let mut word = String::new();
        for ch in text.chars() {
            if ch.is_whitespace() {
                if !word.is_empty() {
                    self.tokens.push(Token::Word(std::mem::take(&mut word)));
                }
                if ch == '\n' {
                    self.tokens.push(Token::LineBreak);
                }
            } else {
                word.push(ch);
            }
        }
        if !word.is_empty() {
            self.tokens.push(Token::Word(word));
        }
    }

    /// Number of words and line breaks added so far
    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }

    /// Every character the font could not draw, in text order
    pub fn skipped_characters(&self) -> Vec<char> {
        self.tokens
            .iter()
            .filter_map(|token| match token {
                Token::Word(word) => Some(self.font.get_word(word).skipped),
                Token::LineBreak => None,
            })
            .flatten()
            .collect()
    }

    /// Lay the paragraph out with rows at most `max_width` wide
    ///
    /// Justified text leaves paragraph-ending rows left aligned.
    pub fn align(&self, max_width: f64, alignment: Alignment) -> LaidOutParagraph {
        self.align_with_policy(max_width, alignment, LastRowPolicy::default())
    }

    /// Like [`align`](Self::align), choosing what justification does with
    /// rows that end a paragraph
    pub fn align_with_policy(
        &self,
        max_width: f64,
        alignment: Alignment,
        last_row: LastRowPolicy,
    ) -> LaidOutParagraph {
        let rows = self.break_rows(max_width);
        let row_height = self.font.bottom() - self.font.top();
        let row_count = rows.len();
        let mut laid_out = Vec::with_capacity(row_count);
        let mut top = self.font.top();
        for (index, row) in rows.into_iter().enumerate() {
            let ends_paragraph = index + 1 == row_count || row.ends_with_break;
            let stretch = alignment == Alignment::Justify
                && row.words.len() > 1
                && (!ends_paragraph || last_row == LastRowPolicy::Justify);
            let bottom = top + row_height;
            let baseline = top - self.font.top();
            laid_out.push(self.place_row(row, top, bottom, baseline, max_width, alignment, stretch));
            top = bottom;
        }
        debug!(
            "Laid out {} tokens into {} rows (max width {}, {})",
            self.tokens.len(),
            row_count,
            max_width,
            alignment
        );
        LaidOutParagraph::new(laid_out)
    }

    /// Greedy line breaking; never splits a word
    fn break_rows(&self, max_width: f64) -> Vec<RowInProgress> {
        let mut rows = Vec::new();
        let mut current = RowInProgress::default();
        for token in &self.tokens {
            let word = match token {
                Token::LineBreak => {
                    current.ends_with_break = true;
                    rows.push(std::mem::take(&mut current));
                    continue;
                }
                Token::Word(word) => word,
            };
            let lookup = self.font.get_word(word);
            if !lookup.is_complete() {
                debug!("No glyph for {:?} in {:?}; skipping", lookup.skipped, word);
            }
            if lookup.glyphs.is_empty() {
                continue;
            }
            let width = lookup.width(self.font.kerning());
            let mut added = if current.words.is_empty() {
                width
            } else {
                width + self.font.space_width()
            };
            if !current.words.is_empty() && current.width + added > max_width {
                rows.push(std::mem::take(&mut current));
                added = width;
            }
            current.width += added;
            current.words.push(MeasuredWord {
                glyphs: lookup.glyphs,
                width,
            });
        }
        if !self.tokens.is_empty() {
            rows.push(current);
        }
        rows
    }

    #[allow(clippy::too_many_arguments)]
    fn place_row(
        &self,
        row: RowInProgress,
        top: f64,
        bottom: f64,
        baseline: f64,
        max_width: f64,
        alignment: Alignment,
        stretch: bool,
    ) -> LaidOutRow {
        let space = self.font.space_width();
        let kerning = self.font.kerning();
        let (left, gap, width) = if stretch {
            let gaps = (row.words.len() - 1) as f64;
            (0.0, space + (max_width - row.width) / gaps, max_width)
        } else {
            (alignment.row_start(max_width, row.width), space, row.width)
        };

        let mut glyphs = Vec::new();
        let mut word_start = left;
        for word in row.words {
            let mut x = word_start;
            for glyph in word.glyphs {
                let advance = glyph.advance();
                glyphs.push(PositionedGlyph {
                    glyph,
                    x,
                    y: baseline,
                });
                x += advance + kerning;
            }
            word_start += word.width + gap;
        }

        LaidOutRow {
            metrics: RowMetrics {
                top,
                bottom,
                baseline,
                left,
                width,
            },
            glyphs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font_source::FontMetrics;
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

    /// A: advance 60, ink 140. B: advance 55, ink 120. Kerning 5, space 50.
    fn font() -> Font {
        Font::new(
            metrics(),
            [
                ('A', Glyph::new(line(140.0), 60.0, metrics())),
                ('B', Glyph::new(line(120.0), 55.0, metrics())),
            ],
        )
        .expect("uniform metrics")
    }

    fn layout<'f>(font: &'f Font, text: &str) -> ParagraphLayout<'f> {
        let mut layout = ParagraphLayout::new(font);
        layout.add_text(text);
        layout
    }

    #[test]
    fn test_tokenize_words_and_breaks() {
        let font = font();
        let layout = layout(&font, "  AB\tA \nB\n\n");
        assert_eq!(
            layout.tokens,
            vec![
                Token::Word("AB".to_string()),
                Token::Word("A".to_string()),
                Token::LineBreak,
                Token::Word("B".to_string()),
                Token::LineBreak,
                Token::LineBreak,
            ]
        );
    }

    #[test]
    fn test_add_text_appends() {
        let font = font();
        let mut layout = layout(&font, "AB");
        layout.add_text(" BA");
        assert_eq!(layout.token_count(), 2);
        let laid_out = layout.align(10_000.0, Alignment::Left);
        assert_eq!(laid_out.glyphs().count(), 4);
    }

    #[test]
    fn test_single_row_width_includes_kerning() {
        let font = font();
        let laid_out = layout(&font, "AB").align(10_000.0, Alignment::Left);
        let rows = laid_out.all_row_metrics();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].width, 120.0);
        let xs: Vec<f64> = laid_out.glyphs().map(|placed| placed.x).collect();
        assert_eq!(xs, vec![0.0, 65.0]);
    }

    #[test]
    fn test_words_wrap_at_max_width() {
        let font = font();
        // "AB" is 120 wide; two of them plus a space is 290
        let laid_out = layout(&font, "AB AB AB").align(300.0, Alignment::Left);
        let rows = laid_out.all_row_metrics();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].width, 290.0);
        assert_eq!(rows[1].width, 120.0);
    }

    #[test]
    fn test_over_wide_word_gets_its_own_row() {
        let font = font();
        let laid_out = layout(&font, "A ABABAB B").align(100.0, Alignment::Left);
        let rows = laid_out.all_row_metrics();
        assert_eq!(rows.len(), 3);
        assert!(rows[1].width > 100.0);
        assert_eq!(laid_out.rows()[1].glyphs.len(), 6);
    }

    #[test]
    fn test_explicit_breaks_make_rows() {
        let font = font();
        let laid_out = layout(&font, "A\n\nB").align(10_000.0, Alignment::Left);
        let rows = laid_out.rows();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].glyphs.len(), 1);
        assert!(rows[1].glyphs.is_empty());
        assert_eq!(rows[2].glyphs.len(), 1);
    }

    #[test]
    fn test_vertical_stacking() {
        let font = font();
        let laid_out = layout(&font, "A\nB\nA").align(10_000.0, Alignment::Left);
        let rows = laid_out.all_row_metrics();
        assert_eq!(rows[0].top, -125.0);
        assert_eq!(rows[0].bottom, 50.0);
        assert_eq!(rows[0].baseline, 0.0);
        assert_eq!(rows[1].top, 50.0);
        assert_eq!(rows[1].baseline, 175.0);
        assert_eq!(rows[2].bottom, 400.0);
        assert_eq!(laid_out.height(), 525.0);
        assert_eq!(laid_out.rows()[1].glyphs[0].y, 175.0);
    }

    #[test]
    fn test_right_and_center() {
        let font = font();
        let right = layout(&font, "AB").align(200.0, Alignment::Right);
        assert_eq!(right.all_row_metrics()[0].left, 80.0);
        assert_eq!(right.glyphs().next().map(|placed| placed.x), Some(80.0));

        let center = layout(&font, "AB").align(200.0, Alignment::Center);
        assert_eq!(center.all_row_metrics()[0].left, 40.0);
    }

    #[test]
    fn test_justify_fills_non_final_rows() {
        let font = font();
        // Row 1: "A A" (60 + 50 + 60 = 170), row 2: "B"
        let laid_out = layout(&font, "A A B").align(200.0, Alignment::Justify);
        let rows = laid_out.all_row_metrics();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].width, 200.0);
        let first_row = &laid_out.rows()[0].glyphs;
        assert_eq!(first_row[1].x + first_row[1].glyph.advance(), 200.0);
        assert_eq!(rows[1].left, 0.0);
        assert_eq!(rows[1].width, 55.0);
    }

    #[test]
    fn test_justify_last_row_policy() {
        let font = font();
        let layout = layout(&font, "A A B B");
        let kept = layout.align(200.0, Alignment::Justify);
        assert_eq!(kept.all_row_metrics()[1].width, 160.0);

        let stretched = layout.align_with_policy(200.0, Alignment::Justify, LastRowPolicy::Justify);
        assert_eq!(stretched.all_row_metrics()[1].width, 200.0);
    }

    #[test]
    fn test_justify_skips_rows_closed_by_line_break() {
        let font = font();
        let laid_out = layout(&font, "A A\nB").align(200.0, Alignment::Justify);
        assert_eq!(laid_out.all_row_metrics()[0].width, 170.0);
    }

    #[test]
    fn test_unmapped_characters_are_skipped() {
        let font = font();
        let layout = layout(&font, "AxB zz A");
        assert_eq!(layout.skipped_characters(), vec!['x', 'z', 'z']);
        let laid_out = layout.align(10_000.0, Alignment::Left);
        // "AB" (120), space, "A" (60): the all-unknown word vanishes
        assert_eq!(laid_out.all_row_metrics()[0].width, 230.0);
        assert_eq!(laid_out.glyphs().count(), 3);
    }

    #[test]
    fn test_empty_text_has_no_rows() {
        let font = font();
        let laid_out = layout(&font, " \t ").align(100.0, Alignment::Left);
        assert!(laid_out.rows().is_empty());
        assert_eq!(laid_out.height(), 0.0);
    }

    #[test]
    fn test_align_is_repeatable() {
        let font = font();
        let layout = layout(&font, "AB BA\nA");
        let first = layout.align(150.0, Alignment::Center).all_row_metrics();
        let second = layout.align(150.0, Alignment::Center).all_row_metrics();
        assert_eq!(first, second);
    }
}
