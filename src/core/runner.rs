//! Application runner logic
//!
//! Drives one run of the program: font, layout, canvas, frames.

use crate::core::cli::{CliArgs, Settings};
use crate::core::config_file::ConfigFile;
use crate::font_source::{load_font, make_line_font, resize_font, Font, LineFontMetrics};
use crate::layout::{LaidOutParagraph, ParagraphLayout};
use crate::rendering::{frame_count, frame_file_name, frame_fractions, SvgContext};
use anyhow::{Context, Result};
use kurbo::Point;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

const PREVIEW_FILE_NAME: &str = "preview.svg";

/// Size of the output image and where the paragraph sits on it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Canvas {
    pub width: f64,
    pub height: f64,
    pub margin: f64,
    /// Paragraph origin, chosen so the first row's top sits on the top margin
    pub origin: Point,
}

impl Canvas {
    /// Fit a canvas around `paragraph`, with half a line height of margin on every side
    pub fn fit(font: &Font, paragraph: &LaidOutParagraph, max_width: f64) -> Self {
        let margin = (font.bottom() - font.top()) / 2.0;
        let first_row_top = paragraph
            .rows()
            .first()
            .map_or(0.0, |row| row.metrics.top);
        Self {
            width: max_width + 2.0 * margin,
            height: paragraph.height() + 2.0 * margin,
            margin,
            origin: Point::new(margin, margin - first_row_top),
        }
    }

    /// A blank frame, transparent unless `background` is given
    fn new_frame(&self, background: Option<&str>) -> SvgContext {
        let frame = SvgContext::new(self.width, self.height);
        match background {
            Some(color) => frame.with_background(color),
            None => frame,
        }
    }
}

/// The font for this run, at the requested size
pub fn build_font(settings: &Settings) -> Result<Font> {
    match &settings.font {
        Some(path) => {
            let font = load_font(path)
                .with_context(|| format!("Failed to load font {}", path.display()))?;
            if font.m_height() == settings.font_size {
                return Ok(font);
            }
            debug!(
                "Resizing {} from {} to {}",
                path.display(),
                font.m_height(),
                settings.font_size
            );
            Ok(resize_font(&font, settings.font_size)?)
        }
        None => Ok(make_line_font(LineFontMetrics::new(
            settings.font_size,
            settings.line_font_stroke_width(),
        ))?),
    }
}

/// Lay out `text` with the run's width and alignment
pub fn layout_text(font: &Font, text: &str, settings: &Settings) -> LaidOutParagraph {
    let mut layout = ParagraphLayout::new(font);
    layout.add_text(text);
    let skipped = layout.skipped_characters();
    if !skipped.is_empty() {
        let skipped: String = skipped.into_iter().collect();
        warn!("The font has no glyphs for {:?}; they are left out", skipped);
    }
    layout.align_with_policy(settings.max_width, settings.alignment, settings.last_row)
}

fn write_frame(context: &SvgContext, path: &Path) -> Result<()> {
    fs::write(path, context.to_document())
        .with_context(|| format!("Failed to write {}", path.display()))
}

/// Render the frames (or the single preview) described by `settings`
///
/// Returns the paths written, in order.
pub fn render(
    font: &Font,
    paragraph: &LaidOutParagraph,
    settings: &Settings,
) -> Result<Vec<PathBuf>> {
    let canvas = Canvas::fit(font, paragraph, settings.max_width);
    let renderer = paragraph.draw_partial(canvas.origin.x, canvas.origin.y);
    let animation = settings.animation(font);
    let background = settings.background.as_deref();
    debug!(
        "Canvas {}x{}, {} rows, {} units of ink",
        canvas.width,
        canvas.height,
        paragraph.rows().len(),
        renderer.total_length()
    );

    fs::create_dir_all(&settings.output)
        .with_context(|| format!("Failed to create {}", settings.output.display()))?;

    if let Some(progress) = settings.progress {
        let mut context = canvas.new_frame(background);
        animation.draw_frame(&renderer, progress, &mut context);
        let path = settings.output.join(PREVIEW_FILE_NAME);
        write_frame(&context, &path)?;
        return Ok(vec![path]);
    }

    let count = settings
        .frames
        .unwrap_or_else(|| frame_count(animation.total_time(), settings.fps));
    info!("Rendering {} frames into {}", count, settings.output.display());

    let mut written = Vec::with_capacity(count);
    for (index, fraction) in frame_fractions(count).enumerate() {
        let mut context = canvas.new_frame(background);
        animation.draw_frame(&renderer, fraction, &mut context);
        let path = settings.output.join(frame_file_name(index));
        write_frame(&context, &path)?;
        written.push(path);
    }
    Ok(written)
}

/// Run the application with the given CLI arguments.
/// Handles special CLI flags, then renders the requested frames.
pub fn run_app(cli_args: CliArgs) -> Result<()> {
    if cli_args.new_config {
        return ConfigFile::initialize_config_directory()
            .context("Failed to initialize config directory");
    }

    cli_args.validate().map_err(anyhow::Error::msg)?;
    let settings = cli_args.resolve(ConfigFile::load().as_ref());
    let text = cli_args.read_text()?;

    let font = build_font(&settings)?;
    let paragraph = layout_text(&font, &text, &settings);
    let written = render(&font, &paragraph, &settings)?;

    println!(
        "Wrote {} file(s) to {}",
        written.len(),
        settings.output.display()
    );
    Ok(())
}
