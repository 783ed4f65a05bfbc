//! SVG output
//!
//! [`SvgContext`] is a [`DrawingContext`] that turns every stroke into an SVG
//! `<path>` element. One context produces one frame.

use crate::rendering::context::{DrawingContext, StateStack};
use kurbo::BezPath;
use std::fmt::Write as _;

/// Collects strokes into a standalone SVG document
#[derive(Debug, Clone)]
pub struct SvgContext {
    width: f64,
    height: f64,
    background: Option<String>,
    state: StateStack,
    body: String,
}

impl SvgContext {
    /// An empty, transparent canvas
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            background: None,
            state: StateStack::default(),
            body: String::new(),
        }
    }

    /// Fill the canvas with `color` behind every stroke
    pub fn with_background(mut self, color: impl Into<String>) -> Self {
        self.background = Some(color.into());
        self
    }

    /// Number of strokes drawn so far
    pub fn stroke_count(&self) -> usize {
        self.body.matches("<path ").count()
    }

    /// The complete SVG document
    pub fn to_document(&self) -> String {
        let mut document = String::new();
        let _ = writeln!(
            document,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = self.width,
            h = self.height
        );
        if let Some(background) = &self.background {
            let _ = writeln!(
                document,
                r#"  <rect width="100%" height="100%" fill="{}"/>"#,
                escape_attribute(background)
            );
        }
        document.push_str(&self.body);
        document.push_str("</svg>\n");
        document
    }
}

impl DrawingContext for SvgContext {
    fn set_stroke_style(&mut self, color: &str) {
        self.state.set_color(color);
    }

    fn set_line_width(&mut self, width: f64) {
        self.state.set_line_width(width);
    }

    fn set_global_alpha(&mut self, alpha: f64) {
        self.state.set_alpha(alpha);
    }

    fn save(&mut self) {
        self.state.save();
    }

    fn restore(&mut self) {
        self.state.restore();
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.state.translate(dx, dy);
    }

    fn scale(&mut self, sx: f64, sy: f64) {
        self.state.scale(sx, sy);
    }

    fn stroke_path(&mut self, path: &BezPath) {
        let device = self.state.to_device(path);
        let current = self.state.current();
        let _ = writeln!(
            self.body,
            r#"  <path d="{}" fill="none" stroke="{}" stroke-width="{}" stroke-opacity="{}" stroke-linecap="round" stroke-linejoin="round"/>"#,
            device.to_svg(),
            escape_attribute(&current.color),
            current.device_line_width(),
            current.alpha
        );
    }
}

fn escape_attribute(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
}
