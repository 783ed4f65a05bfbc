//! Drawing context abstraction
//!
//! Everything in this crate draws through [`DrawingContext`], a small subset of
//! a 2D canvas API: stroke style, line width, alpha, a save/restore transform
//! stack and stroking a path made of lines and curves. The actual raster or
//! vector backend lives outside the core.

use kurbo::{Affine, BezPath, Vec2};

/// A 2D stroking surface, modelled on the HTML canvas API
pub trait DrawingContext {
    /// Color used by subsequent strokes (any CSS color string)
    fn set_stroke_style(&mut self, color: &str);
    /// Width used by subsequent strokes, in user units
    fn set_line_width(&mut self, width: f64);
    /// Opacity used by subsequent strokes, `0.0..=1.0`
    fn set_global_alpha(&mut self, alpha: f64);
    /// Push the current style and transform
    fn save(&mut self);
    /// Pop the style and transform pushed by the matching [`save`](Self::save)
    fn restore(&mut self);
    fn translate(&mut self, dx: f64, dy: f64);
    fn scale(&mut self, sx: f64, sy: f64);
    /// Stroke `path` with the current style, in the current user space
    fn stroke_path(&mut self, path: &BezPath);
}

/// Style and transform in effect for a stroke
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeState {
    pub color: String,
    pub line_width: f64,
    pub alpha: f64,
    pub transform: Affine,
}

impl Default for StrokeState {
    fn default() -> Self {
        Self {
            color: "#000000".to_string(),
            line_width: 1.0,
            alpha: 1.0,
            transform: Affine::IDENTITY,
        }
    }
}

impl StrokeState {
    /// Line width after the current transform is applied
    ///
    /// Exact for uniform scales, which is all this crate ever issues.
    pub fn device_line_width(&self) -> f64 {
        self.line_width * self.transform.determinant().abs().sqrt()
    }
}

/// The save/restore stack shared by the concrete contexts
#[derive(Debug, Clone, Default)]
pub struct StateStack {
    current: StrokeState,
    saved: Vec<StrokeState>,
}

impl StateStack {
    pub fn current(&self) -> &StrokeState {
        &self.current
    }

    pub fn set_color(&mut self, color: &str) {
        self.current.color = color.to_string();
    }

    pub fn set_line_width(&mut self, width: f64) {
        self.current.line_width = width;
    }

    pub fn set_alpha(&mut self, alpha: f64) {
        self.current.alpha = alpha.clamp(0.0, 1.0);
    }

    pub fn save(&mut self) {
        self.saved.push(self.current.clone());
    }

    /// Unbalanced restores are ignored, like the canvas API does
    pub fn restore(&mut self) {
        if let Some(state) = self.saved.pop() {
            self.current = state;
        }
    }

    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.current.transform = self.current.transform * Affine::translate(Vec2::new(dx, dy));
    }

    pub fn scale(&mut self, sx: f64, sy: f64) {
        self.current.transform = self.current.transform * Affine::scale_non_uniform(sx, sy);
    }

    /// Map a user-space path into device space
    pub fn to_device(&self, path: &BezPath) -> BezPath {
        self.current.transform * path.clone()
    }
}

/// One recorded stroke, already mapped into device space
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Stroke {
        path: BezPath,
        color: String,
        line_width: f64,
        alpha: f64,
    },
}

impl DrawCommand {
    pub fn path(&self) -> &BezPath {
        match self {
            DrawCommand::Stroke { path, .. } => path,
        }
    }
}

/// A [`DrawingContext`] that records every stroke it is asked to make
///
/// Used by the frame sampler's tests and by anything that needs to compare
/// two renderings command by command.
#[derive(Debug, Clone, Default)]
pub struct RecordingContext {
    state: StateStack,
    commands: Vec<DrawCommand>,
}

impl RecordingContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn into_commands(self) -> Vec<DrawCommand> {
        self.commands
    }

    /// Forget recorded strokes, keeping the current style
    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

impl DrawingContext for RecordingContext {
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
        let current = self.state.current();
        self.commands.push(DrawCommand::Stroke {
            path: self.state.to_device(path),
            color: current.color.clone(),
            line_width: current.device_line_width(),
            alpha: current.alpha,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::{PathEl, Point};

    fn unit_line() -> BezPath {
        let mut path = BezPath::new();
        path.move_to((0.0, 0.0));
        path.line_to((1.0, 0.0));
        path
    }

    #[test]
    fn test_translate_maps_into_device_space() {
        let mut context = RecordingContext::new();
        context.translate(10.0, 5.0);
        context.stroke_path(&unit_line());

        let elements = context.commands()[0].path().elements().to_vec();
        assert_eq!(elements[0], PathEl::MoveTo(Point::new(10.0, 5.0)));
        assert_eq!(elements[1], PathEl::LineTo(Point::new(11.0, 5.0)));
    }

    #[test]
    fn test_restore_resets_transform_and_style() {
        let mut context = RecordingContext::new();
        context.set_stroke_style("#ff0000");
        context.save();
        context.translate(3.0, 4.0);
        context.set_stroke_style("#00ff00");
        context.restore();
        context.stroke_path(&unit_line());

        match &context.commands()[0] {
            DrawCommand::Stroke { path, color, .. } => {
                assert_eq!(color, "#ff0000");
                assert_eq!(path.elements()[0], PathEl::MoveTo(Point::ORIGIN));
            }
        }
    }

    #[test]
    fn test_scale_widens_strokes() {
        let mut context = RecordingContext::new();
        context.set_line_width(2.0);
        context.scale(3.0, 3.0);
        context.stroke_path(&unit_line());

        match &context.commands()[0] {
            DrawCommand::Stroke { line_width, .. } => assert!((line_width - 6.0).abs() < 1e-12),
        }
    }

    #[test]
    fn test_unbalanced_restore_is_ignored() {
        let mut context = RecordingContext::new();
        context.set_global_alpha(0.5);
        context.restore();
        context.stroke_path(&unit_line());

        match &context.commands()[0] {
            DrawCommand::Stroke { alpha, .. } => assert_eq!(*alpha, 0.5),
        }
    }
}
