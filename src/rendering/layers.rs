//! Two-layer handwriting animation
//!
//! The text can be drawn twice: an optional bottom layer (an outline, a
//! drop shadow, an extrusion) underneath the main stroke. Each layer reveals
//! the same paragraph over the same duration, and the bottom layer may start
//! a little before or after the top one.

use crate::rendering::context::DrawingContext;
use crate::rendering::partial::PartialRenderer;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// How one layer is stroked
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrokeStyle {
    pub color: String,
    pub width: f64,
    pub alpha: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl StrokeStyle {
    /// An opaque, unshifted stroke
    pub fn solid(color: impl Into<String>, width: f64) -> Self {
        Self {
            color: color.into(),
            width,
            alpha: 1.0,
            offset_x: 0.0,
            offset_y: 0.0,
        }
    }

    fn apply(&self, context: &mut dyn DrawingContext) {
        context.set_stroke_style(&self.color);
        context.set_line_width(self.width);
        context.set_global_alpha(self.alpha);
        context.translate(self.offset_x, self.offset_y);
    }
}

/// Ready-made bottom layers, derived from the top layer's line width
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum BottomLayerPreset {
    /// A slightly wider black stroke directly underneath
    SimpleOutline,
    /// A translucent black stroke shifted down and to the right
    BigShadow,
    /// A thin pink stroke peeking out below and to the right
    Extruded,
}

/// Direction the shadow presets are shifted in
const SHADOW_ANGLE_DEGREES: f64 = 60.0;

impl BottomLayerPreset {
    pub fn style(self, line_width: f64) -> StrokeStyle {
        let (sin, cos) = SHADOW_ANGLE_DEGREES.to_radians().sin_cos();
        match self {
            BottomLayerPreset::SimpleOutline => StrokeStyle::solid("#000000", line_width * 1.25),
            BottomLayerPreset::BigShadow => {
                let distance = line_width * 0.8;
                StrokeStyle {
                    color: "#000000".to_string(),
                    width: line_width * 1.1,
                    alpha: 0.5,
                    offset_x: cos * distance,
                    offset_y: sin * distance,
                }
            }
            BottomLayerPreset::Extruded => {
                let distance = line_width / 3.0;
                StrokeStyle {
                    color: "#ff0894".to_string(),
                    width: line_width / 3.0,
                    alpha: 1.0,
                    offset_x: cos * distance,
                    offset_y: sin * distance,
                }
            }
        }
    }
}

/// The layer drawn underneath the text
#[derive(Debug, Clone, PartialEq)]
pub struct BottomLayer {
    pub style: StrokeStyle,
    /// Seconds the bottom layer starts after the top layer; negative starts it earlier
    pub delay: f64,
}

/// Timing and styling of a complete reveal
#[derive(Debug, Clone, PartialEq)]
pub struct LayeredAnimation {
    pub top: StrokeStyle,
    pub bottom: Option<BottomLayer>,
    /// Seconds each layer takes to draw completely
    pub duration: f64,
}

impl LayeredAnimation {
    pub fn new(top: StrokeStyle, duration: f64) -> Self {
        Self {
            top,
            bottom: None,
            duration,
        }
    }

    pub fn with_bottom(mut self, bottom: BottomLayer) -> Self {
        self.bottom = Some(bottom);
        self
    }

    fn delay(&self) -> f64 {
        self.bottom.as_ref().map_or(0.0, |bottom| bottom.delay)
    }

    /// Time from the first stroke of either layer to the last
    pub fn total_time(&self) -> f64 {
        self.duration + self.delay().abs()
    }

    /// Seconds after the start of the animation at which each layer starts
    fn start_times(&self) -> (f64, f64) {
        let delay = self.delay();
        ((-delay).max(0.0), delay.max(0.0))
    }

    /// Fraction of a layer drawn when `fraction` of the whole animation has elapsed
    fn layer_progress(&self, fraction: f64, start: f64) -> f64 {
        if self.duration <= 0.0 {
            return if fraction > 0.0 { 1.0 } else { 0.0 };
        }
        (fraction * (self.total_time() / self.duration) - start / self.duration).clamp(0.0, 1.0)
    }

    /// Progress of the top layer and, if there is one, the bottom layer
    pub fn progress_at(&self, fraction: f64) -> (f64, Option<f64>) {
        let (top_start, bottom_start) = self.start_times();
        let top = self.layer_progress(fraction, top_start);
        let bottom = self
            .bottom
            .as_ref()
            .map(|_| self.layer_progress(fraction, bottom_start));
        (top, bottom)
    }

    /// Draw the frame `fraction` (0 to 1) of the way through the animation
    ///
    /// The bottom layer goes down first so the top layer covers it.
    pub fn draw_frame(
        &self,
        renderer: &PartialRenderer<'_>,
        fraction: f64,
        context: &mut dyn DrawingContext,
    ) {
        let (top_progress, bottom_progress) = self.progress_at(fraction);
        if let (Some(bottom), Some(progress)) = (&self.bottom, bottom_progress) {
            draw_layer(renderer, &bottom.style, progress, context);
        }
        draw_layer(renderer, &self.top, top_progress, context);
    }
}

fn draw_layer(
    renderer: &PartialRenderer<'_>,
    style: &StrokeStyle,
    progress: f64,
    context: &mut dyn DrawingContext,
) {
    context.save();
    style.apply(context);
    renderer.draw_to(progress * renderer.total_length(), context);
    context.restore();
}
