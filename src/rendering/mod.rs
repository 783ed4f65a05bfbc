//! Drawing laid out text
//!
//! - [`context`]: the canvas-like drawing interface and a recording implementation
//! - [`partial`]: length-bounded drawing, one handwriting frame at a time
//! - [`layers`]: a main stroke with an optional outline or shadow underneath
//! - [`frames`]: sampling an animation into numbered still frames
//! - [`svg`]: writing frames out as SVG documents

pub mod context;
pub mod frames;
pub mod layers;
pub mod partial;
pub mod svg;

pub use context::{DrawCommand, DrawingContext, RecordingContext, StateStack, StrokeState};
pub use frames::{frame_budgets, frame_count, frame_file_name, frame_fractions};
pub use layers::{BottomLayer, BottomLayerPreset, LayeredAnimation, StrokeStyle};
pub use partial::PartialRenderer;
pub use svg::SvgContext;
