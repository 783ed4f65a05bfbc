//! A single drawable character
//!
//! A glyph's shape can be given up front or derived lazily from a pure
//! factory. Derived shapes are computed at most once and then reused, so
//! reading [`Glyph::shape`] repeatedly always yields the same geometry.

use crate::font_source::metrics::FontMetrics;
use crate::geometry::PathShape;
use kurbo::Affine;
use std::fmt;
use std::sync::{Arc, OnceLock};

type ShapeFactory = Box<dyn Fn() -> PathShape + Send + Sync>;

enum ShapeSource {
    Fixed(PathShape),
    Derived {
        factory: ShapeFactory,
        cache: OnceLock<PathShape>,
    },
}

impl ShapeSource {
    fn shape(&self) -> &PathShape {
        match self {
            ShapeSource::Fixed(shape) => shape,
            ShapeSource::Derived { factory, cache } => cache.get_or_init(|| factory()),
        }
    }
}

/// One character of a stroke font
///
/// Cloning is cheap: clones share the same (possibly not yet derived) shape.
#[derive(Clone)]
pub struct Glyph {
    source: Arc<ShapeSource>,
    advance: f64,
    metrics: FontMetrics,
}

impl Glyph {
    /// A glyph with a ready-made shape
    ///
    /// `advance` is how far the print head moves after this glyph. The ink
    /// typically starts at x = 0 and ends at x = `advance`.
    pub fn new(shape: PathShape, advance: f64, metrics: FontMetrics) -> Self {
        Self {
            source: Arc::new(ShapeSource::Fixed(shape)),
            advance,
            metrics,
        }
    }

    /// A glyph whose shape is computed by `factory` the first time it is needed
    ///
    /// `factory` must be pure: the result is cached and never recomputed.
    pub fn derived<F>(factory: F, advance: f64, metrics: FontMetrics) -> Self
    where
        F: Fn() -> PathShape + Send + Sync + 'static,
    {
        Self {
            source: Arc::new(ShapeSource::Derived {
                factory: Box::new(factory),
                cache: OnceLock::new(),
            }),
            advance,
            metrics,
        }
    }

    pub fn shape(&self) -> &PathShape {
        self.source.shape()
    }

    pub fn advance(&self) -> f64 {
        self.advance
    }

    pub fn metrics(&self) -> &FontMetrics {
        &self.metrics
    }

    /// Arc length of the glyph's ink
    pub fn length(&self) -> f64 {
        self.shape().length()
    }

    /// The same glyph with a different shape
    pub fn reshape(&self, new_shape: PathShape) -> Self {
        Self::new(new_shape, self.advance, self.metrics)
    }

    /// One shape per continuous stroke, for effects that address strokes individually
    pub fn strokes(&self) -> Vec<PathShape> {
        self.shape().split_on_move()
    }

    /// This glyph scaled by `ratio`, carrying `metrics` as its new metrics
    ///
    /// The scaled shape is derived lazily from this glyph's shape.
    pub(crate) fn rescaled(&self, ratio: f64, metrics: FontMetrics) -> Self {
        let original = Arc::clone(&self.source);
        Self::derived(
            move || original.shape().transform(Affine::scale(ratio)),
            self.advance * ratio,
            metrics,
        )
    }
}

impl fmt::Debug for Glyph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let derived = match self.source.as_ref() {
            ShapeSource::Fixed(_) => "fixed",
            ShapeSource::Derived { cache, .. } if cache.get().is_some() => "derived",
            ShapeSource::Derived { .. } => "pending",
        };
        f.debug_struct("Glyph")
            .field("advance", &self.advance)
            .field("shape", &derived)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

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

    fn bar() -> PathShape {
        PathShape::from_svg("M0 0 L0 -100 M20 0 L20 -50").expect("valid path data")
    }

    #[test]
    fn test_derived_shape_is_computed_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let glyph = Glyph::derived(
            move || {
                counter.fetch_add(1, Ordering::SeqCst);
                bar()
            },
            20.0,
            metrics(),
        );
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        let first = glyph.shape().clone();
        let second = glyph.clone().shape().clone();
        assert_eq!(first, second);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_reshape_keeps_advance_and_metrics() {
        let glyph = Glyph::new(bar(), 20.0, metrics());
        let reshaped = glyph.reshape(PathShape::default());
        assert_eq!(reshaped.advance(), 20.0);
        assert_eq!(reshaped.metrics(), glyph.metrics());
        assert_eq!(reshaped.length(), 0.0);
        assert!((glyph.length() - 150.0).abs() < 1e-9);
    }

    #[test]
    fn test_strokes_split_each_subpath() {
        let glyph = Glyph::new(bar(), 20.0, metrics());
        let strokes = glyph.strokes();
        assert_eq!(strokes.len(), 2);
        assert!((strokes[1].length() - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_rescaled_scales_shape_and_advance() {
        let glyph = Glyph::new(bar(), 20.0, metrics());
        let doubled = glyph.rescaled(2.0, metrics().scaled(2.0));
        assert_eq!(doubled.advance(), 40.0);
        assert!((doubled.length() - 300.0).abs() < 1e-9);
        assert_eq!(doubled.metrics().m_height, 200.0);
    }
}
