//! Immutable stroke paths with arc-length aware drawing
//!
//! A [`PathShape`] is an ordered list of subpaths, each one starting at a
//! move-to and continuing with lines and curves. Besides the usual affine
//! transform it knows its own arc length and can stroke any leading portion
//! of itself, measured along the path in definition order. That is what the
//! handwriting reveal is built on.

use crate::rendering::context::DrawingContext;
use kurbo::{Affine, BezPath, ParamCurve, ParamCurveArclen, PathEl, PathSeg};
use std::sync::OnceLock;
use thiserror::Error;

/// Accuracy passed to kurbo's arc length routines, in path units
pub const ARCLEN_ACCURACY: f64 = 1e-6;

#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("invalid SVG path data: {0}")]
    InvalidPathData(#[from] kurbo::SvgParseError),
}

/// An immutable sequence of subpaths
///
/// Arc lengths are measured on first use and cached. The cache never changes
/// what [`length`](Self::length) reports or what gets drawn.
#[derive(Debug, Clone, Default)]
pub struct PathShape {
    subpaths: Vec<BezPath>,
    measure: OnceLock<PathMeasure>,
}

/// Cumulative arc lengths, walked in definition order
#[derive(Debug, Clone)]
struct PathMeasure {
    /// Distance from the start of the shape to the end of each subpath
    subpath_ends: Vec<f64>,
    /// Distance from the start of each subpath to the end of each of its segments
    segment_ends: Vec<Vec<f64>>,
}

impl PartialEq for PathShape {
    fn eq(&self, other: &Self) -> bool {
        self.subpaths == other.subpaths
    }
}

impl PathShape {
    /// Build a shape from a kurbo path, splitting it at every move-to
    pub fn new(path: &BezPath) -> Self {
        let mut subpaths: Vec<BezPath> = Vec::new();
        for element in path.elements() {
            match element {
                PathEl::MoveTo(_) => {
                    subpaths.push(BezPath::from_vec(vec![*element]));
                }
                _ => match subpaths.last_mut() {
                    Some(current) => current.push(*element),
                    // kurbo paths always start with a move-to; anything else is noise
                    None => continue,
                },
            }
        }
        Self::from_subpaths(subpaths)
    }

    fn from_subpaths(subpaths: Vec<BezPath>) -> Self {
        Self {
            subpaths,
            measure: OnceLock::new(),
        }
    }

    /// Parse SVG path data (the `d` attribute)
    pub fn from_svg(data: &str) -> Result<Self, GeometryError> {
        let path = BezPath::from_svg(data)?;
        Ok(Self::new(&path))
    }

    /// SVG path data for the whole shape
    pub fn to_svg(&self) -> String {
        self.to_bez_path().to_svg()
    }

    /// All subpaths joined back into one kurbo path
    pub fn to_bez_path(&self) -> BezPath {
        let mut joined = BezPath::new();
        for subpath in &self.subpaths {
            for element in subpath.elements() {
                joined.push(*element);
            }
        }
        joined
    }

    pub fn subpaths(&self) -> &[BezPath] {
        &self.subpaths
    }

    pub fn subpath_count(&self) -> usize {
        self.subpaths.len()
    }

    /// Number of drawable segments in each subpath, including implicit closing lines
    pub fn segment_counts(&self) -> Vec<usize> {
        self.subpaths
            .iter()
            .map(|subpath| subpath.segments().count())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.subpaths.is_empty()
    }

    /// Apply `affine` to every point, keeping subpath and segment order intact
    pub fn transform(&self, affine: Affine) -> Self {
        Self::from_subpaths(
            self.subpaths
                .iter()
                .map(|subpath| affine * subpath.clone())
                .collect(),
        )
    }

    /// One shape per subpath, in the original order
    pub fn split_on_move(&self) -> Vec<PathShape> {
        self.subpaths
            .iter()
            .map(|subpath| Self::from_subpaths(vec![subpath.clone()]))
            .collect()
    }

    /// Total arc length of every segment of every subpath
    pub fn length(&self) -> f64 {
        self.measure().subpath_ends.last().copied().unwrap_or(0.0)
    }

    fn measure(&self) -> &PathMeasure {
        self.measure.get_or_init(|| {
            let mut subpath_ends = Vec::with_capacity(self.subpaths.len());
            let mut segment_ends = Vec::with_capacity(self.subpaths.len());
            let mut total = 0.0;
            for subpath in &self.subpaths {
                let mut along = 0.0;
                let ends: Vec<f64> = subpath
                    .segments()
                    .map(|segment| {
                        along += segment_length(&segment);
                        along
                    })
                    .collect();
                total += along;
                subpath_ends.push(total);
                segment_ends.push(ends);
            }
            PathMeasure {
                subpath_ends,
                segment_ends,
            }
        })
    }

    /// Stroke the whole shape, one stroke per subpath
    pub fn draw(&self, context: &mut dyn DrawingContext) {
        for subpath in &self.subpaths {
            context.stroke_path(subpath);
        }
    }

    /// Stroke the first `target_length` units of the shape
    ///
    /// Subpaths that end at or before the target are stroked exactly as
    /// [`draw`](Self::draw) strokes them. The subpath straddling the target is
    /// cut inside the straddling segment at the point whose arc length matches
    /// the remaining budget, and nothing after it is drawn. A target that
    /// lands exactly on the end of a subpath draws nothing of the next one.
    pub fn draw_up_to(&self, target_length: f64, context: &mut dyn DrawingContext) {
        if target_length <= 0.0 {
            return;
        }
        let measure = self.measure();
        let mut subpath_start = 0.0;
        for (index, subpath) in self.subpaths.iter().enumerate() {
            let subpath_end = measure.subpath_ends[index];
            if subpath_end <= target_length {
                context.stroke_path(subpath);
                subpath_start = subpath_end;
                continue;
            }
            let budget = target_length - subpath_start;
            if budget > 0.0 {
                let partial = leading_part(subpath, &measure.segment_ends[index], budget);
                if partial.elements().len() > 1 {
                    context.stroke_path(&partial);
                }
            }
            return;
        }
    }
}

impl From<BezPath> for PathShape {
    fn from(path: BezPath) -> Self {
        Self::new(&path)
    }
}

/// Arc length of one segment, with degenerate geometry counted as zero
fn segment_length(segment: &PathSeg) -> f64 {
    let length = segment.arclen(ARCLEN_ACCURACY);
    if length.is_finite() && length > 0.0 {
        length
    } else {
        0.0
    }
}

/// The part of `subpath` whose arc length from its start is at most `budget`
fn leading_part(subpath: &BezPath, segment_ends: &[f64], budget: f64) -> BezPath {
    let mut partial = BezPath::new();
    let mut segment_start = 0.0;
    for (segment, &segment_end) in subpath.segments().zip(segment_ends) {
        if partial.is_empty() {
            partial.move_to(segment.start());
        }
        if segment_end <= budget {
            push_segment(&mut partial, segment);
            segment_start = segment_end;
            continue;
        }
        let remaining = budget - segment_start;
        if remaining > 0.0 {
            let t = segment.inv_arclen(remaining, ARCLEN_ACCURACY).clamp(0.0, 1.0);
            push_segment(&mut partial, segment.subsegment(0.0..t));
        }
        break;
    }
    partial
}

fn push_segment(path: &mut BezPath, segment: PathSeg) {
    match segment {
        PathSeg::Line(line) => path.line_to(line.p1),
        PathSeg::Quad(quad) => path.quad_to(quad.p1, quad.p2),
        PathSeg::Cubic(cubic) => path.curve_to(cubic.p1, cubic.p2, cubic.p3),
    }
}
