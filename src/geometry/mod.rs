//! Geometric Primitives and Operations

pub mod path_shape;

// Re-export commonly used items
pub use path_shape::{GeometryError, PathShape, ARCLEN_ACCURACY};
