//! Penstroke
//!
//! Paragraph layout for single-stroke fonts, and drawing of any prefix of
//! the laid out text by stroke length, for handwriting-style animations.
//!
//! - [`geometry`]: stroke paths measured and cut by arc length
//! - [`font_source`]: glyphs, fonts, the built-in line font and font files
//! - [`layout`]: word wrapping and alignment into rows
//! - [`rendering`]: drawing contexts, partial drawing, layers, frames and SVG
pub mod core;
pub mod font_source;
pub mod geometry;
pub mod layout;
pub mod logging;
pub mod rendering;
