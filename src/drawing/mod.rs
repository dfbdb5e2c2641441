//! Rasterization primitives for correspondence frames.
//!
//! All drawing targets `image::RgbImage`, which is how the three-channel
//! requirement of the renderer is expressed.

pub mod marker;
pub mod overlay;
pub mod thick_line;

pub use marker::*;
pub use overlay::*;
pub use thick_line::*;
