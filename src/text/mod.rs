//! Text post-processing: XML sanitizing and Arabic shaping.

pub mod normalize;
pub mod shaping;

pub use normalize::sanitize;
pub use shaping::{reorder, reshape, shape_or_original, ArabicShaper, ShapingOptions, TextShaper};
