//! Color model for sketch geometry.

pub mod color;

pub use color::Color;
