//! Touchcloud engine crate.
//!
//! Platform + GPU runtime, the geometry accumulator that turns touch samples
//! into points, line strips or lit cubes, and the frame renderer that draws it.

pub mod core;
pub mod device;
pub mod input;
pub mod window;

pub mod coords;
pub mod geometry;
pub mod logging;
pub mod paint;
pub mod render;
pub mod scene;

#[cfg(test)]
mod testing;
