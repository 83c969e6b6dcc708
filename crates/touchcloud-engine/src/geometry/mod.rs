//! Sketch geometry.
//!
//! Responsibilities:
//! - fixed-layout vertex record shared by every draw style
//! - pure transform helpers (matrices, spin, touch projection)
//! - the CPU-side geometry buffer and the `PointCloud` accumulator that keeps a
//!   GPU-visible copy of it
//!
//! The CPU sequences are the source of truth. GPU buffers are a cached
//! derivative rebuilt after every mutation.

mod buffer;
mod error;
mod point_cloud;
mod style;
mod upload;
mod vertex;

pub mod transform;

pub use buffer::{GeometryBuffer, CUBE_CORNER_SIGNS, CUBE_INDICES};
pub use error::GeometryError;
pub use point_cloud::{PointCloud, Sample, SampleSpace};
pub use style::{DrawStyle, Primitive};
pub use upload::{BufferKind, GeometryDevice};
pub use vertex::{StyleTag, Vertex};
