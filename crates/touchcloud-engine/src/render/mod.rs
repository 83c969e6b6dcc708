//! GPU rendering subsystem.
//!
//! The frame renderer owns the pipelines and the per-frame uniform ring, and
//! hands the `PointCloud` a `DrawTarget` to issue its single draw call into.
//! Frame sequencing (gate permit, slot advance, scene step, submit) lives in
//! `FrameLoop`, which drives any `FrameBackend`.
//!
//! Convention:
//! - world space is right-handed, +Y up
//! - clip-space depth is `[0, 1]`

mod config;
mod frame_loop;
mod gate;
mod pipeline;
mod renderer;
mod target;
mod uniforms;

pub use config::RendererConfig;
pub use frame_loop::{FrameBackend, FrameLoop, FrameOutcome};
pub use gate::{FrameGate, FramePermit};
pub use pipeline::CloudPipelines;
pub use renderer::FrameRenderer;
pub use target::{DrawTarget, PassTarget};
pub use uniforms::{frame_transform, light_direction, FrameUniforms, SlotRing, UniformRing};
