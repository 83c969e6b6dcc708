//! Screen-space coordinate types.
//!
//! Canonical CPU space for input:
//! - Logical pixels (DPI-aware)
//! - Origin top-left
//! - +X right, +Y down
//!
//! World-space vectors use `glam` directly.

mod viewport;

pub use viewport::Viewport;
