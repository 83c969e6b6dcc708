//! Touch sketch: drag the mouse or touch the window to draw into a spinning
//! point cloud.
//!
//! Keys: `1` points, `2` line strip, `3` cubes, `R`/`Backspace` clear,
//! `Up`/`Down` or wheel spin speed, `Esc` quit.

mod app;
mod controls;
mod touch;

#[cfg(test)]
mod testing;

use anyhow::Result;
use touchcloud_engine::device::GpuInit;
use touchcloud_engine::logging::{init_logging, LoggingConfig};
use touchcloud_engine::render::RendererConfig;
use touchcloud_engine::window::{Runtime, RuntimeConfig};

use app::SketchApp;

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let runtime = RuntimeConfig {
        title: "touchcloud".to_string(),
        initial_size: winit::dpi::LogicalSize::new(1024.0, 768.0),
    };

    Runtime::run(runtime, GpuInit::default(), SketchApp::new(RendererConfig::default()))
}
