use winit::window::{Window, WindowId};

use crate::coords::Viewport;
use crate::device::Gpu;
use crate::input::{InputFrame, InputState};

/// Per-window handles and immutable window metadata.
pub struct WindowCtx<'a> {
    pub id: WindowId,
    pub window: &'a Window,
}

impl<'a> WindowCtx<'a> {
    /// Logical window size as a viewport.
    pub fn viewport(&self) -> Viewport {
        let phys = self.window.inner_size();
        let logi: winit::dpi::LogicalSize<f64> = phys.to_logical(self.window.scale_factor());
        Viewport::new(logi.width as f32, logi.height as f32)
    }

    /// Tells the compositor a frame is about to be presented.
    #[inline]
    pub fn pre_present_notify(&self) {
        self.window.pre_present_notify();
    }
}

/// Per-frame context passed to `core::App::on_frame`.
///
/// Lifetimes:
/// - `'a` is the duration of the callback invocation
/// - `'w` is the window-borrow lifetime carried by `Gpu<'w>`
pub struct FrameCtx<'a, 'w> {
    pub window: WindowCtx<'a>,
    pub gpu: &'a mut Gpu<'w>,
    pub input: &'a InputState,
    pub input_frame: &'a InputFrame,
}
