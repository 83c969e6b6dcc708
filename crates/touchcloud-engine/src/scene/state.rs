use crate::coords::Viewport;
use crate::geometry::{DrawStyle, SampleSpace};

/// Spin advance per frame with the speed slider at zero, in radians.
pub const DEFAULT_SPIN_STEP: f32 = 0.01;
/// Spin advance added per unit of slider value.
pub const SPIN_STEP_PER_SLIDER: f32 = 2.0;

/// Drawing parameters shared by the accumulator and the frame renderer.
///
/// Mutated only on the render thread: by `CommandQueue::drain` and by the
/// renderer's once-per-frame angle advance.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneState {
    style: DrawStyle,
    spin_angle: f32,
    spin_step: f32,
    light_angle: f32,
    viewport: Viewport,
}

impl Default for SceneState {
    fn default() -> Self {
        Self::new(Viewport::default())
    }
}

impl SceneState {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            style: DrawStyle::Point,
            spin_angle: 0.0,
            spin_step: DEFAULT_SPIN_STEP,
            light_angle: 0.0,
            viewport,
        }
    }

    #[inline]
    pub fn style(&self) -> DrawStyle {
        self.style
    }

    #[inline]
    pub fn spin_angle(&self) -> f32 {
        self.spin_angle
    }

    #[inline]
    pub fn spin_step(&self) -> f32 {
        self.spin_step
    }

    #[inline]
    pub fn light_angle(&self) -> f32 {
        self.light_angle
    }

    #[inline]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Selects the draw style.
    ///
    /// Returns `true` when the accumulated geometry must be cleared: any
    /// switch into or out of `Cube`. Point and Line share a vertex layout, so
    /// switching between them keeps what was drawn.
    pub fn set_style(&mut self, style: DrawStyle) -> bool {
        if style == self.style {
            return false;
        }
        let clear = style.is_indexed() != self.style.is_indexed();
        log::info!("draw style {:?} -> {:?}", self.style, style);
        self.style = style;
        clear
    }

    /// Maps a slider value to the per-frame spin step (`0.01 + slider * 2`).
    ///
    /// Non-finite slider values are ignored.
    pub fn set_spin_speed(&mut self, slider: f32) {
        if !slider.is_finite() {
            log::warn!("ignoring non-finite spin slider value {slider}");
            return;
        }
        self.spin_step = DEFAULT_SPIN_STEP + slider * SPIN_STEP_PER_SLIDER;
    }

    /// Parameters new samples are projected with.
    pub fn sample_space(&self) -> SampleSpace {
        SampleSpace {
            viewport: self.viewport,
            spin_angle: self.spin_angle,
        }
    }

    /// Advances both angle accumulators by one frame.
    pub fn advance_frame(&mut self, light_step: f32) {
        self.spin_angle += self.spin_step;
        self.light_angle += light_step;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let s = SceneState::default();
        assert_eq!(s.style(), DrawStyle::Point);
        assert_eq!(s.spin_angle(), 0.0);
        assert_eq!(s.spin_step(), 0.01);
        assert_eq!(s.light_angle(), 0.0);
    }

    // ── style switching ──

    #[test]
    fn entering_or_leaving_cube_clears() {
        let mut s = SceneState::default();
        assert!(s.set_style(DrawStyle::Cube));
        assert!(s.set_style(DrawStyle::Line));
    }

    #[test]
    fn point_line_switch_keeps_geometry() {
        let mut s = SceneState::default();
        assert!(!s.set_style(DrawStyle::Line));
        assert!(!s.set_style(DrawStyle::Point));
        assert_eq!(s.style(), DrawStyle::Point);
    }

    #[test]
    fn reselecting_same_style_is_a_no_op() {
        let mut s = SceneState::default();
        s.set_style(DrawStyle::Cube);
        assert!(!s.set_style(DrawStyle::Cube));
    }

    // ── angles ──

    #[test]
    fn slider_maps_to_spin_step() {
        let mut s = SceneState::default();
        s.set_spin_speed(0.5);
        assert!((s.spin_step() - 1.01).abs() < 1e-6);
        s.set_spin_speed(f32::NAN);
        assert!((s.spin_step() - 1.01).abs() < 1e-6);
    }

    #[test]
    fn advance_frame_steps_both_angles() {
        let mut s = SceneState::default();
        s.advance_frame(0.01);
        s.advance_frame(0.01);
        assert!((s.spin_angle() - 0.02).abs() < 1e-6);
        assert!((s.light_angle() - 0.02).abs() < 1e-6);
    }

    #[test]
    fn sample_space_tracks_viewport_and_spin() {
        let mut s = SceneState::new(Viewport::new(800.0, 600.0));
        s.advance_frame(0.0);
        let space = s.sample_space();
        assert_eq!(space.viewport, Viewport::new(800.0, 600.0));
        assert_eq!(space.spin_angle, 0.01);
    }
}
