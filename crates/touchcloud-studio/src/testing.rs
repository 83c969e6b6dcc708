//! Recording `SceneInput` for router and control tests.

use glam::Vec2;
use touchcloud_engine::geometry::DrawStyle;
use touchcloud_engine::paint::Color;
use touchcloud_engine::scene::SceneInput;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Recorded {
    Sample { position: Vec2, color: Color, intensity: f32 },
    Style(DrawStyle),
    SpinSpeed(f32),
    Reset,
}

#[derive(Debug, Default)]
pub(crate) struct RecordingInput {
    pub calls: Vec<Recorded>,
}

impl RecordingInput {
    pub fn samples(&self) -> Vec<Vec2> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Recorded::Sample { position, .. } => Some(*position),
                _ => None,
            })
            .collect()
    }
}

impl SceneInput for RecordingInput {
    fn add_sample(&mut self, position: Vec2, color: Color, intensity: f32) {
        self.calls.push(Recorded::Sample { position, color, intensity });
    }

    fn set_style(&mut self, style: DrawStyle) {
        self.calls.push(Recorded::Style(style));
    }

    fn set_spin_speed(&mut self, slider: f32) {
        self.calls.push(Recorded::SpinSpeed(slider));
    }

    fn reset(&mut self) {
        self.calls.push(Recorded::Reset);
    }
}
