use std::collections::HashMap;

use glam::Vec2;
use touchcloud_engine::paint::Color;

/// Identifies one stroke source.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum PointerId {
    Mouse,
    Touch(u64),
}

/// Everything the accumulator needs for one sample.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct StrokeSample {
    pub position: Vec2,
    pub color: Color,
    pub intensity: f32,
}

/// Turns successive pointer positions into colored samples.
///
/// The stroke direction drives the look: horizontal motion shifts the hue,
/// vertical motion raises alpha and intensity (cube size).
#[derive(Debug, Default)]
pub struct TouchTracker {
    last: HashMap<PointerId, Vec2>,
}

impl TouchTracker {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_active(&self, id: PointerId) -> bool {
        self.last.contains_key(&id)
    }

    /// Records `position` for `id` and returns the sample to draw there.
    ///
    /// A stroke's first sample (and any sample without motion) uses the
    /// direction `(1, 0)`.
    pub fn track(&mut self, id: PointerId, position: Vec2) -> StrokeSample {
        let direction = self
            .last
            .insert(id, position)
            .map(|prev| (position - prev).normalize_or_zero())
            .filter(|d| *d != Vec2::ZERO)
            .unwrap_or(Vec2::X);
        sample_for(position, direction)
    }

    /// Ends the stroke for `id`.
    pub fn end(&mut self, id: PointerId) {
        self.last.remove(&id);
    }

    pub fn clear(&mut self) {
        self.last.clear();
    }
}

/// hue `1 - |dx|`, alpha and intensity `|dy|`, for a unit `direction`.
pub fn sample_for(position: Vec2, direction: Vec2) -> StrokeSample {
    let (dx, dy) = (direction.x.abs(), direction.y.abs());
    StrokeSample {
        position,
        color: Color::from_hsva(1.0 - dx, 1.0, 1.0, dy),
        intensity: dy,
    }
}
