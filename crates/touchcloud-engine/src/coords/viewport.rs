use glam::Vec2;

/// Viewport size in logical pixels.
///
/// Touch positions are expressed in this space; the accumulator maps them into
/// world units relative to the viewport center.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }

    /// Half-extent of the viewport (the pixel position of its center).
    #[inline]
    pub fn center(self) -> Vec2 {
        Vec2::new(self.width * 0.5, self.height * 0.5)
    }

    /// Width over height, or `1.0` for a degenerate viewport.
    #[inline]
    pub fn aspect(self) -> f32 {
        if self.is_valid() {
            self.width / self.height
        } else {
            1.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_is_half_size() {
        let v = Viewport::new(800.0, 600.0);
        assert_eq!(v.center(), Vec2::new(400.0, 300.0));
    }

    #[test]
    fn aspect_of_valid_viewport() {
        assert_eq!(Viewport::new(200.0, 100.0).aspect(), 2.0);
    }

    #[test]
    fn aspect_falls_back_for_zero_height() {
        assert_eq!(Viewport::new(200.0, 0.0).aspect(), 1.0);
        assert!(!Viewport::new(200.0, 0.0).is_valid());
    }
}
