/// How incoming samples become geometry, and which primitive draws it.
///
/// Consumed once per sample at the accumulator boundary and once per frame at
/// draw time; nothing else branches on it.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum DrawStyle {
    /// One unconnected point per sample.
    #[default]
    Point,
    /// One vertex per sample, drawn as a connected strip in insertion order.
    Line,
    /// One lit cube (8 vertices, 36 indices) per sample.
    Cube,
}

/// Draw primitive issued for a style.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Primitive {
    Points,
    LineStrip,
    Triangles,
}

impl DrawStyle {
    pub const ALL: [DrawStyle; 3] = [DrawStyle::Point, DrawStyle::Line, DrawStyle::Cube];

    /// Maps the control-layer index (0, 1, 2) to a style.
    pub fn from_index(index: u32) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    pub fn index(self) -> u32 {
        match self {
            DrawStyle::Point => 0,
            DrawStyle::Line => 1,
            DrawStyle::Cube => 2,
        }
    }

    /// Whether geometry of this style is drawn through the index buffer.
    ///
    /// Point and Line share one data layout; only Cube carries indices.
    #[inline]
    pub fn is_indexed(self) -> bool {
        matches!(self, DrawStyle::Cube)
    }

    pub fn primitive(self) -> Primitive {
        match self {
            DrawStyle::Point => Primitive::Points,
            DrawStyle::Line => Primitive::LineStrip,
            DrawStyle::Cube => Primitive::Triangles,
        }
    }
}

impl Primitive {
    pub fn topology(self) -> wgpu::PrimitiveTopology {
        match self {
            Primitive::Points => wgpu::PrimitiveTopology::PointList,
            Primitive::LineStrip => wgpu::PrimitiveTopology::LineStrip,
            Primitive::Triangles => wgpu::PrimitiveTopology::TriangleList,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_round_trips_for_all_styles() {
        for style in DrawStyle::ALL {
            assert_eq!(DrawStyle::from_index(style.index()), Some(style));
        }
    }

    #[test]
    fn out_of_range_index_is_rejected() {
        assert_eq!(DrawStyle::from_index(3), None);
    }

    #[test]
    fn only_cube_is_indexed() {
        assert!(!DrawStyle::Point.is_indexed());
        assert!(!DrawStyle::Line.is_indexed());
        assert!(DrawStyle::Cube.is_indexed());
    }

    #[test]
    fn line_draws_a_strip_not_a_list() {
        assert_eq!(DrawStyle::Line.primitive(), Primitive::LineStrip);
        assert_eq!(
            Primitive::LineStrip.topology(),
            wgpu::PrimitiveTopology::LineStrip
        );
    }
}
