use glam::Vec3;

use crate::paint::Color;

use super::error::GeometryError;
use super::transform::spin_xz;
use super::vertex::Vertex;

/// Corner sign pattern of a cube, in vertex-offset order 0..7.
pub const CUBE_CORNER_SIGNS: [[f32; 3]; 8] = [
    [-1.0, -1.0, -1.0],
    [1.0, -1.0, -1.0],
    [1.0, 1.0, -1.0],
    [-1.0, 1.0, -1.0],
    [-1.0, -1.0, 1.0],
    [1.0, -1.0, 1.0],
    [1.0, 1.0, 1.0],
    [-1.0, 1.0, 1.0],
];

/// Triangle list over the corners above: 6 faces, 2 triangles each.
#[rustfmt::skip]
pub const CUBE_INDICES: [u16; 36] = [
    0, 1, 3,  1, 2, 3, // front
    5, 4, 6,  4, 7, 6, // back
    4, 0, 7,  0, 3, 7, // left
    1, 5, 2,  5, 6, 2, // right
    4, 5, 0,  5, 1, 0, // top
    3, 2, 7,  2, 6, 7, // bottom
];

const CUBE_VERTEX_COUNT: usize = CUBE_CORNER_SIGNS.len();

/// CPU-side vertex and index sequences.
///
/// Invariants:
/// - every index is `< vertices.len()`
/// - `indices.len()` is a multiple of 36 (one block per cube)
/// - insertion order is draw order for points and lines
#[derive(Debug, Default, Clone)]
pub struct GeometryBuffer {
    vertices: Vec<Vertex>,
    indices: Vec<u16>,
}

impl GeometryBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
        self.indices.clear();
    }

    #[inline]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    #[inline]
    pub fn indices(&self) -> &[u16] {
        &self.indices
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    #[inline]
    pub fn has_indices(&self) -> bool {
        !self.indices.is_empty()
    }

    /// Appends one unlit vertex (point and line styles).
    pub fn push_point(&mut self, position: Vec3, color: Color) {
        self.vertices.push(Vertex::unlit(position, color));
    }

    /// Appends a lit cube centered at `center`.
    ///
    /// Each corner offset is spun by `spin_angle` independently before being
    /// added to the center. Normals point from the center to the corner.
    pub fn push_cube(
        &mut self,
        center: Vec3,
        half_extent: f32,
        spin_angle: f32,
        color: Color,
    ) -> Result<(), GeometryError> {
        let base = self.vertices.len();
        if base + CUBE_VERTEX_COUNT > usize::from(u16::MAX) + 1 {
            return Err(GeometryError::IndexOverflow { vertex_count: base });
        }

        self.vertices.extend(CUBE_CORNER_SIGNS.iter().map(|sign| {
            let offset = spin_xz(Vec3::from_array(*sign) * half_extent, spin_angle);
            let corner = center + offset;
            Vertex::lit(corner, (corner - center).normalize_or_zero(), color)
        }));

        // `base + 7 <= u16::MAX` is checked above.
        let base = base as u16;
        self.indices.extend(CUBE_INDICES.iter().map(|i| base + i));

        Ok(())
    }

    /// Checks the index invariants. Intended for debug assertions and tests.
    pub fn indices_valid(&self) -> bool {
        self.indices.len() % CUBE_INDICES.len() == 0
            && self
                .indices
                .iter()
                .all(|&i| usize::from(i) < self.vertices.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Color = Color::rgba(1.0, 0.0, 0.0, 1.0);

    // ── points ────────────────────────────────────────────────────────────

    #[test]
    fn points_never_add_indices() {
        let mut buf = GeometryBuffer::new();
        for i in 0..10 {
            buf.push_point(Vec3::splat(i as f32), RED);
        }
        assert_eq!(buf.vertex_count(), 10);
        assert_eq!(buf.index_count(), 0);
        assert_eq!(buf.vertices()[3].position(), Vec3::splat(3.0));
    }

    // ── cubes ─────────────────────────────────────────────────────────────

    #[test]
    fn unspun_cube_corners_match_sign_table() {
        let mut buf = GeometryBuffer::new();
        let s = 0.25;
        buf.push_cube(Vec3::ZERO, s, 0.0, RED).unwrap();

        for (v, sign) in buf.vertices().iter().zip(CUBE_CORNER_SIGNS) {
            assert_eq!(v.position(), Vec3::from_array(sign) * s);
            assert_eq!(v.style_tag, 1);
        }
        assert_eq!(buf.indices(), &CUBE_INDICES[..]);
    }

    #[test]
    fn cube_normals_point_outward() {
        let mut buf = GeometryBuffer::new();
        let center = Vec3::new(1.0, -2.0, 0.5);
        buf.push_cube(center, 0.1, 0.3, RED).unwrap();

        for v in buf.vertices() {
            let n = v.normal();
            assert!((n.length() - 1.0).abs() < 1e-5);
            assert!(n.dot(v.position() - center) > 0.0);
        }
    }

    #[test]
    fn second_cube_indices_are_offset() {
        let mut buf = GeometryBuffer::new();
        buf.push_cube(Vec3::ZERO, 0.1, 0.0, RED).unwrap();
        buf.push_cube(Vec3::X, 0.1, 0.0, RED).unwrap();

        assert_eq!(buf.vertex_count(), 16);
        assert_eq!(buf.index_count(), 72);
        let second: Vec<u16> = CUBE_INDICES.iter().map(|i| i + 8).collect();
        assert_eq!(&buf.indices()[36..], &second[..]);
        assert!(buf.indices_valid());
    }

    #[test]
    fn spun_cube_keeps_its_center() {
        let mut buf = GeometryBuffer::new();
        let center = Vec3::new(0.4, 0.2, -0.1);
        buf.push_cube(center, 0.2, 0.9, RED).unwrap();

        let sum: Vec3 = buf.vertices().iter().map(Vertex::position).sum();
        assert!((sum / 8.0 - center).abs().max_element() < 1e-5);
    }

    #[test]
    fn cube_past_u16_range_is_rejected() {
        let mut buf = GeometryBuffer::new();
        for _ in 0..(usize::from(u16::MAX) + 1) / 8 {
            buf.push_cube(Vec3::ZERO, 0.1, 0.0, RED).unwrap();
        }
        assert_eq!(buf.vertex_count(), 65536);
        assert!(buf.indices_valid());

        let err = buf.push_cube(Vec3::ZERO, 0.1, 0.0, RED).unwrap_err();
        assert_eq!(err, GeometryError::IndexOverflow { vertex_count: 65536 });
        assert_eq!(buf.vertex_count(), 65536);
    }

    // ── clear ─────────────────────────────────────────────────────────────

    #[test]
    fn clear_empties_both_sequences() {
        let mut buf = GeometryBuffer::new();
        buf.push_cube(Vec3::ZERO, 0.1, 0.0, RED).unwrap();
        buf.clear();
        assert!(buf.is_empty());
        assert!(!buf.has_indices());
        buf.clear();
        assert_eq!(buf.vertex_count(), 0);
    }
}
