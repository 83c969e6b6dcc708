use glam::Vec2;

use crate::coords::Viewport;
use crate::paint::Color;
use crate::render::DrawTarget;

use super::buffer::GeometryBuffer;
use super::error::GeometryError;
use super::style::DrawStyle;
use super::transform::project_touch;
use super::upload::{BufferKind, GeometryDevice};

/// Base half-extent of a cube, before intensity is added.
const CUBE_MIN_HALF_EXTENT: f32 = 0.01;
/// Intensity divisor for the cube half-extent.
const CUBE_INTENSITY_SCALE: f32 = 5.0;

/// One input sample, already reduced to position + color + intensity.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Sample {
    /// Logical pixels, origin top-left.
    pub position: Vec2,
    pub color: Color,
    /// Drives the cube size; ignored by points and lines.
    pub intensity: f32,
}

/// Scene parameters a sample is projected with.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct SampleSpace {
    pub viewport: Viewport,
    pub spin_angle: f32,
}

/// GPU copy of the geometry, rebuilt wholesale from the CPU sequences.
struct GpuGeometry<B> {
    vertices: B,
    vertex_count: u32,
    /// Present only when the CPU side holds cube indices.
    indices: Option<(B, u32)>,
}

/// Accumulates everything drawn so far and keeps a GPU copy in sync.
///
/// Every accepted sample re-uploads both sequences in full. That is O(n) per
/// sample and allocates fresh buffers each time; it keeps the GPU copy a pure
/// function of the CPU sequences at touch-drawing scale.
pub struct PointCloud<B> {
    geometry: GeometryBuffer,
    /// Whether the current contents were built as indexed (cube) geometry.
    indexed: bool,
    gpu: Option<GpuGeometry<B>>,
}

impl<B> Default for PointCloud<B> {
    fn default() -> Self {
        Self {
            geometry: GeometryBuffer::new(),
            indexed: false,
            gpu: None,
        }
    }
}

impl<B> PointCloud<B> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read-only view of the CPU-side sequences.
    pub fn geometry(&self) -> &GeometryBuffer {
        &self.geometry
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.geometry.vertex_count()
    }

    #[inline]
    pub fn index_count(&self) -> usize {
        self.geometry.index_count()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.geometry.is_empty()
    }

    /// Whether a GPU copy matching the CPU sequences is available.
    #[inline]
    pub fn is_uploaded(&self) -> bool {
        self.gpu.is_some()
    }

    /// Clears all geometry. Subsequent draws render nothing until new samples arrive.
    pub fn reset(&mut self) {
        self.geometry.clear();
        self.indexed = false;
        self.gpu = None;
    }

    /// Converts one sample into geometry for `style`, then re-uploads.
    ///
    /// If `style` disagrees with the buffer contents on whether geometry is
    /// indexed, the buffer is reset first so a single draw never mixes the two.
    ///
    /// A cube that would overflow the 16-bit index range is rejected without
    /// touching either copy, so the existing drawing stays on screen. An
    /// upload that exceeds the device limit keeps the appended vertices but
    /// drops the GPU copy, so nothing stale is drawn.
    pub fn add_sample<D>(
        &mut self,
        device: &D,
        space: SampleSpace,
        sample: &Sample,
        style: DrawStyle,
    ) -> Result<(), GeometryError>
    where
        D: GeometryDevice<Buffer = B>,
    {
        if !self.geometry.is_empty() && self.indexed != style.is_indexed() {
            log::debug!("style {style:?} changes indexing; clearing {} vertices", self.vertex_count());
            self.reset();
        }
        self.indexed = style.is_indexed();

        let position = project_touch(sample.position, space.viewport, space.spin_angle);

        match style {
            DrawStyle::Point | DrawStyle::Line => {
                self.geometry.push_point(position, sample.color);
            }
            DrawStyle::Cube => {
                let half_extent = CUBE_MIN_HALF_EXTENT + sample.intensity / CUBE_INTENSITY_SCALE;
                self.geometry
                    .push_cube(position, half_extent, space.spin_angle, sample.color)?;
            }
        }

        debug_assert!(self.geometry.indices_valid());
        self.sync(device)
    }

    /// Rebuilds the GPU copy from the CPU sequences.
    fn sync<D>(&mut self, device: &D) -> Result<(), GeometryError>
    where
        D: GeometryDevice<Buffer = B>,
    {
        self.gpu = None;
        if self.geometry.is_empty() {
            return Ok(());
        }

        let limit = device.max_buffer_size();
        let vertex_bytes: &[u8] = bytemuck::cast_slice(self.geometry.vertices());
        let index_bytes: &[u8] = bytemuck::cast_slice(self.geometry.indices());

        for (kind, bytes) in [(BufferKind::Vertex, vertex_bytes), (BufferKind::Index, index_bytes)] {
            let size = bytes.len() as u64;
            if size > limit {
                return Err(GeometryError::BufferTooLarge {
                    kind: match kind {
                        BufferKind::Vertex => "vertex",
                        BufferKind::Index => "index",
                    },
                    size,
                    limit,
                });
            }
        }

        let vertices = device.create_buffer(BufferKind::Vertex, vertex_bytes);
        let indices = self.geometry.has_indices().then(|| {
            (
                device.create_buffer(BufferKind::Index, index_bytes),
                self.geometry.index_count() as u32,
            )
        });

        log::debug!(
            "uploaded {} vertices / {} indices ({} bytes)",
            self.geometry.vertex_count(),
            self.geometry.index_count(),
            vertex_bytes.len() + index_bytes.len(),
        );

        self.gpu = Some(GpuGeometry {
            vertices,
            vertex_count: self.geometry.vertex_count() as u32,
            indices,
        });
        Ok(())
    }

    /// Issues at most one draw call for the accumulated geometry.
    ///
    /// No-op when empty or when no GPU copy exists. Cube style draws only when
    /// an index buffer exists.
    pub fn render<T>(&self, target: &mut T, style: DrawStyle)
    where
        T: DrawTarget<Buffer = B>,
    {
        if self.geometry.is_empty() {
            return;
        }
        let Some(gpu) = self.gpu.as_ref() else { return };

        match style {
            DrawStyle::Point | DrawStyle::Line => {
                target.set_vertex_buffer(&gpu.vertices);
                target.draw(style.primitive(), gpu.vertex_count);
            }
            DrawStyle::Cube => {
                let Some((index_buffer, index_count)) = gpu.indices.as_ref() else {
                    return;
                };
                target.set_vertex_buffer(&gpu.vertices);
                target.draw_indexed(style.primitive(), index_buffer, *index_count);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::geometry::{Primitive, CUBE_CORNER_SIGNS, CUBE_INDICES};
    use crate::testing::{Call, FakeBuffer, FakeDevice, RecordingTarget};

    fn space() -> SampleSpace {
        SampleSpace { viewport: Viewport::new(400.0, 300.0), spin_angle: 0.0 }
    }

    fn sample(x: f32, y: f32) -> Sample {
        Sample { position: Vec2::new(x, y), color: Color::WHITE, intensity: 0.5 }
    }

    // ── accumulation ──────────────────────────────────────────────────────

    #[test]
    fn point_and_line_samples_add_one_vertex_each() {
        let dev = FakeDevice::new();
        for style in [DrawStyle::Point, DrawStyle::Line] {
            let mut cloud = PointCloud::new();
            for i in 0..7 {
                cloud.add_sample(&dev, space(), &sample(i as f32, 0.0), style).unwrap();
            }
            assert_eq!(cloud.vertex_count(), 7);
            assert_eq!(cloud.index_count(), 0);
        }
    }

    #[test]
    fn cube_samples_add_eight_vertices_and_36_indices() {
        let dev = FakeDevice::new();
        let mut cloud = PointCloud::new();
        for n in 1..=5usize {
            cloud.add_sample(&dev, space(), &sample(10.0, 10.0), DrawStyle::Cube).unwrap();
            assert_eq!(cloud.vertex_count(), 8 * n);
            assert_eq!(cloud.index_count(), 36 * n);
            assert!(cloud.geometry().indices().iter().all(|&i| (i as usize) < 8 * n));
        }
    }

    #[test]
    fn center_sample_lands_at_origin() {
        let dev = FakeDevice::new();
        let mut cloud = PointCloud::new();
        cloud.add_sample(&dev, space(), &sample(200.0, 150.0), DrawStyle::Point).unwrap();
        assert_eq!(cloud.geometry().vertices()[0].position(), Vec3::ZERO);
    }

    #[test]
    fn cube_half_extent_follows_intensity() {
        let dev = FakeDevice::new();
        let mut cloud = PointCloud::new();
        let mut s = sample(200.0, 150.0);
        s.intensity = 1.0;
        cloud.add_sample(&dev, space(), &s, DrawStyle::Cube).unwrap();

        let half = 0.01 + 1.0 / 5.0;
        for (v, sign) in cloud.geometry().vertices().iter().zip(CUBE_CORNER_SIGNS) {
            assert!((v.position() - Vec3::from_array(sign) * half).abs().max_element() < 1e-6);
        }
        assert_eq!(cloud.geometry().indices(), &CUBE_INDICES[..]);
    }

    #[test]
    fn every_sample_rebuilds_gpu_copy() {
        let dev = FakeDevice::new();
        let mut cloud = PointCloud::new();
        cloud.add_sample(&dev, space(), &sample(0.0, 0.0), DrawStyle::Point).unwrap();
        cloud.add_sample(&dev, space(), &sample(1.0, 0.0), DrawStyle::Point).unwrap();
        assert_eq!(dev.allocations(), 2);

        cloud.add_sample(&dev, space(), &sample(1.0, 0.0), DrawStyle::Cube).unwrap();
        // vertex + index buffer
        assert_eq!(dev.allocations(), 4);
        assert!(cloud.is_uploaded());
    }

    // ── reset / style switching ───────────────────────────────────────────

    #[test]
    fn reset_is_idempotent() {
        let dev = FakeDevice::new();
        let mut cloud = PointCloud::new();
        cloud.add_sample(&dev, space(), &sample(0.0, 0.0), DrawStyle::Cube).unwrap();
        cloud.reset();
        cloud.reset();
        assert_eq!(cloud.vertex_count(), 0);
        assert_eq!(cloud.index_count(), 0);
        assert!(!cloud.is_uploaded());
    }

    #[test]
    fn cube_sample_after_points_clears_points() {
        let dev = FakeDevice::new();
        let mut cloud = PointCloud::new();
        for _ in 0..3 {
            cloud.add_sample(&dev, space(), &sample(0.0, 0.0), DrawStyle::Line).unwrap();
        }
        cloud.add_sample(&dev, space(), &sample(0.0, 0.0), DrawStyle::Cube).unwrap();
        assert_eq!(cloud.vertex_count(), 8);
        assert_eq!(cloud.index_count(), 36);
    }

    #[test]
    fn point_sample_after_cubes_clears_cubes() {
        let dev = FakeDevice::new();
        let mut cloud = PointCloud::new();
        cloud.add_sample(&dev, space(), &sample(0.0, 0.0), DrawStyle::Cube).unwrap();
        cloud.add_sample(&dev, space(), &sample(0.0, 0.0), DrawStyle::Point).unwrap();
        assert_eq!(cloud.vertex_count(), 1);
        assert_eq!(cloud.index_count(), 0);
    }

    #[test]
    fn point_and_line_share_contents() {
        let dev = FakeDevice::new();
        let mut cloud = PointCloud::new();
        cloud.add_sample(&dev, space(), &sample(0.0, 0.0), DrawStyle::Point).unwrap();
        cloud.add_sample(&dev, space(), &sample(5.0, 0.0), DrawStyle::Line).unwrap();
        assert_eq!(cloud.vertex_count(), 2);
    }

    // ── upload failures ───────────────────────────────────────────────────

    #[test]
    fn oversized_upload_fails_and_drops_gpu_copy() {
        let mut dev = FakeDevice::new();
        let mut cloud = PointCloud::new();
        cloud.add_sample(&dev, space(), &sample(0.0, 0.0), DrawStyle::Point).unwrap();
        assert!(cloud.is_uploaded());

        dev.limit = 60;
        let err = cloud
            .add_sample(&dev, space(), &sample(0.0, 0.0), DrawStyle::Point)
            .unwrap_err();
        assert_eq!(err, GeometryError::BufferTooLarge { kind: "vertex", size: 104, limit: 60 });
        assert_eq!(cloud.vertex_count(), 2);
        assert!(!cloud.is_uploaded());

        let mut target = RecordingTarget::default();
        cloud.render(&mut target, DrawStyle::Point);
        assert_eq!(target.draw_calls(), 0);
    }

    #[test]
    fn rejected_cube_keeps_drawing_on_screen() {
        let dev = FakeDevice::new();
        let mut cloud = PointCloud::new();
        cloud.indexed = true;
        for _ in 0..8191 {
            cloud.geometry.push_cube(Vec3::ZERO, 0.1, 0.0, Color::WHITE).unwrap();
        }
        // 8192nd cube fills the index range exactly and uploads once.
        cloud.add_sample(&dev, space(), &sample(0.0, 0.0), DrawStyle::Cube).unwrap();
        assert_eq!(cloud.vertex_count(), 65536);
        assert_eq!(dev.allocations(), 2);

        let err = cloud
            .add_sample(&dev, space(), &sample(0.0, 0.0), DrawStyle::Cube)
            .unwrap_err();
        assert_eq!(err, GeometryError::IndexOverflow { vertex_count: 65536 });
        assert_eq!(cloud.vertex_count(), 65536);
        assert_eq!(cloud.index_count(), 8192 * 36);
        assert!(cloud.is_uploaded());
        assert_eq!(dev.allocations(), 2);

        let mut target = RecordingTarget::default();
        cloud.render(&mut target, DrawStyle::Cube);
        assert_eq!(target.draw_calls(), 1);
        assert_eq!(
            target.calls[1],
            Call::DrawIndexed(Primitive::Triangles, 8192 * 36 * 2, 8192 * 36)
        );
    }

    // ── rendering ─────────────────────────────────────────────────────────

    #[test]
    fn empty_cloud_issues_no_draw() {
        let cloud: PointCloud<FakeBuffer> = PointCloud::new();
        for style in DrawStyle::ALL {
            let mut target = RecordingTarget::default();
            cloud.render(&mut target, style);
            assert!(target.calls.is_empty());
        }
    }

    #[test]
    fn point_and_line_draw_one_call_each() {
        let dev = FakeDevice::new();
        let mut cloud = PointCloud::new();
        for i in 0..4 {
            cloud.add_sample(&dev, space(), &sample(i as f32, 0.0), DrawStyle::Point).unwrap();
        }

        let mut target = RecordingTarget::default();
        cloud.render(&mut target, DrawStyle::Point);
        assert_eq!(
            target.calls,
            vec![Call::SetVertexBuffer(4 * 52), Call::Draw(Primitive::Points, 4)]
        );

        let mut target = RecordingTarget::default();
        cloud.render(&mut target, DrawStyle::Line);
        assert_eq!(target.calls[1], Call::Draw(Primitive::LineStrip, 4));
    }

    #[test]
    fn cube_draws_indexed_triangles() {
        let dev = FakeDevice::new();
        let mut cloud = PointCloud::new();
        cloud.add_sample(&dev, space(), &sample(0.0, 0.0), DrawStyle::Cube).unwrap();
        cloud.add_sample(&dev, space(), &sample(9.0, 9.0), DrawStyle::Cube).unwrap();

        let mut target = RecordingTarget::default();
        cloud.render(&mut target, DrawStyle::Cube);
        assert_eq!(
            target.calls,
            vec![
                Call::SetVertexBuffer(16 * 52),
                Call::DrawIndexed(Primitive::Triangles, 72 * 2, 72),
            ]
        );
    }

    #[test]
    fn cube_style_without_indices_draws_nothing() {
        let dev = FakeDevice::new();
        let mut cloud = PointCloud::new();
        cloud.add_sample(&dev, space(), &sample(0.0, 0.0), DrawStyle::Point).unwrap();

        let mut target = RecordingTarget::default();
        cloud.render(&mut target, DrawStyle::Cube);
        assert_eq!(target.draw_calls(), 0);
    }
}
