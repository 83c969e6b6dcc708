//! Recording test doubles for the GPU seams.

use std::cell::Cell;

use crate::geometry::{BufferKind, GeometryDevice, Primitive};
use crate::render::DrawTarget;

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct FakeBuffer {
    pub kind: BufferKind,
    pub bytes: Vec<u8>,
}

/// Allocates plain byte vectors and counts allocations.
pub(crate) struct FakeDevice {
    pub limit: u64,
    allocations: Cell<usize>,
}

impl FakeDevice {
    pub fn new() -> Self {
        Self { limit: u64::MAX, allocations: Cell::new(0) }
    }

    pub fn allocations(&self) -> usize {
        self.allocations.get()
    }
}

impl GeometryDevice for FakeDevice {
    type Buffer = FakeBuffer;

    fn max_buffer_size(&self) -> u64 {
        self.limit
    }

    fn create_buffer(&self, kind: BufferKind, contents: &[u8]) -> FakeBuffer {
        self.allocations.set(self.allocations.get() + 1);
        FakeBuffer { kind, bytes: contents.to_vec() }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    /// Byte length of the bound vertex buffer.
    SetVertexBuffer(usize),
    Draw(Primitive, u32),
    /// Primitive, index buffer byte length, index count.
    DrawIndexed(Primitive, usize, u32),
}

/// Records every call instead of encoding GPU commands.
#[derive(Default)]
pub(crate) struct RecordingTarget {
    pub calls: Vec<Call>,
}

impl RecordingTarget {
    pub fn draw_calls(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| !matches!(c, Call::SetVertexBuffer(_)))
            .count()
    }
}

impl DrawTarget for RecordingTarget {
    type Buffer = FakeBuffer;

    fn set_vertex_buffer(&mut self, buffer: &FakeBuffer) {
        assert_eq!(buffer.kind, BufferKind::Vertex);
        self.calls.push(Call::SetVertexBuffer(buffer.bytes.len()));
    }

    fn draw(&mut self, primitive: Primitive, vertex_count: u32) {
        self.calls.push(Call::Draw(primitive, vertex_count));
    }

    fn draw_indexed(&mut self, primitive: Primitive, index_buffer: &FakeBuffer, index_count: u32) {
        assert_eq!(index_buffer.kind, BufferKind::Index);
        self.calls
            .push(Call::DrawIndexed(primitive, index_buffer.bytes.len(), index_count));
    }
}
