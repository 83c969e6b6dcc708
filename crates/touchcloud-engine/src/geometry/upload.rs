use wgpu::util::DeviceExt;

/// Which GPU usage a geometry upload is destined for.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum BufferKind {
    Vertex,
    Index,
}

impl BufferKind {
    pub fn label(self) -> &'static str {
        match self {
            BufferKind::Vertex => "touchcloud vertex buffer",
            BufferKind::Index => "touchcloud index buffer",
        }
    }

    fn usage(self) -> wgpu::BufferUsages {
        match self {
            BufferKind::Vertex => wgpu::BufferUsages::VERTEX,
            BufferKind::Index => wgpu::BufferUsages::INDEX,
        }
    }
}

/// Allocation seam between the accumulator and the GPU.
///
/// Implemented for `wgpu::Device`; tests provide a recording double.
pub trait GeometryDevice {
    type Buffer;

    /// Largest buffer, in bytes, the device will allocate.
    fn max_buffer_size(&self) -> u64;

    /// Allocates a buffer initialized with `contents`.
    fn create_buffer(&self, kind: BufferKind, contents: &[u8]) -> Self::Buffer;
}

impl GeometryDevice for wgpu::Device {
    type Buffer = wgpu::Buffer;

    fn max_buffer_size(&self) -> u64 {
        self.limits().max_buffer_size
    }

    fn create_buffer(&self, kind: BufferKind, contents: &[u8]) -> wgpu::Buffer {
        self.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(kind.label()),
            contents,
            usage: kind.usage(),
        })
    }
}
