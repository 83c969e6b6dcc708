use crate::geometry::Primitive;

use super::pipeline::CloudPipelines;

/// Where the accumulator issues its draw call.
///
/// Narrow on purpose: bind the vertex buffer, then exactly one draw.
pub trait DrawTarget {
    type Buffer;

    fn set_vertex_buffer(&mut self, buffer: &Self::Buffer);

    /// Non-indexed draw over the first `vertex_count` vertices.
    fn draw(&mut self, primitive: Primitive, vertex_count: u32);

    /// Indexed draw with 16-bit indices.
    fn draw_indexed(&mut self, primitive: Primitive, index_buffer: &Self::Buffer, index_count: u32);
}

/// `DrawTarget` over a live wgpu render pass.
///
/// Topology is pipeline state in wgpu, so each draw first selects the pipeline
/// matching its primitive.
pub struct PassTarget<'p, 'e> {
    pass: &'p mut wgpu::RenderPass<'e>,
    pipelines: &'p CloudPipelines,
}

impl<'p, 'e> PassTarget<'p, 'e> {
    #[inline]
    pub fn new(pass: &'p mut wgpu::RenderPass<'e>, pipelines: &'p CloudPipelines) -> Self {
        Self { pass, pipelines }
    }
}

impl DrawTarget for PassTarget<'_, '_> {
    type Buffer = wgpu::Buffer;

    fn set_vertex_buffer(&mut self, buffer: &wgpu::Buffer) {
        self.pass.set_vertex_buffer(0, buffer.slice(..));
    }

    fn draw(&mut self, primitive: Primitive, vertex_count: u32) {
        self.pass.set_pipeline(self.pipelines.get(primitive));
        self.pass.draw(0..vertex_count, 0..1);
    }

    fn draw_indexed(&mut self, primitive: Primitive, index_buffer: &wgpu::Buffer, index_count: u32) {
        self.pass.set_pipeline(self.pipelines.get(primitive));
        self.pass
            .set_index_buffer(index_buffer.slice(..), wgpu::IndexFormat::Uint16);
        self.pass.draw_indexed(0..index_count, 0, 0..1);
    }
}
