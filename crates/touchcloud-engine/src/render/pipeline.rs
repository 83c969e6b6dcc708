use crate::geometry::{Primitive, Vertex};

use super::uniforms::FrameUniforms;

const CLOUD_SHADER: &str = include_str!("shaders/cloud.wgsl");

/// The three render pipelines the accumulator draws with.
///
/// wgpu bakes topology into pipeline state, so each `Primitive` gets its own
/// pipeline. All three share one shader, one vertex layout and one bind group
/// layout (the per-frame uniform block at group 0, binding 0).
pub struct CloudPipelines {
    points: wgpu::RenderPipeline,
    lines: wgpu::RenderPipeline,
    triangles: wgpu::RenderPipeline,
    bind_group_layout: wgpu::BindGroupLayout,
}

impl CloudPipelines {
    pub fn new(
        device: &wgpu::Device,
        color_format: wgpu::TextureFormat,
        depth_format: wgpu::TextureFormat,
    ) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("touchcloud shader"),
            source: wgpu::ShaderSource::Wgsl(CLOUD_SHADER.into()),
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("touchcloud frame bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: wgpu::BufferSize::new(
                        std::mem::size_of::<FrameUniforms>() as u64,
                    ),
                },
                count: None,
            }],
        });

        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("touchcloud pipeline layout"),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        let build = |primitive: Primitive, label: &'static str| {
            device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some(label),
                layout: Some(&layout),

                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    compilation_options: Default::default(),
                    buffers: &[Vertex::layout()],
                },

                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some("fs_main"),
                    compilation_options: Default::default(),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: color_format,
                        blend: None,
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                }),

                // Cube faces are seen from both sides while the scene spins.
                primitive: wgpu::PrimitiveState {
                    topology: primitive.topology(),
                    strip_index_format: None,
                    front_face: wgpu::FrontFace::Ccw,
                    cull_mode: None,
                    polygon_mode: wgpu::PolygonMode::Fill,
                    unclipped_depth: false,
                    conservative: false,
                },

                depth_stencil: Some(wgpu::DepthStencilState {
                    format: depth_format,
                    depth_write_enabled: true,
                    depth_compare: wgpu::CompareFunction::Less,
                    stencil: Default::default(),
                    bias: Default::default(),
                }),
                multisample: wgpu::MultisampleState::default(),

                multiview_mask: None,
                cache: None,
            })
        };

        let points = build(Primitive::Points, "touchcloud points pipeline");
        let lines = build(Primitive::LineStrip, "touchcloud lines pipeline");
        let triangles = build(Primitive::Triangles, "touchcloud triangles pipeline");

        log::debug!("cloud pipelines built (color={color_format:?}, depth={depth_format:?})");

        Self {
            points,
            lines,
            triangles,
            bind_group_layout,
        }
    }

    #[inline]
    pub fn get(&self, primitive: Primitive) -> &wgpu::RenderPipeline {
        match primitive {
            Primitive::Points => &self.points,
            Primitive::LineStrip => &self.lines,
            Primitive::Triangles => &self.triangles,
        }
    }

    #[inline]
    pub fn bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout
    }
}
