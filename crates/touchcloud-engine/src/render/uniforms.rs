use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

use crate::geometry::transform::{rotation, translation};

/// Per-frame uniform block (144 bytes, std140-compatible).
///
///  offset   0  mvp    mat4x4<f32>
///  offset  64  model  mat4x4<f32>  (spin only; rotates normals)
///  offset 128  light  vec4<f32>    (xyz = unit direction, w unused)
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct FrameUniforms {
    pub mvp: [[f32; 4]; 4],
    pub model: [[f32; 4]; 4],
    pub light: [f32; 4],
}

impl FrameUniforms {
    pub fn new(projection: Mat4, camera_distance: f32, spin_angle: f32, light: Vec3) -> Self {
        Self {
            mvp: frame_transform(projection, camera_distance, spin_angle).to_cols_array_2d(),
            model: rotation(spin_angle, Vec3::Y).to_cols_array_2d(),
            light: light.extend(0.0).to_array(),
        }
    }
}

/// projection × translation(0, 0, -distance) × rotation(spin, +Y).
pub fn frame_transform(projection: Mat4, camera_distance: f32, spin_angle: f32) -> Mat4 {
    projection * translation(0.0, 0.0, -camera_distance) * rotation(spin_angle, Vec3::Y)
}

/// Unit direction towards a light orbiting the Y axis at `angle`.
pub fn light_direction(angle: f32, radius: f32, height: f32) -> Vec3 {
    let (s, c) = angle.sin_cos();
    Vec3::new(s * radius, height, c * radius).normalize_or_zero()
}

/// Index cycling over a fixed number of slots.
#[derive(Debug, Clone)]
pub struct SlotRing {
    len: usize,
    index: usize,
}

impl SlotRing {
    pub fn new(len: usize) -> Self {
        Self { len: len.max(1), index: 0 }
    }

    /// Moves to the next slot and returns it.
    pub fn advance(&mut self) -> usize {
        self.index = (self.index + 1) % self.len;
        self.index
    }
}

/// One uniform buffer + bind group per in-flight frame.
///
/// Slots are chosen by the caller's `SlotRing`. Writing only the slot just
/// advanced to means a frame the GPU is still reading is never overwritten
/// while the ring is no larger than the in-flight limit.
pub struct UniformRing {
    buffers: Vec<wgpu::Buffer>,
    bind_groups: Vec<wgpu::BindGroup>,
}

impl UniformRing {
    pub fn new(device: &wgpu::Device, layout: &wgpu::BindGroupLayout, len: usize) -> Self {
        let len = len.max(1);
        let mut buffers = Vec::with_capacity(len);
        let mut bind_groups = Vec::with_capacity(len);

        for _ in 0..len {
            let buffer = device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("touchcloud frame ubo"),
                size: std::mem::size_of::<FrameUniforms>() as u64,
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            });
            let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("touchcloud frame bind group"),
                layout,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: buffer.as_entire_binding(),
                }],
            });
            buffers.push(buffer);
            bind_groups.push(bind_group);
        }

        Self {
            buffers,
            bind_groups,
        }
    }

    /// Uploads `uniforms` into `slot`.
    pub fn write(&self, queue: &wgpu::Queue, slot: usize, uniforms: &FrameUniforms) {
        queue.write_buffer(&self.buffers[slot], 0, bytemuck::bytes_of(uniforms));
    }

    pub fn bind_group(&self, slot: usize) -> &wgpu::BindGroup {
        &self.bind_groups[slot]
    }
}
