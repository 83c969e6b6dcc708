use bytemuck::{Pod, Zeroable};
use glam::Vec3;

use crate::paint::Color;

/// Per-vertex rendering treatment, read by the fragment shader.
#[repr(i32)]
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum StyleTag {
    /// Point and line vertices; drawn with their flat color.
    Unlit = 0,
    /// Cube surface vertices; shaded by the rotating light.
    Lit = 1,
}

/// Vertex layout (52 bytes), identical for every draw style:
///
///  offset  0  position   [f32; 3]  loc 0
///  offset 12  normal     [f32; 3]  loc 1
///  offset 24  texcoord   [f32; 2]  loc 2
///  offset 32  color      [f32; 4]  loc 3
///  offset 48  style_tag  i32       loc 4
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub texcoord: [f32; 2],
    pub color: [f32; 4],
    pub style_tag: i32,
}

impl Vertex {
    const ATTRS: [wgpu::VertexAttribute; 5] = wgpu::vertex_attr_array![
        0 => Float32x3, // position
        1 => Float32x3, // normal
        2 => Float32x2, // texcoord
        3 => Float32x4, // color
        4 => Sint32     // style_tag
    ];

    /// Unlit vertex with a zero normal, as appended for points and lines.
    pub fn unlit(position: Vec3, color: Color) -> Self {
        Self {
            position: position.to_array(),
            normal: [0.0; 3],
            texcoord: [0.0; 2],
            color: color.to_array(),
            style_tag: StyleTag::Unlit as i32,
        }
    }

    /// Lit vertex with an explicit normal, as appended for cube corners.
    pub fn lit(position: Vec3, normal: Vec3, color: Color) -> Self {
        Self {
            position: position.to_array(),
            normal: normal.to_array(),
            texcoord: [0.0; 2],
            color: color.to_array(),
            style_tag: StyleTag::Lit as i32,
        }
    }

    #[inline]
    pub fn position(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }

    #[inline]
    pub fn normal(&self) -> Vec3 {
        Vec3::from_array(self.normal)
    }

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}
