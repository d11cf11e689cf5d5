//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn at(pos: Vec2, color: [f32; 4]) -> Self {
        Self::new(pos.x, pos.y, color)
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Colors for game elements
pub mod colors {
    pub const SKY_TOP: [f32; 4] = [0.36, 0.72, 0.93, 1.0];
    pub const SKY_BOTTOM: [f32; 4] = [0.70, 0.88, 0.97, 1.0];
    pub const HILL: [f32; 4] = [0.40, 0.70, 0.33, 1.0];
    pub const HILL_DARK: [f32; 4] = [0.30, 0.58, 0.26, 1.0];
    pub const PIG: [f32; 4] = [1.0, 0.62, 0.72, 1.0];
    pub const PIG_SNOUT: [f32; 4] = [0.94, 0.45, 0.58, 1.0];
    pub const EYE: [f32; 4] = [0.08, 0.05, 0.08, 1.0];
    pub const BIRD: [f32; 4] = [0.85, 0.14, 0.14, 1.0];
    pub const BIRD_BELLY: [f32; 4] = [0.96, 0.86, 0.74, 1.0];
    pub const PANEL: [f32; 4] = [0.0, 0.0, 0.0, 0.6];
    pub const OVERLAY: [f32; 4] = [0.0, 0.0, 0.0, 0.5];
}
