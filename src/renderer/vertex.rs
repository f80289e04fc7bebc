//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
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

/// Colors for game elements (sRGB, written to a non-sRGB target as-is)
pub mod colors {
    const fn rgb(r: u8, g: u8, b: u8) -> [f32; 4] {
        [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0]
    }

    pub const BACKGROUND: [f32; 4] = rgb(0, 0, 0);
    pub const STAR: [f32; 4] = rgb(255, 255, 255);
    pub const PADDLE: [f32; 4] = rgb(255, 255, 255);
    /// Dark sky blue edge lines on the paddle
    pub const PADDLE_EDGE: [f32; 4] = rgb(0, 80, 200);
    pub const BALL: [f32; 4] = rgb(255, 255, 255);
    pub const BRICK: [f32; 4] = rgb(255, 0, 0);
    pub const BRICK_SHADOW: [f32; 4] = rgb(200, 0, 0);
    pub const BRICK_HIGHLIGHT: [f32; 4] = rgb(255, 255, 255);
    pub const TEXT: [f32; 4] = rgb(255, 255, 255);

    /// Black at the given opacity
    pub const fn overlay(alpha: f32) -> [f32; 4] {
        [0.0, 0.0, 0.0, alpha]
    }
}
