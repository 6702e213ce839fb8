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

/// Opaque color from 8-bit sRGB channels
pub const fn rgb8(r: u8, g: u8, b: u8) -> [f32; 4] {
    [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0]
}

/// Colors for game elements (sRGB, written to a non-sRGB surface as-is)
pub mod colors {
    use super::rgb8;

    pub const SKY: [f32; 4] = rgb8(135, 206, 235);
    pub const PLATFORM: [f32; 4] = rgb8(0, 255, 0);
    pub const BOUNDARY: [f32; 4] = rgb8(128, 128, 128);
    pub const PLAYER: [f32; 4] = rgb8(255, 0, 0);
    pub const EYE_WHITE: [f32; 4] = rgb8(255, 255, 255);
    pub const PUPIL: [f32; 4] = rgb8(0, 0, 0);
    pub const BALL: [f32; 4] = rgb8(255, 215, 0);
    pub const BALL_HIGHLIGHT: [f32; 4] = rgb8(255, 235, 100);
    pub const TRIANGLE: [f32; 4] = rgb8(255, 192, 203);
}
