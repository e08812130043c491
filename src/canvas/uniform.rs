use crate::color::hex_to_rgba;

/// Canvas size in pixels, used by the vertex stage to reach clip space.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ResolutionUniform {
    pub resolution: [f32; 2],
    pub _padding: [f32; 2], // Padding to make it 16-byte aligned
}

impl ResolutionUniform {
    pub fn new(canvas_size: u32) -> Self {
        let size = canvas_size as f32;
        Self {
            resolution: [size, size],
            _padding: [0.0, 0.0],
        }
    }
}

/// Flat fill color for a single draw.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ColorUniform {
    pub color: [f32; 4],
}

impl ColorUniform {
    pub fn from_hex(hex: &str) -> Self {
        Self {
            color: hex_to_rgba(hex),
        }
    }
}
