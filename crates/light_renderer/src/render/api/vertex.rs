//! Vertex type for light geometry

use bytemuck::{Pod, Zeroable};

use crate::foundation::color::PackedColor;

/// Textured, tinted 2D vertex in the batch layer's layout
///
/// 24 bytes: position, packed color, texture coordinates and a reserved
/// mix-color word that lights always leave at zero.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
pub struct LightVertex {
    /// World-space position
    pub position: [f32; 2],
    /// Packed tint including alpha
    pub color: PackedColor,
    /// Texture coordinates
    pub uv: [f32; 2],
    /// Reserved, always zero
    pub mix: u32,
}

impl LightVertex {
    /// Create a vertex
    pub const fn new(x: f32, y: f32, color: PackedColor, u: f32, v: f32) -> Self {
        Self {
            position: [x, y],
            color,
            uv: [u, v],
            mix: 0,
        }
    }
}
