//! Draw/Batch Layer Trait
//!
//! Defines the interface between the light renderer and the host's sprite
//! batch. Keeps light accumulation independent of the graphics API that
//! actually submits quads.

use super::atlas::{TextureId, TextureRegion};
use super::vertex::LightVertex;
use crate::foundation::color::PackedColor;

/// Blend equation applied to one channel group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlendEquation {
    /// `src + dst`
    Add,
    /// `max(src, dst)`
    Max,
}

/// Blend factor for source or destination
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlendFactor {
    /// 1
    One,
    /// Source alpha
    SrcAlpha,
    /// 1 - source alpha
    OneMinusSrcAlpha,
}

/// Blend function: source and destination factors for color and alpha
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Blending {
    /// Source color factor
    pub src: BlendFactor,
    /// Destination color factor
    pub dst: BlendFactor,
    /// Source alpha factor
    pub src_alpha: BlendFactor,
    /// Destination alpha factor
    pub dst_alpha: BlendFactor,
}

impl Blending {
    /// Standard premultiplied-free alpha blending
    pub const NORMAL: Self = Self {
        src: BlendFactor::SrcAlpha,
        dst: BlendFactor::OneMinusSrcAlpha,
        src_alpha: BlendFactor::One,
        dst_alpha: BlendFactor::OneMinusSrcAlpha,
    };
}

/// Backend-agnostic sprite batch interface
///
/// Calls are immediate-mode and infallible: the batch layer buffers or
/// flushes as it sees fit. Color, scale and sort mode are sticky state that
/// persists until changed or [`reset`](Self::reset).
pub trait DrawBackend {
    /// Current render target size in pixels
    fn viewport_size(&self) -> (u32, u32);

    /// Set the tint applied to subsequent sprites
    fn set_color(&mut self, color: PackedColor);

    /// Restore default tint, scale and blending
    fn reset(&mut self);

    /// Enable or disable paint-order sorting of submitted sprites
    fn set_sorting(&mut self, sorted: bool);

    /// Set separate blend equations for color and alpha
    ///
    /// The backend must support separate equations; light accumulation
    /// relies on `(Add, Max)`.
    fn set_blend_equation(&mut self, color: BlendEquation, alpha: BlendEquation);

    /// Apply a blend function
    fn apply_blending(&mut self, blending: Blending);

    /// Push a sprite scale factor
    fn push_scale(&mut self, x: f32, y: f32);

    /// Pop the last pushed sprite scale factor
    fn pop_scale(&mut self);

    /// Draw a region centered at `(x, y)` at its natural size, rotated in degrees
    fn draw_sprite(&mut self, region: &TextureRegion, x: f32, y: f32, rotation: f32);

    /// Draw a region centered at `(x, y)` stretched to `width` x `height`
    fn draw_rect(&mut self, region: &TextureRegion, x: f32, y: f32, width: f32, height: f32);

    /// Draw pre-built quads; `vertices.len()` is a multiple of 4
    fn draw_vertices(&mut self, texture: TextureId, vertices: &[LightVertex]);
}
