//! Color representation and packing
//!
//! Lights carry a floating point [`Color`] at the API boundary and a
//! [`PackedColor`] once they are queued, so each vertex needs only a single
//! 32-bit color attribute.

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// RGBA color with floating point components in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    /// Red channel
    pub r: f32,
    /// Green channel
    pub g: f32,
    /// Blue channel
    pub b: f32,
    /// Alpha channel
    pub a: f32,
}

impl Color {
    /// Fully transparent black, used to clear the light buffer
    pub const CLEAR: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    /// Opaque white, the neutral draw tint
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);

    /// Opaque black
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);

    /// Create a new color
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Same color with the alpha channel replaced
    #[must_use]
    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Pack into a single 32-bit value
    pub fn pack(self) -> PackedColor {
        PackedColor::from_rgba(self.r, self.g, self.b, self.a)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Color packed into 32 bits, ABGR from most to least significant byte
///
/// This is RGBA8 in little-endian memory order, which is what the vertex
/// layout of the batch layer expects.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Pod, Zeroable)]
pub struct PackedColor(pub u32);

impl PackedColor {
    /// Packed opaque white
    pub const WHITE: Self = Self(0xffff_ffff);

    /// Packed fully transparent black
    pub const CLEAR: Self = Self(0);

    /// Pack floating point channels; values are clamped to `[0, 1]`
    pub fn from_rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        let channel = |value: f32| (value.clamp(0.0, 1.0) * 255.0) as u32;
        Self(channel(a) << 24 | channel(b) << 16 | channel(g) << 8 | channel(r))
    }

    /// Unpack back to floating point channels
    pub fn to_color(self) -> Color {
        let channel = |shift: u32| ((self.0 >> shift) & 0xff) as f32 / 255.0;
        Color::new(channel(0), channel(8), channel(16), channel(24))
    }

    /// Alpha channel as a byte
    pub const fn alpha(self) -> u8 {
        (self.0 >> 24) as u8
    }
}

impl From<Color> for PackedColor {
    fn from(color: Color) -> Self {
        color.pack()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_pack_channel_order() {
        assert_eq!(Color::new(1.0, 0.0, 0.0, 0.0).pack(), PackedColor(0x0000_00ff));
        assert_eq!(Color::new(0.0, 1.0, 0.0, 0.0).pack(), PackedColor(0x0000_ff00));
        assert_eq!(Color::new(0.0, 0.0, 1.0, 0.0).pack(), PackedColor(0x00ff_0000));
        assert_eq!(Color::new(0.0, 0.0, 0.0, 1.0).pack(), PackedColor(0xff00_0000));
        assert_eq!(Color::WHITE.pack(), PackedColor::WHITE);
        assert_eq!(Color::CLEAR.pack(), PackedColor::CLEAR);
    }

    #[test]
    fn test_pack_clamps_out_of_range() {
        assert_eq!(Color::new(2.0, -1.0, 0.0, 1.5).pack(), PackedColor(0xff00_00ff));
    }

    #[test]
    fn test_with_alpha_keeps_rgb() {
        let color = Color::new(0.2, 0.4, 0.6, 1.0).with_alpha(0.5);
        assert_eq!(color, Color::new(0.2, 0.4, 0.6, 0.5));
    }

    #[test]
    fn test_unpack_is_close() {
        let color = Color::new(0.25, 0.5, 0.75, 1.0);
        let unpacked = color.pack().to_color();
        assert_abs_diff_eq!(unpacked.r, color.r, epsilon = 1.0 / 255.0);
        assert_abs_diff_eq!(unpacked.g, color.g, epsilon = 1.0 / 255.0);
        assert_abs_diff_eq!(unpacked.b, color.b, epsilon = 1.0 / 255.0);
        assert_eq!(color.pack().alpha(), 255);
    }
}
