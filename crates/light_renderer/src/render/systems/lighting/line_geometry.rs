//! Line light geometry
//!
//! A line light is drawn as a capsule: a body quad spanning the segment and
//! one cap quad extruded past each endpoint. The body samples the `mid`
//! region and both caps sample the `end` region, so the falloff runs across
//! the beam's width and fades out past its ends.
//!
//! ```text
//!  l2 +-----------------------------+ l3
//!     |            body             |       v1 = stroke, perpendicular
//!  p1 *-----------------------------* p2
//!     |                             |
//!  l1 +-----------------------------+ l4
//!  <-- start cap                end cap -->  v3 = stroke, along the axis
//! ```

use crate::foundation::color::PackedColor;
use crate::foundation::math::{angle_exact, trns_exact, Vec2};
use crate::render::api::{LightVertex, TextureRegion};

/// A segment light lowered from a line submission
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineLight {
    /// Segment start
    pub start: Vec2,
    /// Segment end
    pub end: Vec2,
    /// Half-width of the beam
    pub stroke: f32,
    /// Tint with alpha applied
    pub color: PackedColor,
}

impl LineLight {
    /// Create a line light
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32, stroke: f32, color: PackedColor) -> Self {
        Self {
            start: Vec2::new(x1, y1),
            end: Vec2::new(x2, y2),
            stroke,
            color,
        }
    }

    /// Direction of the segment in degrees; 0 for a zero-length segment
    pub fn rotation(&self) -> f32 {
        let delta = self.end - self.start;
        angle_exact(delta.x, delta.y)
    }
}

/// The three quads of a capsule, each in strip-compatible corner order
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CapsuleQuads {
    /// Rectangle spanning the segment
    pub body: [LightVertex; 4],
    /// Cap extruded past the segment end
    pub end_cap: [LightVertex; 4],
    /// Cap extruded before the segment start
    pub start_cap: [LightVertex; 4],
}

impl CapsuleQuads {
    /// Quads in submission order: body, end cap, start cap
    pub fn quads(&self) -> [&[LightVertex; 4]; 3] {
        [&self.body, &self.end_cap, &self.start_cap]
    }

    /// All twelve vertices in submission order
    pub fn vertices(&self) -> [LightVertex; 12] {
        let mut out = [LightVertex::default(); 12];
        for (chunk, quad) in out.chunks_exact_mut(4).zip(self.quads()) {
            chunk.copy_from_slice(quad);
        }
        out
    }
}

/// Build a textured quad with the region's V axis flipped
///
/// Corners are given as (near-left, near-right, far-right, far-left) relative
/// to the direction the quad extends in.
fn flipped_quad(corners: [Vec2; 4], region: &TextureRegion, color: PackedColor) -> [LightVertex; 4] {
    let (u, v, u2, v2) = (region.u, region.v2, region.u2, region.v);
    let [a, b, c, d] = corners;
    [
        LightVertex::new(a.x, a.y, color, u, v),
        LightVertex::new(b.x, b.y, color, u, v2),
        LightVertex::new(c.x, c.y, color, u2, v2),
        LightVertex::new(d.x, d.y, color, u2, v),
    ]
}

/// Compute the capsule quads for `line`
///
/// `mid` textures the body and `end` textures both caps. The caller draws all
/// three quads with `end`'s texture page, so both regions must share it.
pub fn capsule_quads(line: &LineLight, mid: &TextureRegion, end: &TextureRegion) -> CapsuleQuads {
    let rotation = line.rotation();
    let (p1, p2) = (line.start, line.end);

    let side = trns_exact(rotation + 90.0, line.stroke);
    let l1 = p1 - side;
    let l2 = p1 + side;
    let l3 = p2 + side;
    let l4 = p2 - side;

    let forward = trns_exact(rotation, line.stroke);

    CapsuleQuads {
        body: flipped_quad([l1, l2, l3, l4], mid, line.color),
        end_cap: flipped_quad([l4, l3, l3 + forward, l4 + forward], end, line.color),
        start_cap: flipped_quad([l2, l1, l1 - forward, l2 - forward], end, line.color),
    }
}
