//! Light draw commands
//!
//! Anything that is not a plain circle is queued as a [`DrawCommand`] and
//! replayed into the light buffer during compositing. Commands carry plain
//! data; all state they depend on (tint, sprite scale) is captured when the
//! light is submitted.

use super::line_geometry::{capsule_quads, LineLight};
use crate::config::LightRegionNames;
use crate::foundation::color::PackedColor;
use crate::foundation::logging::{debug, warn};
use crate::foundation::math::Vec2;
use crate::render::api::{DrawBackend, LightVertex, TextureAtlas, TextureId, TextureRegion};

/// A sprite drawn as a light
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteLight {
    /// Region to draw
    pub region: TextureRegion,
    /// Center x
    pub x: f32,
    /// Center y
    pub y: f32,
    /// Rotation in degrees
    pub rotation: f32,
    /// Tint with opacity in alpha
    pub color: PackedColor,
    /// Sprite scale in effect when the light was submitted
    pub scale: Vec2,
}

/// Deferred light rendering instruction
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Draw a sprite at its natural size under a captured scale
    Sprite(SpriteLight),
    /// Draw a capsule-shaped beam
    Line(LineLight),
    /// Draw caller-built quads
    Geometry {
        /// Texture page the quads sample
        texture: TextureId,
        /// Quad vertices, four per quad
        vertices: Vec<LightVertex>,
    },
}

impl DrawCommand {
    /// Replay this command into `backend`; returns `false` if it was skipped
    ///
    /// Line lights resolve their atlas regions on every execution. A missing
    /// region skips the line.
    pub fn execute(&self, backend: &mut dyn DrawBackend, atlas: &dyn TextureAtlas, regions: &LightRegionNames) -> bool {
        match self {
            Self::Sprite(sprite) => {
                backend.set_color(sprite.color);
                backend.push_scale(sprite.scale.x, sprite.scale.y);
                backend.draw_sprite(&sprite.region, sprite.x, sprite.y, sprite.rotation);
                backend.pop_scale();
                true
            }
            Self::Line(line) => {
                let (Some(end), Some(mid)) = (
                    atlas.find_region(&regions.circle_end),
                    atlas.find_region(&regions.circle_mid),
                ) else {
                    debug!(
                        "Skipping line light: atlas is missing '{}' or '{}'",
                        regions.circle_end,
                        regions.circle_mid
                    );
                    return false;
                };

                backend.set_color(line.color);
                let quads = capsule_quads(line, &mid, &end);
                for quad in quads.quads() {
                    backend.draw_vertices(end.texture, quad);
                }
                true
            }
            Self::Geometry { texture, vertices } => {
                if vertices.len() % 4 != 0 {
                    warn!("Dropping {} trailing vertices of an incomplete quad", vertices.len() % 4);
                }
                let whole = vertices.len() - vertices.len() % 4;
                if whole > 0 {
                    backend.draw_vertices(*texture, &vertices[..whole]);
                }
                whole > 0
            }
        }
    }
}

impl From<SpriteLight> for DrawCommand {
    fn from(sprite: SpriteLight) -> Self {
        Self::Sprite(sprite)
    }
}

impl From<LineLight> for DrawCommand {
    fn from(line: LineLight) -> Self {
        Self::Line(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::backends::recording::{DrawCall, RecordingBackend, StaticAtlas};

    fn atlas() -> StaticAtlas {
        StaticAtlas::new()
            .with_region("circle-end", TextureRegion::new(TextureId(3), 0.0, 0.0, 0.5, 0.5))
            .with_region("circle-mid", TextureRegion::new(TextureId(3), 0.5, 0.5, 1.0, 1.0))
    }

    #[test]
    fn test_sprite_scopes_its_scale() {
        let mut backend = RecordingBackend::new(64, 64);
        let region = TextureRegion::new(TextureId(1), 0.0, 0.0, 1.0, 1.0).with_size(8.0, 8.0);
        let command = DrawCommand::Sprite(SpriteLight {
            region,
            x: 1.0,
            y: 2.0,
            rotation: 45.0,
            color: PackedColor(0x40ff_ffff),
            scale: Vec2::new(2.0, 3.0),
        });

        assert!(command.execute(&mut backend, &atlas(), &LightRegionNames::default()));

        assert_eq!(
            backend.calls(),
            &[
                DrawCall::SetColor(PackedColor(0x40ff_ffff)),
                DrawCall::PushScale(2.0, 3.0),
                DrawCall::Sprite { texture: TextureId(1), x: 1.0, y: 2.0, rotation: 45.0 },
                DrawCall::PopScale,
            ]
        );
        assert_eq!(backend.scale_depth(), 0);
    }

    #[test]
    fn test_line_emits_three_quads_on_end_page() {
        let mut backend = RecordingBackend::new(64, 64);
        let line = LineLight::new(0.0, 0.0, 10.0, 0.0, 2.0, PackedColor::WHITE);

        assert!(DrawCommand::from(line).execute(&mut backend, &atlas(), &LightRegionNames::default()));

        let quads: Vec<_> = backend
            .calls()
            .iter()
            .filter_map(|call| match call {
                DrawCall::Vertices { texture, vertices } => Some((*texture, vertices.len())),
                _ => None,
            })
            .collect();
        assert_eq!(quads, vec![(TextureId(3), 4), (TextureId(3), 4), (TextureId(3), 4)]);
        assert_eq!(backend.calls()[0], DrawCall::SetColor(PackedColor::WHITE));
    }

    #[test]
    fn test_line_without_regions_is_skipped() {
        let mut backend = RecordingBackend::new(64, 64);
        let line = LineLight::new(0.0, 0.0, 10.0, 0.0, 2.0, PackedColor::WHITE);

        let drawn = DrawCommand::from(line).execute(&mut backend, &StaticAtlas::new(), &LightRegionNames::default());

        assert!(!drawn);
        assert!(backend.calls().is_empty());
    }

    #[test]
    fn test_geometry_drops_incomplete_quad() {
        let mut backend = RecordingBackend::new(64, 64);
        let command = DrawCommand::Geometry {
            texture: TextureId(9),
            vertices: vec![LightVertex::default(); 6],
        };

        assert!(command.execute(&mut backend, &atlas(), &LightRegionNames::default()));

        assert_eq!(
            backend.calls(),
            &[DrawCall::Vertices { texture: TextureId(9), vertices: vec![LightVertex::default(); 4] }]
        );
    }

    #[test]
    fn test_geometry_with_only_partial_quad_draws_nothing() {
        let mut backend = RecordingBackend::new(64, 64);
        let command = DrawCommand::Geometry {
            texture: TextureId(9),
            vertices: vec![LightVertex::default(); 3],
        };

        assert!(!command.execute(&mut backend, &atlas(), &LightRegionNames::default()));
        assert!(backend.calls().is_empty());
    }
}
