//! Light renderer
//!
//! Collects light submissions during a frame and composites them once per
//! frame:
//!
//! 1. Gameplay code submits circles, sprites, lines or raw geometry. Circles
//!    go into the [`CircleLightPool`], everything else into the
//!    [`DeferredLightQueue`].
//! 2. [`LightRenderer::draw`] binds the downscaled [`CompositeBuffer`],
//!    replays queued commands and then the pooled circles with the alpha
//!    channel max-blended, unbinds, and blends the buffer onto the scene
//!    through the ambient-aware [`LightShader`].
//! 3. The pool cursor and queue are reset, whether or not anything was drawn.

use serde::{Deserialize, Serialize};

use super::circle_pool::CircleLightPool;
use super::commands::{DrawCommand, SpriteLight};
use super::composite::CompositeBuffer;
use super::line_geometry::LineLight;
use super::queue::DeferredLightQueue;
use crate::config::{Config, LightConfig};
use crate::error::LightResult;
use crate::foundation::color::{Color, PackedColor};
use crate::foundation::logging::{debug, info, trace, warn};
use crate::foundation::math::Vec2;
use crate::render::api::{
    BlendEquation, Blending, DrawBackend, LightShader, LightVertex, OffscreenTarget, TextureAtlas, TextureId,
    TextureRegion,
};

/// Per-match lighting rules supplied by the game state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LightRules {
    /// Whether the current rules enable lighting at all
    pub lighting: bool,
    /// Scene-wide ambient color; its alpha is the darkness strength
    pub ambient_light: Color,
}

impl Default for LightRules {
    fn default() -> Self {
        Self {
            lighting: false,
            ambient_light: Color::new(0.01, 0.01, 0.04, 0.99),
        }
    }
}

/// Where the renderer is in its per-frame cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LightPhase {
    /// Nothing submitted since the last composite
    #[default]
    Idle,
    /// At least one light was accepted this frame
    Accumulating,
    /// Inside [`LightRenderer::draw`]
    Compositing,
}

/// Summary of one [`LightRenderer::draw`] call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LightFrameStats {
    /// Queued commands replayed, or discarded when not rendered
    pub commands: usize,
    /// Replayed commands that drew nothing, e.g. lines with missing regions
    pub skipped: usize,
    /// Circle lights drawn, or discarded when not rendered
    pub circles: usize,
    /// Whether the light buffer was composited onto the scene
    pub rendered: bool,
}

/// Pooled 2D light accumulator and compositor
///
/// Owns the circle pool, the command queue, the light buffer and the
/// composite shader. The batch layer and atlas are shared with the rest of
/// the host renderer and are passed to [`draw`](Self::draw) each frame.
pub struct LightRenderer<T: OffscreenTarget, S: LightShader> {
    config: LightConfig,
    rules: LightRules,
    light_drawing_enabled: bool,
    sprite_scale: Vec2,
    circles: CircleLightPool,
    queue: DeferredLightQueue,
    buffer: CompositeBuffer<T>,
    shader: S,
    circle_region: Option<TextureRegion>,
    warned_skipped: bool,
    phase: LightPhase,
}

impl<T: OffscreenTarget, S: LightShader> LightRenderer<T, S> {
    /// Create a renderer with default configuration
    pub fn new(target: T, shader: S) -> Self {
        Self::build(LightConfig::default(), target, shader)
    }

    /// Create a renderer from a validated configuration
    pub fn with_config(config: LightConfig, target: T, shader: S) -> LightResult<Self> {
        config.validate()?;
        Ok(Self::build(config, target, shader))
    }

    fn build(config: LightConfig, target: T, shader: S) -> Self {
        info!(
            "Light renderer created: buffer scale 1/{}, {} circle slots, {} command slots",
            config.scaling,
            config.initial_circle_capacity,
            config.initial_command_capacity
        );

        Self {
            rules: LightRules::default(),
            light_drawing_enabled: config.light_drawing_enabled,
            sprite_scale: Vec2::new(1.0, 1.0),
            circles: CircleLightPool::with_capacity(config.initial_circle_capacity),
            queue: DeferredLightQueue::with_capacity(config.initial_command_capacity),
            buffer: CompositeBuffer::new(target, config.scaling),
            shader,
            circle_region: None,
            warned_skipped: false,
            phase: LightPhase::Idle,
            config,
        }
    }

    /// Update the lighting rules for this frame
    pub fn set_rules(&mut self, rules: LightRules) {
        self.rules = rules;
    }

    /// Current lighting rules
    pub fn rules(&self) -> &LightRules {
        &self.rules
    }

    /// Toggle the global light drawing flag
    ///
    /// While off, submissions are ignored and [`draw`](Self::draw) discards
    /// any pending lights without rendering.
    ///
    /// This single flag gates both [`enabled`](Self::enabled) and `draw`.
    /// There is no separate switch that keeps the ambient pass running while
    /// refusing lights; clear [`LightRules::lighting`] for that instead.
    pub fn set_light_drawing_enabled(&mut self, enabled: bool) {
        self.light_drawing_enabled = enabled;
    }

    /// Global light drawing flag
    pub fn light_drawing_enabled(&self) -> bool {
        self.light_drawing_enabled
    }

    /// Set the sprite scale captured by later sprite submissions
    pub fn set_sprite_scale(&mut self, x: f32, y: f32) {
        self.sprite_scale = Vec2::new(x, y);
    }

    /// Sprite scale captured by sprite submissions
    pub fn sprite_scale(&self) -> Vec2 {
        self.sprite_scale
    }

    /// Whether lights submitted now will be accepted
    pub fn enabled(&self) -> bool {
        self.rules.lighting
            && self.rules.ambient_light.a > self.config.ambient_epsilon
            && self.light_drawing_enabled
    }

    /// Queue a draw command
    pub fn submit(&mut self, command: DrawCommand) {
        if !self.enabled() {
            return;
        }

        self.queue.push(command);
        self.phase = LightPhase::Accumulating;
    }

    /// Add a circular glow; ignored unless `radius` is positive
    pub fn submit_circle(&mut self, x: f32, y: f32, radius: f32, color: Color, opacity: f32) {
        if !self.enabled() || radius.is_nan() || radius <= 0.0 {
            return;
        }

        let packed = color.with_alpha(opacity).pack();
        self.circles.push(x, y, packed, radius);
        self.phase = LightPhase::Accumulating;
    }

    /// Add a sprite as a light, rotated in degrees
    ///
    /// The current sprite scale is captured now, not at draw time.
    pub fn submit_sprite(&mut self, x: f32, y: f32, region: TextureRegion, rotation: f32, color: Color, opacity: f32) {
        if !self.enabled() {
            return;
        }

        self.submit(DrawCommand::Sprite(SpriteLight {
            region,
            x,
            y,
            rotation,
            color: color.with_alpha(opacity).pack(),
            scale: self.sprite_scale,
        }));
    }

    /// Add an unrotated sprite as a light
    pub fn submit_region(&mut self, x: f32, y: f32, region: TextureRegion, color: Color, opacity: f32) {
        self.submit_sprite(x, y, region, 0.0, color, opacity);
    }

    /// Add a beam light from `(x1, y1)` to `(x2, y2)` with half-width `stroke`
    pub fn submit_line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, stroke: f32, tint: Color, alpha: f32) {
        if !self.enabled() {
            return;
        }

        let color = tint.with_alpha(alpha).pack();
        self.submit(DrawCommand::Line(LineLight::new(x1, y1, x2, y2, stroke, color)));
    }

    /// Add pre-built quads sampling `texture`
    pub fn submit_geometry(&mut self, texture: TextureId, vertices: impl Into<Vec<LightVertex>>) {
        if !self.enabled() {
            return;
        }

        self.submit(DrawCommand::Geometry { texture, vertices: vertices.into() });
    }

    /// Composite this frame's lights onto the current target and reset
    ///
    /// Pending lights are always cleared, including when light drawing is
    /// disabled or the offscreen target fails.
    pub fn draw(&mut self, backend: &mut dyn DrawBackend, atlas: &dyn TextureAtlas) -> LightResult<LightFrameStats> {
        if !self.light_drawing_enabled {
            let discarded = LightFrameStats {
                commands: self.queue.len(),
                skipped: 0,
                circles: self.circles.live_count(),
                rendered: false,
            };
            if discarded.commands + discarded.circles > 0 {
                trace!(
                    "Light drawing disabled: discarded {} commands and {} circles",
                    discarded.commands,
                    discarded.circles
                );
            }
            self.end_frame();
            return Ok(discarded);
        }

        self.phase = LightPhase::Compositing;
        let result = self.composite(backend, atlas);
        self.end_frame();
        result
    }

    fn composite(&mut self, backend: &mut dyn DrawBackend, atlas: &dyn TextureAtlas) -> LightResult<LightFrameStats> {
        if self.circle_region.is_none() {
            self.circle_region = atlas.find_region(&self.config.regions.circle_shadow);
            if self.circle_region.is_none() && !self.circles.is_empty() {
                warn!(
                    "Atlas has no '{}' region; skipping {} circle lights",
                    self.config.regions.circle_shadow,
                    self.circles.live_count()
                );
            }
        }

        self.buffer.resize_for(backend.viewport_size())?;

        backend.set_color(PackedColor::WHITE);
        let Self { queue, circles, circle_region, config, buffer, .. } = self;
        let accumulated = buffer.accumulate(Color::CLEAR, || {
            backend.set_sorting(false);
            backend.set_blend_equation(BlendEquation::Add, BlendEquation::Max);
            // Changing the equation alone leaves some backends with stale factors
            backend.apply_blending(Blending::NORMAL);

            let mut skipped = 0;
            let commands = queue.drain(|command| {
                if !command.execute(backend, atlas, &config.regions) {
                    skipped += 1;
                }
            });

            let mut drawn = 0;
            if let Some(region) = circle_region {
                for circle in circles.live() {
                    let size = circle.radius * 2.0;
                    backend.set_color(circle.color);
                    backend.draw_rect(region, circle.x, circle.y, size, size);
                }
                drawn = circles.live_count();
            }

            backend.reset();
            backend.set_sorting(true);
            (commands, skipped, drawn)
        });
        backend.set_blend_equation(BlendEquation::Add, BlendEquation::Add);
        let (commands, skipped, circles) = accumulated?;

        if skipped > 0 {
            if self.warned_skipped {
                debug!("Skipped {skipped} of {commands} light commands");
            } else {
                warn!("Skipped {skipped} of {commands} light commands; check the atlas regions. Repeats are logged at debug level");
                self.warned_skipped = true;
            }
        }

        backend.set_color(PackedColor::WHITE);
        self.shader.set_ambient(self.rules.ambient_light);
        self.buffer.blit(&self.shader)?;

        trace!("Composited {commands} light commands and {circles} circle lights");
        Ok(LightFrameStats { commands, skipped, circles, rendered: true })
    }

    fn end_frame(&mut self) {
        self.queue.clear();
        self.circles.reset();
        self.phase = LightPhase::Idle;
    }

    /// Current phase of the frame cycle
    pub fn phase(&self) -> LightPhase {
        self.phase
    }

    /// Circle lights submitted this frame
    pub fn circles(&self) -> &CircleLightPool {
        &self.circles
    }

    /// Commands queued this frame
    pub fn queue(&self) -> &DeferredLightQueue {
        &self.queue
    }

    /// The light buffer
    pub fn buffer(&self) -> &CompositeBuffer<T> {
        &self.buffer
    }

    /// The light buffer, mutably
    ///
    /// Intended for backend maintenance such as recreating GPU resources
    /// after device loss.
    pub fn buffer_mut(&mut self) -> &mut CompositeBuffer<T> {
        &mut self.buffer
    }

    /// The composite shader
    pub fn shader(&self) -> &S {
        &self.shader
    }

    /// Active configuration
    pub fn config(&self) -> &LightConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::backends::recording::{RecordingShader, RecordingTarget};

    fn renderer() -> LightRenderer<RecordingTarget, RecordingShader> {
        let mut renderer = LightRenderer::new(RecordingTarget::new(), RecordingShader::default());
        renderer.set_rules(LightRules { lighting: true, ambient_light: Color::new(0.0, 0.0, 0.0, 0.8) });
        renderer
    }

    #[test]
    fn test_enabled_requires_rules_ambient_and_flag() {
        let mut renderer = renderer();
        assert!(renderer.enabled());

        renderer.set_rules(LightRules { lighting: false, ..*renderer.rules() });
        assert!(!renderer.enabled());

        renderer.set_rules(LightRules { lighting: true, ambient_light: Color::new(0.0, 0.0, 0.0, 0.8) });
        renderer.set_light_drawing_enabled(false);
        assert!(!renderer.enabled());
    }

    #[test]
    fn test_enabled_ambient_threshold_is_exclusive() {
        let mut renderer = renderer();

        renderer.set_rules(LightRules { lighting: true, ambient_light: Color::BLACK.with_alpha(0.0001) });
        assert!(!renderer.enabled());

        renderer.set_rules(LightRules { lighting: true, ambient_light: Color::BLACK.with_alpha(0.0) });
        assert!(!renderer.enabled());

        renderer.set_rules(LightRules { lighting: true, ambient_light: Color::BLACK.with_alpha(0.0002) });
        assert!(renderer.enabled());
    }

    #[test]
    fn test_circle_requires_positive_radius() {
        let mut renderer = renderer();
        renderer.submit_circle(0.0, 0.0, 0.0, Color::WHITE, 1.0);
        renderer.submit_circle(0.0, 0.0, -3.0, Color::WHITE, 1.0);
        renderer.submit_circle(0.0, 0.0, f32::NAN, Color::WHITE, 1.0);
        assert_eq!(renderer.circles().live_count(), 0);
        assert_eq!(renderer.phase(), LightPhase::Idle);

        renderer.submit_circle(0.0, 0.0, 4.0, Color::WHITE, 1.0);
        assert_eq!(renderer.circles().live_count(), 1);
        assert_eq!(renderer.phase(), LightPhase::Accumulating);
    }

    #[test]
    fn test_circle_packs_opacity_into_alpha() {
        let mut renderer = renderer();
        renderer.submit_circle(1.0, 2.0, 3.0, Color::new(1.0, 0.0, 0.0, 0.25), 1.0);

        let circle = renderer.circles().live()[0];
        assert_eq!(circle.color, PackedColor(0xff00_00ff));
        assert_eq!((circle.x, circle.y, circle.radius), (1.0, 2.0, 3.0));
    }

    #[test]
    fn test_submissions_ignored_when_disabled() {
        let mut renderer = renderer();
        renderer.set_rules(LightRules { lighting: false, ..LightRules::default() });

        renderer.submit_circle(0.0, 0.0, 5.0, Color::WHITE, 1.0);
        renderer.submit_line(0.0, 0.0, 1.0, 1.0, 1.0, Color::WHITE, 1.0);
        renderer.submit_region(0.0, 0.0, TextureRegion::default(), Color::WHITE, 1.0);
        renderer.submit_geometry(TextureId(0), vec![LightVertex::default(); 4]);

        assert_eq!(renderer.circles().live_count(), 0);
        assert!(renderer.queue().is_empty());
        assert_eq!(renderer.phase(), LightPhase::Idle);
    }

    #[test]
    fn test_sprite_captures_scale_at_submission() {
        let mut renderer = renderer();
        renderer.set_sprite_scale(2.0, 0.5);
        renderer.submit_sprite(1.0, 1.0, TextureRegion::default(), 30.0, Color::WHITE, 0.5);
        renderer.set_sprite_scale(1.0, 1.0);

        match &renderer.queue().commands()[0] {
            DrawCommand::Sprite(sprite) => {
                assert_eq!(sprite.scale, Vec2::new(2.0, 0.5));
                assert_eq!(sprite.rotation, 30.0);
                assert_eq!(sprite.color.alpha(), 127);
            }
            other => panic!("expected sprite command, got {other:?}"),
        }
    }

    #[test]
    fn test_line_is_lowered_to_command() {
        let mut renderer = renderer();
        renderer.submit_line(0.0, 0.0, 10.0, 0.0, 2.0, Color::new(0.0, 1.0, 0.0, 1.0), 0.5);

        assert_eq!(
            renderer.queue().commands(),
            &[DrawCommand::Line(LineLight::new(0.0, 0.0, 10.0, 0.0, 2.0, PackedColor(0x7f00_ff00)))]
        );
    }

    #[test]
    fn test_with_config_validates() {
        let result = LightRenderer::with_config(
            LightConfig::new().with_scaling(0),
            RecordingTarget::new(),
            RecordingShader::default(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_config_flag_sets_initial_state() {
        let renderer = LightRenderer::with_config(
            LightConfig::new().with_light_drawing(false).with_capacity(16, 8),
            RecordingTarget::new(),
            RecordingShader::default(),
        )
        .unwrap();

        assert!(!renderer.light_drawing_enabled());
        assert_eq!(renderer.circles().capacity(), 16);
        assert!(renderer.queue().capacity() >= 8);
    }
}
