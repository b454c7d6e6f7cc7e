//! Recording backend
//!
//! Implements every collaborator trait by appending to a shared, ordered
//! event log instead of touching a GPU. A backend and a target created with
//! [`RecordingTarget::with_log`] write to the same log, so the exact
//! interleaving of batch state changes and target binds in a frame can be
//! inspected.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use crate::foundation::color::{Color, PackedColor};
use crate::render::api::{
    BackendError, BackendResult, BlendEquation, Blending, DrawBackend, LightShader, LightVertex, OffscreenTarget,
    TextureAtlas, TextureId, TextureRegion,
};

/// A call made on the batch layer
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    /// `set_color`
    SetColor(PackedColor),
    /// `reset`
    Reset,
    /// `set_sorting`
    Sorting(bool),
    /// `set_blend_equation`
    BlendEquation(BlendEquation, BlendEquation),
    /// `apply_blending`
    Blending(Blending),
    /// `push_scale`
    PushScale(f32, f32),
    /// `pop_scale`
    PopScale,
    /// `draw_sprite`
    Sprite {
        /// Texture page of the region
        texture: TextureId,
        /// Center x
        x: f32,
        /// Center y
        y: f32,
        /// Rotation in degrees
        rotation: f32,
    },
    /// `draw_rect`
    Rect {
        /// Texture page of the region
        texture: TextureId,
        /// Center x
        x: f32,
        /// Center y
        y: f32,
        /// Width
        width: f32,
        /// Height
        height: f32,
    },
    /// `draw_vertices`
    Vertices {
        /// Texture page sampled
        texture: TextureId,
        /// Submitted vertices
        vertices: Vec<LightVertex>,
    },
}

/// A call made on the offscreen target
#[derive(Debug, Clone, PartialEq)]
pub enum TargetCall {
    /// `resize`
    Resize(u32, u32),
    /// `begin`
    Begin(Color),
    /// `end`
    End,
    /// `blit`, with the shader's ambient uniform at the time
    Blit {
        /// Ambient color bound to the shader
        ambient: Color,
    },
}

/// One entry of a shared event log
#[derive(Debug, Clone, PartialEq)]
pub enum FrameEvent {
    /// Batch layer call
    Draw(DrawCall),
    /// Offscreen target call
    Target(TargetCall),
}

/// Shared, ordered event log
pub type EventLog = Rc<RefCell<Vec<FrameEvent>>>;

/// Batch layer that records every call
#[derive(Debug)]
pub struct RecordingBackend {
    log: EventLog,
    viewport: (u32, u32),
    scale_depth: usize,
}

impl RecordingBackend {
    /// Create a backend reporting the given viewport size
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            log: EventLog::default(),
            viewport: (width, height),
            scale_depth: 0,
        }
    }

    /// Change the reported viewport size
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.viewport = (width, height);
    }

    /// Handle to the event log, for sharing with a target
    pub fn log(&self) -> EventLog {
        Rc::clone(&self.log)
    }

    /// Every event recorded on the shared log
    pub fn events(&self) -> Vec<FrameEvent> {
        self.log.borrow().clone()
    }

    /// Batch layer calls only
    pub fn calls(&self) -> Vec<DrawCall> {
        self.log
            .borrow()
            .iter()
            .filter_map(|event| match event {
                FrameEvent::Draw(call) => Some(call.clone()),
                FrameEvent::Target(_) => None,
            })
            .collect()
    }

    /// Forget every recorded event
    pub fn clear(&mut self) {
        self.log.borrow_mut().clear();
    }

    /// Pushed scales not yet popped
    pub fn scale_depth(&self) -> usize {
        self.scale_depth
    }

    fn record(&self, call: DrawCall) {
        self.log.borrow_mut().push(FrameEvent::Draw(call));
    }
}

impl DrawBackend for RecordingBackend {
    fn viewport_size(&self) -> (u32, u32) {
        self.viewport
    }

    fn set_color(&mut self, color: PackedColor) {
        self.record(DrawCall::SetColor(color));
    }

    fn reset(&mut self) {
        self.scale_depth = 0;
        self.record(DrawCall::Reset);
    }

    fn set_sorting(&mut self, sorted: bool) {
        self.record(DrawCall::Sorting(sorted));
    }

    fn set_blend_equation(&mut self, color: BlendEquation, alpha: BlendEquation) {
        self.record(DrawCall::BlendEquation(color, alpha));
    }

    fn apply_blending(&mut self, blending: Blending) {
        self.record(DrawCall::Blending(blending));
    }

    fn push_scale(&mut self, x: f32, y: f32) {
        self.scale_depth += 1;
        self.record(DrawCall::PushScale(x, y));
    }

    fn pop_scale(&mut self) {
        self.scale_depth = self.scale_depth.saturating_sub(1);
        self.record(DrawCall::PopScale);
    }

    fn draw_sprite(&mut self, region: &TextureRegion, x: f32, y: f32, rotation: f32) {
        self.record(DrawCall::Sprite { texture: region.texture, x, y, rotation });
    }

    fn draw_rect(&mut self, region: &TextureRegion, x: f32, y: f32, width: f32, height: f32) {
        self.record(DrawCall::Rect { texture: region.texture, x, y, width, height });
    }

    fn draw_vertices(&mut self, texture: TextureId, vertices: &[LightVertex]) {
        self.record(DrawCall::Vertices { texture, vertices: vertices.to_vec() });
    }
}

/// Offscreen target that records every call
///
/// Failures can be injected for the next call of a given kind.
#[derive(Debug, Default)]
pub struct RecordingTarget {
    log: EventLog,
    size: (u32, u32),
    bound: bool,
    fail_resize: bool,
    fail_begin: bool,
    fail_blit: bool,
}

impl RecordingTarget {
    /// Create a target with its own log
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a target writing to an existing log
    pub fn with_log(log: EventLog) -> Self {
        Self { log, ..Self::default() }
    }

    /// Size of the last successful resize
    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    /// Whether the target is currently bound
    pub fn is_bound(&self) -> bool {
        self.bound
    }

    /// Target calls only
    pub fn calls(&self) -> Vec<TargetCall> {
        self.log
            .borrow()
            .iter()
            .filter_map(|event| match event {
                FrameEvent::Target(call) => Some(call.clone()),
                FrameEvent::Draw(_) => None,
            })
            .collect()
    }

    /// Make the next `resize` fail
    pub fn fail_next_resize(&mut self) {
        self.fail_resize = true;
    }

    /// Make the next `begin` fail
    pub fn fail_next_begin(&mut self) {
        self.fail_begin = true;
    }

    /// Make the next `blit` fail
    pub fn fail_next_blit(&mut self) {
        self.fail_blit = true;
    }

    fn record(&self, call: TargetCall) {
        self.log.borrow_mut().push(FrameEvent::Target(call));
    }
}

impl OffscreenTarget for RecordingTarget {
    fn resize(&mut self, width: u32, height: u32) -> BackendResult<()> {
        if std::mem::take(&mut self.fail_resize) {
            return Err(BackendError::ResizeFailed { width, height, reason: "injected failure".to_string() });
        }
        self.size = (width, height);
        self.record(TargetCall::Resize(width, height));
        Ok(())
    }

    fn begin(&mut self, clear: Color) -> BackendResult<()> {
        if std::mem::take(&mut self.fail_begin) {
            return Err(BackendError::BindFailed("injected failure".to_string()));
        }
        if self.bound {
            return Err(BackendError::BindFailed("target is already bound".to_string()));
        }
        self.bound = true;
        self.record(TargetCall::Begin(clear));
        Ok(())
    }

    fn end(&mut self) -> BackendResult<()> {
        if !self.bound {
            return Err(BackendError::UnbindFailed("target is not bound".to_string()));
        }
        self.bound = false;
        self.record(TargetCall::End);
        Ok(())
    }

    fn blit(&mut self, shader: &dyn LightShader) -> BackendResult<()> {
        if std::mem::take(&mut self.fail_blit) {
            return Err(BackendError::BlitFailed("injected failure".to_string()));
        }
        self.record(TargetCall::Blit { ambient: shader.ambient() });
        Ok(())
    }
}

/// Shader that only stores its ambient uniform
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RecordingShader {
    ambient: Option<Color>,
}

impl RecordingShader {
    /// Whether the ambient uniform was ever set
    pub fn is_bound(&self) -> bool {
        self.ambient.is_some()
    }
}

impl LightShader for RecordingShader {
    fn set_ambient(&mut self, ambient: Color) {
        self.ambient = Some(ambient);
    }

    fn ambient(&self) -> Color {
        self.ambient.unwrap_or(Color::CLEAR)
    }
}

/// Atlas backed by a fixed name-to-region map
#[derive(Debug, Clone, Default)]
pub struct StaticAtlas {
    regions: HashMap<String, TextureRegion>,
    lookups: Cell<usize>,
}

impl StaticAtlas {
    /// Create an empty atlas
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a named region
    #[must_use]
    pub fn with_region(mut self, name: impl Into<String>, region: TextureRegion) -> Self {
        self.regions.insert(name.into(), region);
        self
    }

    /// Number of `find_region` calls made so far
    pub fn lookups(&self) -> usize {
        self.lookups.get()
    }
}

impl TextureAtlas for StaticAtlas {
    fn find_region(&self, name: &str) -> Option<TextureRegion> {
        self.lookups.set(self.lookups.get() + 1);
        self.regions.get(name).copied()
    }
}
