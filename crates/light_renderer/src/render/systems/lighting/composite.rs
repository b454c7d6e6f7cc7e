//! Composite buffer
//!
//! Owns the downscaled offscreen target lights are accumulated into. The
//! target is resized lazily to follow the viewport and is bound only for the
//! duration of an [`accumulate`](CompositeBuffer::accumulate) scope.

use crate::foundation::color::Color;
use crate::foundation::logging::{debug, error};
use crate::render::api::{BackendResult, LightShader, OffscreenTarget};

/// Light buffer size for a viewport, never smaller than 1x1
pub fn buffer_size(viewport: (u32, u32), scaling: u32) -> (u32, u32) {
    let scaling = scaling.max(1);
    ((viewport.0 / scaling).max(1), (viewport.1 / scaling).max(1))
}

/// Unbinds the target when dropped unless it was ended explicitly
struct BoundTarget<'a, T: OffscreenTarget> {
    target: &'a mut T,
    ended: bool,
}

impl<'a, T: OffscreenTarget> BoundTarget<'a, T> {
    fn begin(target: &'a mut T, clear: Color) -> BackendResult<Self> {
        target.begin(clear)?;
        Ok(Self { target, ended: false })
    }

    fn end(mut self) -> BackendResult<()> {
        self.ended = true;
        self.target.end()
    }
}

impl<T: OffscreenTarget> Drop for BoundTarget<'_, T> {
    fn drop(&mut self) {
        if !self.ended {
            if let Err(err) = self.target.end() {
                error!("Failed to unbind light buffer during unwind: {err}");
            }
        }
    }
}

/// Downscaled offscreen light accumulation target
#[derive(Debug)]
pub struct CompositeBuffer<T: OffscreenTarget> {
    target: T,
    scaling: u32,
    width: u32,
    height: u32,
}

impl<T: OffscreenTarget> CompositeBuffer<T> {
    /// Wrap `target`; it is sized on the first [`resize_for`](Self::resize_for)
    pub fn new(target: T, scaling: u32) -> Self {
        Self {
            target,
            scaling: scaling.max(1),
            width: 0,
            height: 0,
        }
    }

    /// Current buffer size, `(0, 0)` before the first resize
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Resize to match `viewport`; returns whether the target was reallocated
    pub fn resize_for(&mut self, viewport: (u32, u32)) -> BackendResult<bool> {
        let (width, height) = buffer_size(viewport, self.scaling);
        if (width, height) == (self.width, self.height) {
            return Ok(false);
        }

        self.target.resize(width, height)?;
        debug!(
            "Light buffer resized {}x{} -> {}x{} (viewport {}x{})",
            self.width, self.height, width, height, viewport.0, viewport.1
        );
        self.width = width;
        self.height = height;
        Ok(true)
    }

    /// Bind and clear the buffer, run `draw`, then unbind
    ///
    /// The buffer is unbound even if `draw` panics.
    pub fn accumulate<R>(&mut self, clear: Color, draw: impl FnOnce() -> R) -> BackendResult<R> {
        let bound = BoundTarget::begin(&mut self.target, clear)?;
        let result = draw();
        bound.end()?;
        Ok(result)
    }

    /// Blend the buffer onto the current target through `shader`
    pub fn blit(&mut self, shader: &dyn LightShader) -> BackendResult<()> {
        self.target.blit(shader)
    }

    /// The wrapped target
    pub fn target(&self) -> &T {
        &self.target
    }

    /// The wrapped target, mutably
    pub fn target_mut(&mut self) -> &mut T {
        &mut self.target
    }
}
