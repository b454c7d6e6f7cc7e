//! Offscreen render target and composite shader interfaces

use thiserror::Error;

use crate::foundation::color::Color;

/// Offscreen target error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    /// Target storage could not be (re)allocated
    #[error("Failed to resize offscreen target to {width}x{height}: {reason}")]
    ResizeFailed {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
        /// Backend-specific reason
        reason: String,
    },
    /// Target could not be bound for drawing
    #[error("Failed to bind offscreen target: {0}")]
    BindFailed(String),
    /// Target could not be unbound
    #[error("Failed to unbind offscreen target: {0}")]
    UnbindFailed(String),
    /// Blitting onto the main target failed
    #[error("Failed to blit offscreen target: {0}")]
    BlitFailed(String),
}

/// Result type for offscreen target operations
pub type BackendResult<T> = Result<T, BackendError>;

/// Shader program used to blend the light buffer onto the scene
pub trait LightShader {
    /// Set the ambient color uniform
    fn set_ambient(&mut self, ambient: Color);

    /// Current value of the ambient color uniform
    fn ambient(&self) -> Color;
}

/// GPU color target that lights are accumulated into
pub trait OffscreenTarget {
    /// Reallocate storage for the given size
    fn resize(&mut self, width: u32, height: u32) -> BackendResult<()>;

    /// Bind the target for drawing and clear it
    fn begin(&mut self, clear: Color) -> BackendResult<()>;

    /// Unbind the target, restoring the previous one
    fn end(&mut self) -> BackendResult<()>;

    /// Blend the target onto the currently bound target through `shader`
    fn blit(&mut self, shader: &dyn LightShader) -> BackendResult<()>;
}
