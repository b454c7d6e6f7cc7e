//! Rendering module
//!
//! - [`api`]: traits for the batch layer, offscreen target, shader and atlas
//! - [`backends`]: recording implementations of those traits
//! - [`systems`]: the light accumulation and compositing system

pub mod api;
pub mod backends;
pub mod systems;

pub use api::{
    BackendError, BackendResult, BlendEquation, Blending, DrawBackend, LightShader, LightVertex, OffscreenTarget,
    TextureAtlas, TextureId, TextureRegion,
};
pub use systems::lighting::{DrawCommand, LightFrameStats, LightPhase, LightRenderer, LightRules};
