//! Collaborator interfaces consumed by the light renderer
//!
//! The light renderer does not own a graphics API. It drives whatever batch
//! layer, offscreen target and atlas the host already has through these
//! traits.

pub mod atlas;
pub mod draw_backend;
pub mod offscreen;
pub mod vertex;

pub use atlas::{TextureAtlas, TextureId, TextureRegion};
pub use draw_backend::{BlendEquation, BlendFactor, Blending, DrawBackend};
pub use offscreen::{BackendError, BackendResult, LightShader, OffscreenTarget};
pub use vertex::LightVertex;
