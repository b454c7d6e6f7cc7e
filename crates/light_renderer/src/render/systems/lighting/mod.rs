//! 2D light accumulation and compositing
//!
//! Dynamic lights are drawn into a downscaled offscreen buffer and blended
//! onto the scene once per frame together with the ambient light.

pub mod circle_pool;
pub mod commands;
pub mod composite;
pub mod line_geometry;
pub mod queue;
pub mod renderer;

#[cfg(test)]
mod tests;

pub use circle_pool::{CircleLight, CircleLightPool};
pub use commands::{DrawCommand, SpriteLight};
pub use composite::{buffer_size, CompositeBuffer};
pub use line_geometry::{capsule_quads, CapsuleQuads, LineLight};
pub use queue::DeferredLightQueue;
pub use renderer::{LightFrameStats, LightPhase, LightRenderer, LightRules};
