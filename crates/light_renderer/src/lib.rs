//! # Light Renderer
//!
//! Per-frame 2D dynamic lighting for sprite-based renderers. Gameplay code
//! submits circular glows, sprite lights and beam lights while drawing; once
//! per frame the renderer accumulates them into a downscaled offscreen buffer
//! and blends that buffer over the scene against the ambient light.
//!
//! ## Features
//!
//! - **Pooled circles**: circle lights reuse slots across frames
//! - **Deferred commands**: sprites, beams and raw quads are replayed in order
//! - **Capsule beams**: line lights built from three textured quads
//! - **Max-blend accumulation**: overlapping lights do not oversaturate
//! - **Backend agnostic**: drives the host's batch layer through traits
//!
//! ## Quick Start
//!
//! ```rust
//! use light_renderer::prelude::*;
//!
//! let target = RecordingTarget::new();
//! let mut lights = LightRenderer::new(target, RecordingShader::default());
//! lights.set_rules(LightRules { lighting: true, ambient_light: Color::new(0.0, 0.0, 0.1, 0.9) });
//!
//! lights.submit_circle(64.0, 64.0, 24.0, Color::new(1.0, 0.8, 0.4, 1.0), 0.7);
//! lights.submit_line(0.0, 0.0, 128.0, 32.0, 6.0, Color::WHITE, 0.5);
//!
//! let mut batch = RecordingBackend::new(1280, 720);
//! let atlas = StaticAtlas::new()
//!     .with_region("circle-shadow", TextureRegion::new(TextureId(1), 0.0, 0.0, 0.5, 0.5))
//!     .with_region("circle-end", TextureRegion::new(TextureId(1), 0.5, 0.0, 1.0, 0.5))
//!     .with_region("circle-mid", TextureRegion::new(TextureId(1), 0.5, 0.5, 1.0, 1.0));
//!
//! let stats = lights.draw(&mut batch, &atlas)?;
//! assert_eq!((stats.commands, stats.circles), (1, 1));
//! # Ok::<(), light_renderer::LightError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod foundation;
pub mod render;

mod error;

pub use error::{LightError, LightResult};

/// Common imports for light renderer users
pub mod prelude {
    pub use crate::{
        LightError, LightResult,
        config::{Config, ConfigError, LightConfig, LightRegionNames},
        foundation::color::{Color, PackedColor},
        render::{
            api::{
                BlendEquation, Blending, DrawBackend, LightShader, LightVertex, OffscreenTarget, TextureAtlas,
                TextureId, TextureRegion,
            },
            backends::{RecordingBackend, RecordingShader, RecordingTarget, StaticAtlas},
            systems::lighting::{DrawCommand, LightFrameStats, LightPhase, LightRenderer, LightRules},
        },
    };
}
