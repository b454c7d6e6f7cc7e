//! Rendering backend implementations
//!
//! The light renderer is driven entirely through the traits in
//! [`crate::render::api`]. This module provides the in-process recording
//! backend used for headless inspection and tests; hosts supply their own
//! GPU-backed implementations.

pub mod recording;

pub use recording::{
    DrawCall, EventLog, FrameEvent, RecordingBackend, RecordingShader, RecordingTarget, StaticAtlas, TargetCall,
};
