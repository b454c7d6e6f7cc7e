//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used by the light renderer:
//! - Math types and angle helpers
//! - Color representation and packing
//! - Logging utilities

pub mod math;
pub mod color;
pub mod logging;
