//! Crate-level error type

use crate::config::ConfigError;
use crate::render::api::BackendError;

/// Light renderer errors
#[derive(thiserror::Error, Debug)]
pub enum LightError {
    /// The offscreen target failed
    #[error("Offscreen target error: {0}")]
    Backend(#[from] BackendError),

    /// Configuration could not be loaded or is invalid
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Result type for light renderer operations
pub type LightResult<T> = Result<T, LightError>;
