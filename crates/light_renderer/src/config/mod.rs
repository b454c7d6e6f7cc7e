//! Configuration system
//!
//! Light renderer settings can be built in code or loaded from TOML or RON
//! files. All values have defaults matching the stock renderer.

use std::path::Path;

use crate::foundation::logging::debug;

pub use serde::{Serialize, Deserialize};

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Check that loaded values are usable
    fn validate(&self) -> Result<(), ConfigError> {
        Ok(())
    }

    /// Load configuration from file
    fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;

        let config: Self = match extension(path) {
            Some("toml") => toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))?,
            Some("ron") => ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))?,
            _ => return Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        };

        config.validate()?;
        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Save configuration to file
    fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let contents = match extension(path) {
            Some("toml") => toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?,
            Some("ron") => ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?,
            _ => return Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

fn extension(path: &Path) -> Option<&str> {
    path.extension().and_then(|ext| ext.to_str())
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// A value is outside its accepted range
    #[error("Invalid value for {field}: {reason}")]
    Invalid {
        /// Name of the offending field
        field: &'static str,
        /// Why the value was rejected
        reason: String,
    },
}

/// Atlas region names used for the built-in light shapes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightRegionNames {
    /// End cap sprite of line lights
    pub circle_end: String,
    /// Body sprite of line lights
    pub circle_mid: String,
    /// Soft radial falloff sprite used for circle lights
    pub circle_shadow: String,
}

impl Default for LightRegionNames {
    fn default() -> Self {
        Self {
            circle_end: "circle-end".to_string(),
            circle_mid: "circle-mid".to_string(),
            circle_shadow: "circle-shadow".to_string(),
        }
    }
}

/// # Light Renderer Configuration
///
/// Controls the resolution of the light buffer, the ambient threshold below
/// which lights are skipped, and which atlas regions the built-in shapes use.
///
/// ```toml
/// scaling = 4
/// ambient_epsilon = 0.0001
/// light_drawing_enabled = true
///
/// [regions]
/// circle_shadow = "circle-shadow"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightConfig {
    /// Downscale factor from the viewport to the light buffer
    pub scaling: u32,
    /// Ambient alpha must exceed this for lights to be accepted
    pub ambient_epsilon: f32,
    /// Initial value of the global light drawing flag
    pub light_drawing_enabled: bool,
    /// Circle slots reserved up front
    pub initial_circle_capacity: usize,
    /// Draw command slots reserved up front
    pub initial_command_capacity: usize,
    /// Atlas region names for built-in light shapes
    pub regions: LightRegionNames,
}

impl LightConfig {
    /// Create a configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the light buffer downscale factor
    #[must_use]
    pub fn with_scaling(mut self, scaling: u32) -> Self {
        self.scaling = scaling;
        self
    }

    /// Set the ambient alpha threshold
    #[must_use]
    pub fn with_ambient_epsilon(mut self, epsilon: f32) -> Self {
        self.ambient_epsilon = epsilon;
        self
    }

    /// Set the initial global light drawing flag
    #[must_use]
    pub fn with_light_drawing(mut self, enabled: bool) -> Self {
        self.light_drawing_enabled = enabled;
        self
    }

    /// Set custom atlas region names
    #[must_use]
    pub fn with_regions(mut self, regions: LightRegionNames) -> Self {
        self.regions = regions;
        self
    }

    /// Reserve pool and queue capacity up front
    #[must_use]
    pub fn with_capacity(mut self, circles: usize, commands: usize) -> Self {
        self.initial_circle_capacity = circles;
        self.initial_command_capacity = commands;
        self
    }
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            scaling: 4,
            ambient_epsilon: 0.0001,
            light_drawing_enabled: true,
            initial_circle_capacity: 0,
            initial_command_capacity: 0,
            regions: LightRegionNames::default(),
        }
    }
}

impl Config for LightConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.scaling == 0 {
            return Err(ConfigError::Invalid {
                field: "scaling",
                reason: "must be at least 1".to_string(),
            });
        }
        if !self.ambient_epsilon.is_finite() || self.ambient_epsilon < 0.0 {
            return Err(ConfigError::Invalid {
                field: "ambient_epsilon",
                reason: format!("must be a finite non-negative number, got {}", self.ambient_epsilon),
            });
        }
        Ok(())
    }
}
