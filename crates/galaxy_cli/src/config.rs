//! Galaxy configuration file.
//!
//! ```yaml
//! motion:
//!   smoothing: 0.1
//!   mobile_breakpoint: 768
//!   frame_rate_hz: 60
//! session:
//!   ttl_hours: 24
//! ```
//!
//! A missing file yields the defaults. `GALAXY_ADMIN_SECRET` overrides the
//! session secret.

use galaxy_motion::MotionConfig;
use galaxy_store::SessionConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

pub const ADMIN_SECRET_ENV: &str = "GALAXY_ADMIN_SECRET";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GalaxyConfig {
    pub motion: MotionConfig,
    pub session: SessionConfig,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(String),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

impl GalaxyConfig {
    /// Load from a YAML file; a file that does not exist gives the defaults.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::load_from_str(&content)
    }

    pub fn load_from_str(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Take the admin secret from `value` when it is set and non-empty.
    pub fn with_admin_secret(mut self, value: Option<String>) -> Self {
        if let Some(secret) = value.filter(|s| !s.is_empty()) {
            self.session.admin_secret = Some(secret);
        }
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.motion
            .validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;
        self.session
            .validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;
        Ok(())
    }

    /// File, then environment, then validation.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let config = Self::load_from_file(path)?
            .with_admin_secret(std::env::var(ADMIN_SECRET_ENV).ok());
        config.validate()?;
        Ok(config)
    }
}
