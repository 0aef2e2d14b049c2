//! JSON file configuration adapter.
//!
//! Implements [`ConfigPort`].  The file path comes from the
//! `GREENHOUSE_CONFIG` environment variable; without it the defaults apply.
//! Missing fields inside the file also fall back to their defaults.

use std::path::PathBuf;

use log::{info, warn};

use crate::app::ports::{ConfigError, ConfigPort};
use crate::config::SystemConfig;

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "GREENHOUSE_CONFIG";

#[derive(Debug, Clone, Default)]
pub struct JsonConfigAdapter {
    path: Option<PathBuf>,
}

impl JsonConfigAdapter {
    /// Resolve the path from [`CONFIG_ENV`].
    pub fn from_env() -> Self {
        Self {
            path: std::env::var_os(CONFIG_ENV).map(PathBuf::from),
        }
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }
}

impl ConfigPort for JsonConfigAdapter {
    fn load(&self) -> Result<SystemConfig, ConfigError> {
        let Some(path) = &self.path else {
            info!("Config: {} not set, using defaults", CONFIG_ENV);
            return Ok(SystemConfig::default());
        };

        let bytes = std::fs::read(path).map_err(|e| {
            warn!("Config: cannot read {}: {}", path.display(), e);
            ConfigError::IoError
        })?;
        let config: SystemConfig = serde_json::from_slice(&bytes).map_err(|e| {
            warn!("Config: {} is not valid JSON: {}", path.display(), e);
            ConfigError::Corrupted
        })?;
        config.validate()?;

        info!("Config loaded from {}", path.display());
        Ok(config)
    }
}
