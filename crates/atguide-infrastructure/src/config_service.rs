//! Configuration service implementation.
//!
//! Loads the root configuration from `~/.config/atguide/config.toml` and
//! caches it. A missing or unreadable file falls back to defaults so the
//! service can always produce a usable configuration.

use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};
use tracing::warn;

use atguide_core::config::AppConfig;
use atguide_core::error::{AtguideError, Result};

/// Configuration service that loads and caches the root configuration.
#[derive(Debug, Clone)]
pub struct ConfigService {
    /// Cached configuration loaded from file.
    /// Uses RwLock for thread-safe lazy loading.
    config: Arc<RwLock<Option<AppConfig>>>,
    path: Option<PathBuf>,
}

impl ConfigService {
    /// Creates a service reading from the default location
    /// (`~/.config/atguide/config.toml`).
    pub fn new() -> Self {
        Self {
            config: Arc::new(RwLock::new(None)),
            path: default_config_path(),
        }
    }

    /// Creates a service reading from an explicit path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config: Arc::new(RwLock::new(None)),
            path: Some(path.into()),
        }
    }

    /// Gets the configuration, loading from file if not cached. Load
    /// failures are logged and replaced with the defaults.
    pub fn get_config(&self) -> AppConfig {
        {
            let read_lock = self.config.read().unwrap_or_else(|e| e.into_inner());
            if let Some(ref cached) = *read_lock {
                return cached.clone();
            }
        }

        let loaded = match self.load_config() {
            Ok(config) => config,
            Err(err) => {
                warn!(error = %err, "failed to load configuration, using defaults");
                AppConfig::default()
            }
        };

        {
            let mut write_lock = self.config.write().unwrap_or_else(|e| e.into_inner());
            *write_lock = Some(loaded.clone());
        }

        loaded
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        let mut write_lock = self.config.write().unwrap_or_else(|e| e.into_inner());
        *write_lock = None;
    }

    fn load_config(&self) -> Result<AppConfig> {
        let Some(path) = &self.path else {
            return Ok(AppConfig::default());
        };
        if !path.exists() {
            return Ok(AppConfig::default());
        }

        let content = fs::read_to_string(path).map_err(|err| {
            AtguideError::config(format!(
                "failed to read configuration at {}: {err}",
                path.display()
            ))
        })?;
        let config = toml::from_str(&content)?;
        Ok(config)
    }
}

impl Default for ConfigService {
    fn default() -> Self {
        Self::new()
    }
}

/// Returns the path to the configuration file:
/// `~/.config/atguide/config.toml`.
fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("atguide").join("config.toml"))
}
