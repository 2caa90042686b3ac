//! Configuration service implementation.
//!
//! Loads `AppConfig` from `config.toml` (`~/.config/scout/config.toml` unless
//! a path is given) and caches it.

use crate::paths::ScoutPaths;
use scout_core::config::AppConfig;
use scout_core::error::{Result, ScoutError};
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

/// Configuration service that loads and caches the application configuration.
#[derive(Debug, Clone)]
pub struct ConfigService {
    /// Explicit config file; `None` means the default location
    path: Option<PathBuf>,
    /// Cached configuration loaded from file.
    config: Arc<RwLock<Option<AppConfig>>>,
}

impl ConfigService {
    /// Creates a service for the default config location.
    pub fn new() -> Self {
        Self::with_path(None)
    }

    /// Creates a service for an explicit config file.
    pub fn with_path(path: Option<PathBuf>) -> Self {
        Self {
            path,
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Reads and parses the config file.
    ///
    /// A missing file yields defaults; an unreadable or malformed file is an error.
    pub fn load(&self) -> Result<AppConfig> {
        let path = self.resolve_path()?;
        if !path.exists() {
            tracing::debug!("[Config] No config file at {:?}, using defaults", path);
            return Ok(AppConfig::default());
        }

        let content = std::fs::read_to_string(&path)?;
        let config: AppConfig = toml::from_str(&content)?;
        tracing::info!("[Config] Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Gets the configuration, loading it on first access.
    ///
    /// Load failures are logged and replaced by defaults.
    pub fn get_config(&self) -> AppConfig {
        {
            let cached = self.config.read().unwrap_or_else(|e| e.into_inner());
            if let Some(config) = cached.as_ref() {
                return config.clone();
            }
        }

        let loaded = self.load().unwrap_or_else(|e| {
            tracing::warn!("[Config] Falling back to defaults: {}", e);
            AppConfig::default()
        });

        let mut cached = self.config.write().unwrap_or_else(|e| e.into_inner());
        *cached = Some(loaded.clone());
        loaded
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        let mut cached = self.config.write().unwrap_or_else(|e| e.into_inner());
        *cached = None;
    }

    fn resolve_path(&self) -> Result<PathBuf> {
        match &self.path {
            Some(path) => Ok(path.clone()),
            None => ScoutPaths::default()
                .config_file()
                .map_err(|e| ScoutError::config(e.to_string())),
        }
    }
}

impl Default for ConfigService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let service = ConfigService::with_path(Some(dir.path().join("config.toml")));
        assert_eq!(service.load().unwrap(), AppConfig::default());
    }

    #[test]
    fn test_loads_and_caches_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "model = \"gemini-2.5-flash\"\ntranscript_window = 6").unwrap();

        let service = ConfigService::with_path(Some(file.path().to_path_buf()));
        let config = service.get_config();
        assert_eq!(config.model, "gemini-2.5-flash");
        assert_eq!(config.transcript_window, 6);

        // Cached value survives the file changing underneath.
        std::fs::write(file.path(), "model = \"other\"").unwrap();
        assert_eq!(service.get_config().model, "gemini-2.5-flash");

        service.invalidate_cache();
        assert_eq!(service.get_config().model, "other");
    }

    #[test]
    fn test_malformed_file_is_serialization_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "model = [").unwrap();

        let service = ConfigService::with_path(Some(file.path().to_path_buf()));
        let err = service.load().unwrap_err();
        assert!(matches!(err, ScoutError::Serialization { ref format, .. } if format == "TOML"));
        assert_eq!(service.get_config(), AppConfig::default());
    }
}
