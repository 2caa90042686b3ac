//! Secret service implementation.
//!
//! The Gemini API key is taken from the `GOOGLE_API_KEY` environment variable
//! when set, otherwise from `secret.json` in the scout config directory.

use crate::paths::ScoutPaths;
use scout_core::config::{GeminiConfig, SecretConfig};
use scout_core::error::{Result, ScoutError};
use scout_core::secret::SecretService;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Environment variable checked before the secret file.
pub const API_KEY_ENV: &str = "GOOGLE_API_KEY";

/// Service for managing secret configuration.
///
/// The loaded config is cached so the file is read at most once.
///
/// # Example
///
/// ```ignore
/// use scout_infrastructure::SecretServiceImpl;
/// use scout_core::secret::SecretService;
///
/// let service = SecretServiceImpl::new(None);
/// let key = service.require_gemini_api_key().await?;
/// ```
#[derive(Clone)]
pub struct SecretServiceImpl {
    secret_path: Option<PathBuf>,
    env_var: Option<String>,
    secrets: Arc<RwLock<Option<SecretConfig>>>,
}

impl SecretServiceImpl {
    /// Creates a service rooted at `base_path` (default: platform config dir).
    pub fn new(base_path: Option<&Path>) -> Self {
        let secret_path = ScoutPaths::new(base_path).secret_file().ok();
        Self {
            secret_path,
            env_var: Some(API_KEY_ENV.to_string()),
            secrets: Arc::new(RwLock::new(None)),
        }
    }

    /// Reads the key from `var` instead of `GOOGLE_API_KEY`.
    pub fn with_env_var(mut self, var: impl Into<String>) -> Self {
        self.env_var = Some(var.into());
        self
    }

    /// Ignores the environment and reads only the secret file.
    pub fn without_env(mut self) -> Self {
        self.env_var = None;
        self
    }

    fn from_env(&self) -> Option<SecretConfig> {
        let var = self.env_var.as_deref()?;
        let api_key = std::env::var(var).ok().filter(|v| !v.trim().is_empty())?;
        tracing::debug!("[Secrets] Using API key from ${}", var);
        Some(SecretConfig {
            gemini: Some(GeminiConfig { api_key }),
        })
    }

    async fn from_file(&self) -> Result<SecretConfig> {
        let Some(path) = &self.secret_path else {
            return Ok(SecretConfig::default());
        };

        match tokio::fs::read_to_string(path).await {
            Ok(content) => {
                let config: SecretConfig = serde_json::from_str(&content).map_err(|e| {
                    ScoutError::Serialization {
                        format: "JSON".to_string(),
                        message: format!("{}: {}", path.display(), e),
                    }
                })?;
                tracing::debug!("[Secrets] Loaded secret file {:?}", path);
                Ok(config)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("[Secrets] No secret file at {:?}", path);
                Ok(SecretConfig::default())
            }
            Err(e) => Err(e.into()),
        }
    }
}

impl Default for SecretServiceImpl {
    fn default() -> Self {
        Self::new(None)
    }
}

#[async_trait::async_trait]
impl SecretService for SecretServiceImpl {
    async fn load_secrets(&self) -> Result<SecretConfig> {
        if let Some(cached) = self.secrets.read().await.as_ref() {
            return Ok(cached.clone());
        }

        let loaded = match self.from_env() {
            Some(config) => config,
            None => self.from_file().await?,
        };

        *self.secrets.write().await = Some(loaded.clone());
        Ok(loaded)
    }
}
