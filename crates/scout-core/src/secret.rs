//! Secret management service trait.
//!
//! Defines the interface for loading the API credential for the
//! text-generation service.

use crate::config::SecretConfig;
use crate::error::{Result, ScoutError};

/// Service for managing secret configuration.
///
/// # Security Note
///
/// Implementations should ensure that:
/// - Secrets are never logged or exposed in error messages
/// - Secrets are loaded from locations only the user can read
#[async_trait::async_trait]
pub trait SecretService: Send + Sync {
    /// Loads the secret configuration.
    ///
    /// An absent secret file is not an error; it yields an empty config.
    async fn load_secrets(&self) -> Result<SecretConfig>;

    /// Returns the Gemini API key or `ScoutError::MissingCredential`.
    async fn require_gemini_api_key(&self) -> Result<String> {
        let secrets = self.load_secrets().await?;
        secrets
            .gemini_api_key()
            .map(str::to_string)
            .ok_or_else(|| {
                ScoutError::missing_credential(
                    "no Gemini API key found (set GOOGLE_API_KEY or add it to secret.json)",
                )
            })
    }
}
