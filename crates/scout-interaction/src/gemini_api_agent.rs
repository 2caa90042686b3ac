//! GeminiApiAgent - Direct REST API implementation for Gemini.
//!
//! Calls `models/{model}:generateContent` and returns the first text part of
//! the response. One request per call; nothing is retried.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use scout_core::config::DEFAULT_MODEL;
use scout_core::error::Result;
use scout_core::generation::{GenerationError, TextGenerator};
use scout_core::secret::SecretService;
use serde::{Deserialize, Serialize};

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Agent implementation that talks to the Gemini HTTP API.
#[derive(Clone)]
pub struct GeminiApiAgent {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
    system_instruction: Option<String>,
}

impl std::fmt::Debug for GeminiApiAgent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiApiAgent")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl GeminiApiAgent {
    /// Creates a new agent with the provided API key and model.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            base_url: BASE_URL.to_string(),
            system_instruction: None,
        }
    }

    /// Builds an agent from the configured credential.
    ///
    /// Fails with `ScoutError::MissingCredential` when no key is configured, so
    /// no request can ever go out without one.
    pub async fn from_secret_service(
        secrets: &dyn SecretService,
        model: Option<&str>,
    ) -> Result<Self> {
        let api_key = secrets.require_gemini_api_key().await?;
        let model = model.unwrap_or(DEFAULT_MODEL);
        tracing::info!("[Gemini] Agent ready (model: {})", model);
        Ok(Self::new(api_key, model))
    }

    /// Overrides the model after construction.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Points the agent at a different API root (used by tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Adds a system instruction that will be sent alongside every request.
    pub fn with_system_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = Some(instruction.into());
        self
    }

    fn build_request(&self, prompt: &str) -> GenerateContentRequest {
        let system_instruction = self.system_instruction.as_ref().map(|text| Content {
            role: "system".to_string(),
            parts: vec![Part {
                text: text.to_string(),
            }],
        });

        GenerateContentRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            system_instruction,
        }
    }

    async fn send_request(
        &self,
        body: &GenerateContentRequest,
    ) -> std::result::Result<String, GenerationError> {
        let url = format!(
            "{}/{model}:generateContent",
            self.base_url,
            model = self.model
        );

        tracing::debug!("[Gemini] generateContent (model: {})", self.model);
        let response = self
            .client
            .post(url)
            .query(&[("key", self.api_key.as_str())])
            .json(body)
            .send()
            .await
            // Strip the URL: it carries the API key as a query parameter.
            .map_err(|err| {
                GenerationError::Request(format!(
                    "Gemini API request failed: {}",
                    err.without_url()
                ))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read Gemini error body".to_string());
            tracing::warn!("[Gemini] Request failed with HTTP {}", status.as_u16());
            return Err(map_http_error(status, body_text));
        }

        let parsed: GenerateContentResponse = response.json().await.map_err(|err| {
            GenerationError::InvalidResponse(format!("Failed to parse Gemini response: {err}"))
        })?;

        extract_text_response(parsed)
    }
}

#[async_trait]
impl TextGenerator for GeminiApiAgent {
    async fn generate(&self, prompt: &str) -> std::result::Result<String, GenerationError> {
        let request = self.build_request(prompt);
        self.send_request(&request).await
    }

    fn model(&self) -> &str {
        &self.model
    }
}

#[derive(Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
}

#[derive(Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<ContentResponse>,
}

#[derive(Deserialize)]
struct ContentResponse {
    #[serde(default)]
    parts: Vec<PartResponse>,
}

#[derive(Deserialize)]
struct PartResponse {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ErrorWrapper {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    status: Option<String>,
}

fn extract_text_response(
    response: GenerateContentResponse,
) -> std::result::Result<String, GenerationError> {
    response
        .candidates
        .into_iter()
        .flatten()
        .filter_map(|candidate| candidate.content)
        .flat_map(|content| content.parts)
        .find_map(|part| part.text)
        .ok_or(GenerationError::EmptyResponse)
}

fn map_http_error(status: StatusCode, body: String) -> GenerationError {
    let message = serde_json::from_str::<ErrorWrapper>(&body)
        .map(|wrapper| {
            let status_text = wrapper.error.status.unwrap_or_default();
            let msg = wrapper.error.message.unwrap_or_else(|| body.clone());
            if status_text.is_empty() {
                msg
            } else {
                format!("{status_text}: {msg}")
            }
        })
        .unwrap_or_else(|_| body.clone());

    GenerationError::Http {
        status: status.as_u16(),
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_shape() {
        let agent = GeminiApiAgent::new("k", "m").with_system_instruction("be brief");
        let body = serde_json::to_value(agent.build_request("hello")).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "contents": [{"role": "user", "parts": [{"text": "hello"}]}],
                "system_instruction": {"role": "system", "parts": [{"text": "be brief"}]}
            })
        );
    }

    #[test]
    fn test_request_omits_missing_system_instruction() {
        let agent = GeminiApiAgent::new("k", "m");
        let body = serde_json::to_value(agent.build_request("hi")).unwrap();
        assert!(body.get("system_instruction").is_none());
    }

    #[test]
    fn test_extract_first_text_part() {
        let response: GenerateContentResponse = serde_json::from_value(serde_json::json!({
            "candidates": [
                {"content": {"parts": [{"inlineData": {}}, {"text": "first"}]}},
                {"content": {"parts": [{"text": "second"}]}}
            ]
        }))
        .unwrap();
        assert_eq!(extract_text_response(response).unwrap(), "first");
    }

    #[test]
    fn test_extract_without_candidates_is_empty() {
        let response: GenerateContentResponse =
            serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(
            extract_text_response(response).unwrap_err(),
            GenerationError::EmptyResponse
        );
    }

    #[test]
    fn test_map_http_error_uses_error_body() {
        let body = r#"{"error":{"code":403,"message":"API key not valid","status":"PERMISSION_DENIED"}}"#;
        let err = map_http_error(StatusCode::FORBIDDEN, body.to_string());
        assert_eq!(
            err,
            GenerationError::Http {
                status: 403,
                message: "PERMISSION_DENIED: API key not valid".to_string(),
            }
        );
    }

    #[test]
    fn test_map_http_error_falls_back_to_raw_body() {
        let err = map_http_error(StatusCode::BAD_GATEWAY, "upstream down".to_string());
        assert_eq!(err.to_string(), "HTTP 502: upstream down");
    }

    #[test]
    fn test_debug_hides_api_key() {
        let agent = GeminiApiAgent::new("super-secret", "gemini-2.0-flash");
        assert!(!format!("{agent:?}").contains("super-secret"));
    }
}
