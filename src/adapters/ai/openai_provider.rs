//! OpenAI chat-completions client implementing [`TextGenerator`].
//!
//! ```ignore
//! let config = OpenAIConfig::new(api_key)
//!     .with_model("gpt-4o")
//!     .with_timeout(Duration::from_secs(30));
//! let generator = OpenAIProvider::new(config);
//! ```
//!
//! An empty API key yields a provider that answers every request with
//! [`AIError::NotConfigured`] instead of calling out.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tokio::time::sleep;

use crate::ports::{AIError, GenerationRequest, TextGenerator};

pub const DEFAULT_MODEL: &str = "gpt-4o";
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Seconds to wait on 429 when the error text carries no hint.
const DEFAULT_RETRY_AFTER_SECS: u32 = 30;

#[derive(Debug, Clone)]
pub struct OpenAIConfig {
    api_key: SecretString,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
    pub max_retries: u32,
}

impl OpenAIConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::new(api_key.into()),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(60),
            max_retries: 2,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn is_configured(&self) -> bool {
        !self.api_key.expose_secret().trim().is_empty()
    }
}

pub struct OpenAIProvider {
    config: OpenAIConfig,
    client: Client,
}

impl OpenAIProvider {
    pub fn new(config: OpenAIConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .unwrap_or_default();
        Self { config, client }
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'))
    }

    fn to_openai_request(&self, request: &GenerationRequest) -> OpenAIRequest {
        OpenAIRequest {
            model: self.config.model.clone(),
            messages: vec![
                OpenAIMessage {
                    role: "system".to_string(),
                    content: request.system_prompt.clone(),
                },
                OpenAIMessage {
                    role: "user".to_string(),
                    content: request.prompt.clone(),
                },
            ],
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        }
    }

    async fn send_request(&self, request: &GenerationRequest) -> Result<Response, AIError> {
        self.client
            .post(self.completions_url())
            .bearer_auth(self.config.api_key.expose_secret())
            .json(&self.to_openai_request(request))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AIError::Timeout {
                        timeout_secs: self.config.timeout.as_secs(),
                    }
                } else if e.is_connect() {
                    AIError::Network(format!("Connection failed: {}", e))
                } else {
                    AIError::Network(e.to_string())
                }
            })
    }

    async fn complete_once(&self, request: &GenerationRequest) -> Result<String, AIError> {
        let response = self.send_request(request).await?;
        let status = response.status().as_u16();
        if !(200..300).contains(&status) {
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(status, &body));
        }

        let parsed: OpenAIResponse = response
            .json()
            .await
            .map_err(|e| AIError::Parse(format!("Failed to parse response: {}", e)))?;
        first_choice(parsed)
    }
}

#[async_trait]
impl TextGenerator for OpenAIProvider {
    async fn generate(&self, request: GenerationRequest) -> Result<String, AIError> {
        if !self.config.is_configured() {
            return Err(AIError::NotConfigured);
        }

        let mut attempt = 0;
        loop {
            match self.complete_once(&request).await {
                Ok(text) => return Ok(text),
                Err(err) if err.is_retryable() && attempt < self.config.max_retries => {
                    tracing::warn!(error = %err, attempt, "OpenAI request failed, retrying");
                    // 1s, 2s, 4s, ...
                    sleep(Duration::from_secs(1 << attempt)).await;
                    attempt += 1;
                }
                Err(err) => {
                    tracing::error!(error = %err, model = %self.config.model, "OpenAI request failed");
                    return Err(err);
                }
            }
        }
    }
}

fn status_error(status: u16, body: &str) -> AIError {
    match status {
        401 | 403 => AIError::AuthenticationFailed,
        429 => AIError::RateLimited {
            retry_after_secs: parse_retry_after(body),
        },
        400 => AIError::InvalidRequest(body.to_string()),
        500..=599 => AIError::Unavailable(format!("Server error {}: {}", status, body)),
        _ => AIError::Network(format!("Unexpected status {}: {}", status, body)),
    }
}

/// Reads the "try again in Ns" hint OpenAI puts in rate-limit messages.
fn parse_retry_after(body: &str) -> u32 {
    let message = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(str::to_string));

    message
        .as_deref()
        .and_then(|m| m.split_once("try again in "))
        .and_then(|(_, rest)| {
            let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
            digits.parse().ok()
        })
        .unwrap_or(DEFAULT_RETRY_AFTER_SECS)
}

fn first_choice(response: OpenAIResponse) -> Result<String, AIError> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .map(|content| content.trim().to_string())
        .ok_or_else(|| AIError::Parse("No choices in response".to_string()))
}

// ════════════════════════════════════════════════════════════════════════════════
// Wire types
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Serialize)]
struct OpenAIRequest {
    model: String,
    messages: Vec<OpenAIMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Serialize)]
struct OpenAIMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct OpenAIResponse {
    choices: Vec<OpenAIChoice>,
}

#[derive(Debug, Deserialize)]
struct OpenAIChoice {
    message: OpenAIResponseMessage,
}

#[derive(Debug, Deserialize)]
struct OpenAIResponseMessage {
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_key_is_not_configured() {
        let provider = OpenAIProvider::new(OpenAIConfig::new(""));
        let result = provider.generate(GenerationRequest::new("sys", "hi")).await;
        assert_eq!(result, Err(AIError::NotConfigured));
    }

    #[test]
    fn request_carries_system_and_user_messages() {
        let provider = OpenAIProvider::new(OpenAIConfig::new("sk-test"));
        let body = provider.to_openai_request(&GenerationRequest::new("sys", "hi").with_max_tokens(300));
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["model"], DEFAULT_MODEL);
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "hi");
        assert_eq!(json["max_tokens"], 300);
        assert!(json.get("temperature").is_none());
    }

    #[test]
    fn completions_url_tolerates_trailing_slash() {
        let provider = OpenAIProvider::new(OpenAIConfig::new("k").with_base_url("http://localhost:9000/v1/"));
        assert_eq!(provider.completions_url(), "http://localhost:9000/v1/chat/completions");
    }

    #[test]
    fn statuses_map_to_errors() {
        assert_eq!(status_error(401, ""), AIError::AuthenticationFailed);
        assert!(matches!(status_error(400, "bad"), AIError::InvalidRequest(b) if b == "bad"));
        assert!(matches!(status_error(503, ""), AIError::Unavailable(_)));
        assert!(status_error(502, "").is_retryable());
        assert!(!status_error(401, "").is_retryable());
    }

    #[test]
    fn rate_limit_reads_retry_hint() {
        let body = r#"{"error":{"message":"Rate limit reached. Please try again in 7s."}}"#;
        assert_eq!(status_error(429, body), AIError::RateLimited { retry_after_secs: 7 });
        assert_eq!(parse_retry_after("not json"), DEFAULT_RETRY_AFTER_SECS);
    }

    #[test]
    fn first_choice_is_trimmed() {
        let response: OpenAIResponse = serde_json::from_str(
            r#"{"choices":[{"message":{"role":"assistant","content":"  Bel bilocale\n"}}]}"#,
        )
        .unwrap();
        assert_eq!(first_choice(response).unwrap(), "Bel bilocale");

        let empty: OpenAIResponse = serde_json::from_str(r#"{"choices":[]}"#).unwrap();
        assert!(matches!(first_choice(empty), Err(AIError::Parse(_))));
    }
}
