//! Client for the external AI grading API.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use crate::config::AiConfig;
use essay_core::{build_prompt, UpstreamFailure};

/// Source of raw grading text for an essay.
///
/// Implementations never fail: problems are reported as an
/// [`UpstreamFailure`] JSON envelope in place of the AI text.
#[async_trait]
pub trait Grader: Send + Sync {
    async fn analyze(&self, essay: &str) -> String;
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

/// Chat-completion client for DeepSeek and other OpenAI-compatible APIs.
pub struct DeepSeekClient {
    client: reqwest::Client,
    config: AiConfig,
}

impl DeepSeekClient {
    pub fn new(config: AiConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        tracing::info!(
            "AI grading client initialized (model: {}, url: {})",
            config.model,
            config.api_url
        );
        Ok(Self { client, config })
    }

    /// One request, no retries.
    async fn complete(&self, essay: &str) -> Result<String, UpstreamFailure> {
        let body = ChatRequest {
            model: &self.config.model,
            messages: vec![ChatMessage {
                role: "user",
                content: build_prompt(essay),
            }],
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        };

        let response = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| UpstreamFailure::new(UpstreamFailure::REQUEST_FAILED, e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| UpstreamFailure::new(UpstreamFailure::REQUEST_FAILED, e.to_string()))?;

        if !status.is_success() {
            return Err(UpstreamFailure::new(
                UpstreamFailure::HTTP_ERROR,
                format!("{} {}", status, text),
            ));
        }

        let json: Value = serde_json::from_str(&text)
            .map_err(|e| UpstreamFailure::new(UpstreamFailure::INVALID_RESPONSE, e.to_string()))?;

        json.pointer("/choices/0/message/content")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| {
                UpstreamFailure::new(
                    UpstreamFailure::SERVICE_UNAVAILABLE,
                    "response has no choices[0].message.content",
                )
            })
    }
}

#[async_trait]
impl Grader for DeepSeekClient {
    async fn analyze(&self, essay: &str) -> String {
        match self.complete(essay).await {
            Ok(content) => content,
            Err(failure) => {
                tracing::warn!("AI grading request failed: {}: {}", failure.error, failure.message);
                failure.to_json()
            }
        }
    }
}
