//! GeminiClient -- concrete [`CompletionClient`] for the Gemini API.
//!
//! Sends `POST {base}/v1beta/models/{model}:generateContent` with the API key
//! in the `x-goog-api-key` header, so the key never appears in URLs, logs, or
//! error messages.
//!
//! The API key is wrapped in [`secrecy::SecretString`] and is never logged
//! or included in `Debug` output.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use tracing::Instrument;
use tracing::field::Empty;

use lionbot_core::llm::client::CompletionClient;
use lionbot_observe::genai_attrs::{
    GEN_AI_OPERATION_NAME, GEN_AI_PROVIDER_NAME, GEN_AI_REQUEST_MODEL,
    GEN_AI_RESPONSE_FINISH_REASONS, GEN_AI_USAGE_INPUT_TOKENS, GEN_AI_USAGE_OUTPUT_TOKENS,
    OP_CHAT, PROVIDER_GEMINI,
};
use lionbot_types::chat::Turn;
use lionbot_types::llm::{CompletionOutcome, LlmError};

use super::types::{ErrorEnvelope, GenerateContentRequest, GenerateContentResponse};

/// Longest upstream error body kept for logging when it is not JSON.
const MAX_ERROR_BODY_CHARS: usize = 512;

/// Google Gemini completion client.
///
/// # API Key Security
///
/// The API key is stored as a [`SecretString`] and is only exposed when
/// building the request header.
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
    model: String,
}

impl GeminiClient {
    pub const DEFAULT_BASE_URL: &'static str = "https://generativelanguage.googleapis.com";

    /// Create a client whose calls are bounded by `timeout`.
    pub fn new(api_key: SecretString, model: String, timeout: Duration) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LlmError::Transport(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key,
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            model,
        })
    }

    /// Override the base URL (useful for testing or proxies).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }

    async fn send(
        &self,
        history: &[Turn],
        new_turn: &Turn,
        persona: &str,
    ) -> Result<CompletionOutcome, LlmError> {
        let body = GenerateContentRequest::new(history, new_turn, persona);

        let response = self
            .client
            .post(self.url())
            .header("x-goog-api-key", self.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        let text = response.text().await.map_err(map_reqwest_error)?;

        if !status.is_success() {
            let (message, reason) = parse_error_body(&text);
            return Err(LlmError::Remote {
                status: status.as_u16(),
                message,
                reason,
            });
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&text)
            .map_err(|e| LlmError::Deserialization(format!("failed to parse response: {e}")))?;

        let span = tracing::Span::current();
        if let Some(reason) = parsed.finish_reason() {
            span.record(GEN_AI_RESPONSE_FINISH_REASONS, reason);
        }
        if let Some(usage) = &parsed.usage_metadata {
            if let Some(input) = usage.prompt_token_count {
                span.record(GEN_AI_USAGE_INPUT_TOKENS, input);
            }
            if let Some(output) = usage.candidates_token_count {
                span.record(GEN_AI_USAGE_OUTPUT_TOKENS, output);
            }
        }

        Ok(parsed.into_outcome())
    }
}

// GeminiClient intentionally does NOT derive Debug; the SecretString already
// redacts itself, but nothing else here is worth printing either.

impl CompletionClient for GeminiClient {
    fn name(&self) -> &str {
        PROVIDER_GEMINI
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn complete(
        &self,
        history: &[Turn],
        new_turn: &Turn,
        persona: &str,
    ) -> Result<CompletionOutcome, LlmError> {
        let span = tracing::info_span!(
            "chat",
            otel.name = %format!("{OP_CHAT} {}", self.model),
            gen_ai.operation.name = Empty,
            gen_ai.provider.name = Empty,
            gen_ai.request.model = Empty,
            gen_ai.response.finish_reasons = Empty,
            gen_ai.usage.input_tokens = Empty,
            gen_ai.usage.output_tokens = Empty,
        );
        span.record(GEN_AI_OPERATION_NAME, OP_CHAT);
        span.record(GEN_AI_PROVIDER_NAME, PROVIDER_GEMINI);
        span.record(GEN_AI_REQUEST_MODEL, self.model.as_str());

        self.send(history, new_turn, persona).instrument(span).await
    }
}

fn map_reqwest_error(err: reqwest::Error) -> LlmError {
    if err.is_timeout() {
        LlmError::Timeout
    } else {
        LlmError::Transport(err.without_url().to_string())
    }
}

/// Pull `error.message` and `error.status` out of an error body, falling back
/// to the (truncated) raw text.
fn parse_error_body(body: &str) -> (String, Option<String>) {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => (envelope.error.message, envelope.error.status),
        Err(_) => (body.chars().take(MAX_ERROR_BODY_CHARS).collect(), None),
    }
}
