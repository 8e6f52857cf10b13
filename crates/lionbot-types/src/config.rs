//! Server configuration types for LIONBOT.
//!
//! `ServerConfig` represents `lionbot.toml`: listen address, remote model,
//! history window, body limit, timeout, and the bot persona.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Persona sent as the system instruction on every remote request.
pub const DEFAULT_PERSONA: &str = "You are a male chatbot named \"LIONBOT\".
- Refer to yourself in the first person.
- Address the user politely and neutrally.
- Be courteous and explain things clearly and simply; never be rude.
- If an answer is long, format it for readability with paragraphs or bullet points.";

/// Smallest accepted history window (one user turn plus one model turn).
pub const MIN_HISTORY_LIMIT: usize = 2;

/// Top-level configuration for the relay.
///
/// Loaded from `lionbot.toml`. All fields have sensible defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Remote model identifier (e.g., "gemini-2.5-flash").
    #[serde(default = "default_model")]
    pub model: String,

    /// Base URL of the generative-language API.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Maximum number of turns kept in the conversation history.
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,

    /// Maximum accepted request body size in bytes.
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,

    /// Upper bound on a single remote call.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    #[serde(default = "default_persona")]
    pub persona: String,

    /// When set, the file contents replace `persona`.
    #[serde(default)]
    pub persona_file: Option<PathBuf>,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_api_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_history_limit() -> usize {
    20
}

fn default_max_body_bytes() -> usize {
    10 * 1024 * 1024
}

fn default_request_timeout_secs() -> u64 {
    120
}

fn default_persona() -> String {
    DEFAULT_PERSONA.to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            model: default_model(),
            api_base_url: default_api_base_url(),
            history_limit: default_history_limit(),
            max_body_bytes: default_max_body_bytes(),
            request_timeout_secs: default_request_timeout_secs(),
            persona: default_persona(),
            persona_file: None,
        }
    }
}

impl ServerConfig {
    /// Reject values the server cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.history_limit < MIN_HISTORY_LIMIT {
            return Err(ConfigError::Invalid(format!(
                "history_limit must be at least {MIN_HISTORY_LIMIT}, got {}",
                self.history_limit
            )));
        }
        if self.model.trim().is_empty() {
            return Err(ConfigError::Invalid("model must not be empty".to_string()));
        }
        if self.max_body_bytes == 0 {
            return Err(ConfigError::Invalid(
                "max_body_bytes must be greater than zero".to_string(),
            ));
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "request_timeout_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
