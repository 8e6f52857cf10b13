//! Environment variable API-key resolution.
//!
//! Checks `GEMINI_API_KEY` first, then `GOOGLE_API_KEY`. Unset, blank, or
//! non-Unicode values are treated as not found.

use secrecy::SecretString;

use lionbot_types::error::ConfigError;

/// Variables consulted for the Gemini API key, highest priority first.
pub const API_KEY_VARS: [&str; 2] = ["GEMINI_API_KEY", "GOOGLE_API_KEY"];

/// Resolve the API key from the process environment.
pub fn resolve_api_key() -> Result<SecretString, ConfigError> {
    resolve_api_key_from(|name| std::env::var(name).ok())
}

/// Resolve the API key through an arbitrary variable lookup.
pub fn resolve_api_key_from(
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<SecretString, ConfigError> {
    for name in API_KEY_VARS {
        if let Some(value) = lookup(name) {
            let value = value.trim();
            if !value.is_empty() {
                tracing::debug!(source = name, "resolved API key from environment");
                return Ok(SecretString::from(value.to_string()));
            }
        }
    }
    Err(ConfigError::MissingApiKey)
}
