//! Server configuration loading.
//!
//! Reads `lionbot.toml` (or the path given on the command line) and resolves
//! the persona text.

use std::path::Path;

use lionbot_types::config::ServerConfig;
use lionbot_types::error::ConfigError;

/// Load the server configuration from `path`.
///
/// Returns `ServerConfig::default()` if the file doesn't exist or can't be
/// parsed (with a warning log for parse errors).
pub async fn load_config(path: &Path) -> ServerConfig {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config file found at {}, using defaults", path.display());
            return ServerConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", path.display());
            return ServerConfig::default();
        }
    };

    match toml::from_str::<ServerConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!("Failed to parse {}: {err}, using defaults", path.display());
            ServerConfig::default()
        }
    }
}

/// Resolve the persona text.
///
/// `persona_file` wins over the inline `persona` when set. A file that can't
/// be read or is blank is an error rather than a silent fallback.
pub async fn resolve_persona(config: &ServerConfig) -> Result<String, ConfigError> {
    let Some(path) = &config.persona_file else {
        return Ok(config.persona.clone());
    };

    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

    let persona = content.trim();
    if persona.is_empty() {
        return Err(ConfigError::Invalid(format!(
            "persona file {} is empty",
            path.display()
        )));
    }
    Ok(persona.to_string())
}
