//! Command-line arguments for the `lionbot` binary.

use std::path::PathBuf;

use clap::Parser;

use lionbot_types::config::ServerConfig;

/// Chat relay between a web client and the Gemini API.
#[derive(Debug, Parser)]
#[command(name = "lionbot", version, about, long_about = None)]
pub struct Cli {
    /// Path to the TOML configuration file.
    #[arg(long, env = "LIONBOT_CONFIG", default_value = "lionbot.toml")]
    pub config: PathBuf,

    /// Address to bind (overrides the config file).
    #[arg(long, env = "LIONBOT_HOST")]
    pub host: Option<String>,

    /// Port to listen on (overrides the config file).
    #[arg(long, env = "LIONBOT_PORT")]
    pub port: Option<u16>,

    /// Remote model identifier (overrides the config file).
    #[arg(long, env = "LIONBOT_MODEL")]
    pub model: Option<String>,

    /// Number of turns kept in the shared history (overrides the config file).
    #[arg(long, env = "LIONBOT_HISTORY_LIMIT")]
    pub history_limit: Option<usize>,

    /// Export spans to stdout through OpenTelemetry.
    #[arg(long)]
    pub otel: bool,

    /// Suppress all output except errors.
    #[arg(long)]
    pub quiet: bool,

    /// Detailed output (-v for debug, -vv for trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Apply flag values on top of the file configuration.
    pub fn apply_overrides(&self, config: &mut ServerConfig) {
        if let Some(host) = &self.host {
            config.host = host.clone();
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(model) = &self.model {
            config.model = model.clone();
        }
        if let Some(limit) = self.history_limit {
            config.history_limit = limit;
        }
    }
}
