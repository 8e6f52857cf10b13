//! LIONBOT chat relay entry point.
//!
//! Binary name: `lionbot`
//!
//! Loads configuration, resolves the API key and persona, then serves the
//! HTTP API until Ctrl+C or SIGTERM.

mod cli;
mod http;
mod state;

use clap::Parser;

use lionbot_infra::config::{load_config, resolve_persona};
use lionbot_infra::secret::env::resolve_api_key;
use lionbot_observe::tracing_setup::{init_tracing, shutdown_tracing, verbosity_filter};

use cli::Cli;
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(verbosity_filter(cli.verbose, cli.quiet), cli.otel)
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    let result = serve(cli).await;
    if let Err(e) = &result {
        tracing::error!(error = %e, "server exited with error");
    }

    shutdown_tracing();
    result
}

async fn serve(cli: Cli) -> anyhow::Result<()> {
    let mut config = load_config(&cli.config).await;
    cli.apply_overrides(&mut config);
    config.validate()?;

    let api_key = resolve_api_key()?;
    let persona = resolve_persona(&config).await?;

    let addr = format!("{}:{}", config.host, config.port);
    let model = config.model.clone();
    let history_limit = config.history_limit;

    let state = AppState::init(config, api_key, persona)?;
    let app = http::router::build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, %model, history_limit, "LIONBOT listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
