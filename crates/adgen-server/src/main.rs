//! HTTP server entry point.
//!
//! Loads settings from the environment (and `.env`), logs the startup
//! banner, and serves the application until Ctrl-C or SIGTERM.

use std::sync::Arc;

use adgen_config::Settings;
use adgen_core::{humanize_budget, Operation};
use adgen_server::{build_app, AppState};
use anyhow::Result;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .compact()
        .init();

    let settings = Settings::from_env()?;
    log_banner(&settings);

    let state = Arc::new(AppState::new(&settings)?);
    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(settings.bind_addr).await?;
    info!("Starting server on {}", settings.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

fn log_banner(settings: &Settings) {
    info!("AI Product Ad Generator - Frontend");
    info!("Colab API: {}", settings.remote_url);
    info!("Frontend: http://{}", settings.bind_addr);
    info!("Available tools:");
    for op in Operation::ALL {
        info!(
            "  {} -> {} (timeout {})",
            op.label(),
            op.path(),
            humanize_budget(&settings.timeouts.for_operation(op))
        );
    }
    info!("Make sure Colab is running and COLAB_API_URL points at its current tunnel");
    info!("Video generation takes 3-5 minutes, image enhancement 15-25 seconds");
}

/// Waits for Ctrl-C, or SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
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
                tracing::error!("Failed to install SIGTERM handler: {}", e);
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

    info!("Shutdown signal received");
}
