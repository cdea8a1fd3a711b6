use std::net::SocketAddr;
use std::time::Duration;

use showcase::{api, config, AppState, Error, Result};
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const LIMITER_PRUNE_INTERVAL: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "showcase=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = config::init();
    tracing::info!(
        "Starting Showcase server on {}:{}",
        config.server.host,
        config.server.port
    );
    if config.auth.google_client_id.is_none() {
        tracing::warn!("GOOGLE_CLIENT_ID is not set, browser sign-in is unavailable");
    }

    let state = match AppState::new().await {
        Ok(state) => state,
        Err(e) => {
            tracing::error!(error = %e, "Failed to initialize application state");
            std::process::exit(1);
        }
    };
    tracing::info!("Application state initialized");

    // Forget idle upload quota keys
    let limiter = state.upload_limiter.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(LIMITER_PRUNE_INTERVAL);
        loop {
            interval.tick().await;
            limiter.prune();
        }
    });

    let app = api::app(state.clone(), config.server.cors_origin.as_deref())?;

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .map_err(|e| Error::Configuration(format!("Invalid listen address: {}", e)))?;

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    state.db.close().await;
    tracing::info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
