use std::path::Path;

use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dashboard_service::{handlers, AppState, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dashboard_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenv::dotenv().ok();
    let config = Config::from_env().context("Failed to load configuration")?;

    if config.dealer_api_key().is_empty() {
        warn!("DEALER_API_KEY / DGIS_API_KEY not set; dealer lookups will be rejected upstream");
    }
    if config.openweather_api_key.is_empty() {
        warn!("OPENWEATHER_API_KEY not set; weather lookups will be rejected upstream");
    }
    if config.exchangerate_api_key.is_empty() {
        warn!("EXCHANGERATE_API_KEY not set; exchange lookups will be rejected upstream");
    }

    let state = AppState::from_config(&config).context("Failed to build HTTP client")?;

    let static_dir = Path::new(&config.static_dir);
    let static_dir = if static_dir.is_dir() {
        info!("Serving frontend from {}", static_dir.display());
        Some(static_dir)
    } else {
        warn!("Static directory {} not found; serving API only", static_dir.display());
        None
    };

    let app = handlers::router(state, static_dir);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("Server running on http://localhost:{}", config.port);
    info!("Environment: {}", config.node_env);

    axum::serve(listener, app)
        .await
        .context("HTTP server failed")?;

    info!("Shutting down...");
    Ok(())
}
