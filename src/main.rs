use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use media_api::config;
use media_api::database::{DatabaseManager, PgStore};
use media_api::uploads::UploadDir;
use media_api::{app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    let config = config::config();
    let default_filter = if config.server.enable_request_logging {
        "media_api=info,tower_http=info"
    } else {
        "media_api=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .init();

    tracing::info!("Starting Media API in {:?} mode", config.environment);
    config.validate().context("invalid configuration")?;

    let pool = DatabaseManager::connect(config).await?;
    DatabaseManager::migrate(&pool).await?;
    UploadDir::new(&config.uploads)
        .ensure_exists()
        .await
        .context("cannot create upload directory")?;

    let state = AppState::new(Arc::new(PgStore::new(pool)), config.clone())?;

    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Media API listening on http://{}", bind_addr);
    axum::serve(listener, app(state)).await?;
    Ok(())
}
