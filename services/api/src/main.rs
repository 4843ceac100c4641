use anyhow::Context as _;
use sea_orm::Database;
use tracing::info;

use foodgram_api::config::ApiConfig;
use foodgram_api::router::build_router;
use foodgram_api::state::AppState;
use foodgram_core::tracing::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing("info");

    let config = ApiConfig::from_env()?;

    let db = Database::connect(&config.database_url)
        .await
        .context("failed to connect to database")?;

    let state = AppState::new(db, &config);
    let router = build_router(state);

    let http_addr = format!("0.0.0.0:{}", config.api_port);
    let listener = tokio::net::TcpListener::bind(&http_addr)
        .await
        .with_context(|| format!("failed to bind {http_addr}"))?;

    info!(media_root = %config.media_root.display(), "api service listening on {http_addr}");
    axum::serve(listener, router)
        .await
        .context("server error")?;
    Ok(())
}
