use std::net::SocketAddr;

use anyhow::Context;
use server::{build_router, config::AppConfig, database, state::AppState};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("server=info,audit=info,tower_http=info")),
        )
        .init();

    let config = AppConfig::load().context("loading configuration")?;
    info!(
        store = ?config.store.backend,
        audit = ?config.audit.sink,
        periods = ?config.periods.source,
        "Configuration loaded"
    );

    let db = database::connect_if_needed(&config).await?;

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("invalid server.host/server.port")?;

    let state = AppState::from_config(config, db).await?;
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server running at http://{}", addr);
    info!("API docs at http://{}/swagger-ui", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
