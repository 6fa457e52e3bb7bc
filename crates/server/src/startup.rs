use std::{net::SocketAddr, sync::Arc, time::Duration};

use axum::Router;
use common::song_detail::HttpSongDetailClient;
use configs::{AppConfig, ServerConfig};
use service::song::repository::{SeaOrmSongRepository, SongRepository};
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::errors::StartupError;
use crate::routes;
use crate::state::AppState;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn bind_addr(server: &ServerConfig) -> Result<SocketAddr, StartupError> {
    format!("{}:{}", server.host, server.port)
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("server address {}:{}: {}", server.host, server.port, e)))
}

/// Connect the database and the enrichment client described by `cfg`.
pub async fn build_state(cfg: &AppConfig) -> Result<AppState, StartupError> {
    let db = models::db::connect_and_migrate(&cfg.database)
        .await
        .map_err(|e| StartupError::Database(e.to_string()))?;
    let repo: Arc<dyn SongRepository> = Arc::new(SeaOrmSongRepository { db });

    let details = HttpSongDetailClient::new(
        cfg.enrichment.api_url.clone(),
        Duration::from_secs(cfg.enrichment.timeout_secs),
    )
    .map_err(|e| StartupError::InvalidConfig(e.to_string()))?;

    Ok(AppState::new(repo, Arc::new(details)))
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!(event = "shutdown_signal", "received Ctrl+C, shutting down");
    }
}

/// Public entry: build the app from `cfg` and serve until Ctrl+C
pub async fn run(cfg: AppConfig) -> Result<(), StartupError> {
    let state = build_state(&cfg).await?;
    let app: Router = routes::build_router(state, build_cors());

    let addr = bind_addr(&cfg.server)?;
    info!(%addr, api_url = %cfg.enrichment.api_url, "starting song library server");
    let listener = tokio::net::TcpListener::bind(addr).await.map_err(anyhow::Error::from)?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(anyhow::Error::from)?;
    Ok(())
}
