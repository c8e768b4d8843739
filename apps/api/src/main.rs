mod config;
mod cv;
mod db;
mod errors;
mod extraction;
mod models;
mod routes;
mod state;
mod store;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::{InMemoryRecordStore, PgRecordStore, RecordStore};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting resume parser API v{}", env!("CARGO_PKG_VERSION"));

    let store: Arc<dyn RecordStore> = match &config.database_url {
        Some(url) => {
            let pool = create_pool(url).await?;
            Arc::new(PgRecordStore::connect(pool, &config.store).await?)
        }
        None => {
            warn!("DATABASE_URL not set; records are kept in memory and lost on restart");
            Arc::new(InMemoryRecordStore::new())
        }
    };
    info!("Uploads are kept in {}", config.upload_dir.display());

    let state = AppState {
        store,
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
