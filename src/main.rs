//! Server: connects to PostgreSQL, mounts the resource routes and serves until killed.

use oilfield_api::{app_router, AppState, PgStore, ServiceConfig};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = ServiceConfig::from_env();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("oilfield_api=info,tower_http=info")),
        )
        .init();

    let options = config.database.connect_options()?;
    let store = match PgStore::connect(options, config.database.max_connections).await {
        Ok(store) => store,
        Err(e) => {
            tracing::error!(error = %e, "could not connect to the database");
            return Err(e.into());
        }
    };
    tracing::info!(
        host = %config.database.host,
        database = %config.database.name,
        "connected to the database"
    );

    let state = AppState::new(Arc::new(store));
    let app = app_router(state, config.max_body_bytes);

    let listener = TcpListener::bind(config.listen_addr.as_str()).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
