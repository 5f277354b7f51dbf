//! Server bootstrap: wire the stores, spawn the relay loop, serve HTTP.

use std::sync::Arc;

use thiserror::Error;
use tokio::net::TcpListener;

use crate::{
    config::ServerConfig,
    domain::{HistoryStore, PasswordHasher, StoreError, UserStore},
    infrastructure::{hasher::Sha256PasswordHasher, repository::Database},
    relay::{ConnectionRegistry, Relay},
    ui::{build_router, state::AppState},
};

/// Fatal bootstrap errors.
///
/// Only startup can terminate the process; once the server is up, store
/// outages and connection failures degrade per-request instead.
#[derive(Debug, Error)]
pub enum ServerError {
    /// The durable store could not be opened at startup
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The listening socket could not be bound or served
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Run the chat relay server until shutdown.
pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    let db = Database::open(&config.database_path)?;
    let users: Arc<dyn UserStore> = Arc::new(db.user_store());
    let history: Arc<dyn HistoryStore> = Arc::new(db.history_store());
    let hasher: Arc<dyn PasswordHasher> = Arc::new(Sha256PasswordHasher::new());

    let registry = Arc::new(ConnectionRegistry::new());
    let relay = Relay::spawn(registry.clone(), history);

    let state = Arc::new(AppState {
        users,
        hasher,
        registry,
        relay,
    });
    let app = build_router(state, &config.static_dir);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("server starting at http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
        return;
    }
    tracing::info!("shutdown signal received");
}
