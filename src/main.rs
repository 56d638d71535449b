// src/main.rs
use std::net::SocketAddr;
use std::sync::Arc;

use catalog_admin::config::{AppConfig, StoreBackend};
use catalog_admin::state::AppState;
use catalog_admin::store::{DocumentStore, MemoryStore, PgDocumentStore};
use catalog_admin::build_router;
use tokio::net::TcpListener;
use tracing_subscriber::fmt::init as tracing_init;

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_init();

    // Load configuration (.env is read inside)
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Invalid configuration");
            return;
        }
    };

    // Open the document store
    let store: Arc<dyn DocumentStore> = match &config.store {
        StoreBackend::Memory => {
            tracing::info!("Using in-memory document store");
            Arc::new(MemoryStore::new())
        }
        StoreBackend::Postgres { database_url } => match PgDocumentStore::connect(database_url).await {
            Ok(store) => Arc::new(store),
            Err(e) => {
                tracing::error!(error = %e, "Failed to open document store");
                return;
            }
        },
    };

    let app = build_router(AppState::from_config(&config, store));

    // Try port..port+20 to avoid crash when address is in use
    let listener = {
        let mut bound = None;
        for offset in 0u16..=20 {
            let port = config.port.saturating_add(offset);
            let addr = SocketAddr::from((config.host, port));
            match TcpListener::bind(addr).await {
                Ok(l) => { bound = Some((l, addr)); break; }
                Err(e) => {
                    if offset == 0 { tracing::warn!(%addr, error=%e, "Port in use, trying next"); }
                }
            }
        }
        match bound {
            Some((l, addr)) => {
                tracing::info!("Server running on {}", addr);
                l
            }
            None => {
                tracing::error!("Failed to bind to any port starting at {} on {}", config.port, config.host);
                return;
            }
        }
    };

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error=%e, "Server error");
    }
}
