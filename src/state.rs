// src/state.rs
use std::sync::Arc;

use crate::auth::{Authenticator, SimulatedAuthenticator};
use crate::config::AppConfig;
use crate::repository::ProductRepository;
use crate::store::DocumentStore;
use crate::view::format::CurrencyFormat;

/// Presentation and session settings shared by every handler.
#[derive(Debug, Clone)]
pub struct Settings {
    pub store_name: String,
    pub currency: CurrencyFormat,
    pub jwt_secret: String,
}

#[derive(Clone)]
pub struct AppState {
    pub repo: ProductRepository,
    pub auth: Arc<dyn Authenticator>,
    pub settings: Arc<Settings>,
}

impl AppState {
    pub fn new(repo: ProductRepository, auth: Arc<dyn Authenticator>, settings: Settings) -> Self {
        Self {
            repo,
            auth,
            settings: Arc::new(settings),
        }
    }

    /// Wires the configured collaborators around an already-opened store.
    pub fn from_config(config: &AppConfig, store: Arc<dyn DocumentStore>) -> Self {
        let repo = ProductRepository::new(store)
            .with_collection(config.collection.clone())
            .with_timestamp_policy(config.timestamp_policy);
        let auth = Arc::new(SimulatedAuthenticator::new(
            config.login_delay,
            config.login_display_name.clone(),
        ));
        Self::new(
            repo,
            auth,
            Settings {
                store_name: config.store_name.clone(),
                currency: config.currency.clone(),
                jwt_secret: config.jwt_secret.clone(),
            },
        )
    }
}
