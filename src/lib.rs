// src/lib.rs
//! Product catalog admin: a server-rendered CRUD page with a JSON API,
//! backed by a pluggable document store.

pub mod auth;
pub mod config;
pub mod dtos;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod repository;
pub mod routes;
pub mod state;
pub mod store;
pub mod validation;
pub mod view;

use axum::{middleware::from_fn_with_state, routing::get, Router};

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    routes::create_router()
        .route("/health", get(health_check))
        .layer(from_fn_with_state(state.clone(), middleware::session::load_session))
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
