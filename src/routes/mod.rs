pub mod pages;
pub mod products;
pub mod session;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use crate::state::AppState;

/// Cross-origin policy for everything under `/api`.
pub fn api_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}

pub fn create_router() -> Router<AppState> {
    Router::new()
        .merge(pages::routes())
        .merge(products::routes())
        .merge(session::routes())
}
