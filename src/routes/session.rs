use axum::{routing::post, Router};
use super::api_cors;
use crate::handlers::session::{api_login, login, logout};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    let api = Router::new()
        .route("/api/login", post(api_login))
        .layer(api_cors());

    Router::new()
        .route("/login", post(login))
        .route("/logout", post(logout))
        .merge(api)
}
