use axum::{
    routing::{get, post},
    Router,
};
use crate::handlers::pages::{add_product, catalog, delete_product, edit_product};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(catalog))
        .route("/products", post(add_product))
        .route("/products/{id}", post(edit_product))
        .route("/products/{id}/delete", post(delete_product))
}
