use axum::{
    routing::get,
    Router,
};
use super::api_cors;
use crate::handlers::product::{
    get_products, get_product, create_product, update_product, delete_product
};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/products", get(get_products).post(create_product))
        .route("/api/products/{id}", get(get_product).put(update_product).delete(delete_product))
        .layer(api_cors())
}
