// src/handlers/product.rs
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use tracing::{info, instrument};

use crate::dtos::product::{ProductDraft, ProductResponse, SearchParams};
use crate::error::AppError;
use crate::state::AppState;
use crate::validation::validate;
use crate::view::list::matches_search;

// GET /api/products - List products, newest first, optionally filtered
#[instrument(skip(state))]
pub async fn get_products(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<ProductResponse>>, AppError> {
    let term = params.q.unwrap_or_default();
    let products = state.repo.list_all().await?;

    let response = products
        .into_iter()
        .filter(|p| matches_search(p, &term))
        .map(ProductResponse::from)
        .collect();
    Ok(Json(response))
}

// GET /api/products/{id} - Get single product
#[instrument(skip(state))]
pub async fn get_product(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<ProductResponse>, AppError> {
    let product = state.repo.get(&id).await?;
    Ok(Json(ProductResponse::from(product)))
}

// POST /api/products - Create new product
#[instrument(skip(state, payload))]
pub async fn create_product(
    State(state): State<AppState>,
    Json(payload): Json<ProductDraft>,
) -> Result<(StatusCode, Json<ProductResponse>), AppError> {
    let product = validate(&payload)?;
    let created = state.repo.create(product).await?;
    info!(id = %created.id, "Product created");

    Ok((StatusCode::CREATED, Json(ProductResponse::from(created))))
}

// PUT /api/products/{id} - Overwrite product fields
#[instrument(skip(state, payload))]
pub async fn update_product(
    Path(id): Path<String>,
    State(state): State<AppState>,
    Json(payload): Json<ProductDraft>,
) -> Result<Json<ProductResponse>, AppError> {
    let product = validate(&payload)?;
    state.repo.update(&id, product).await?;
    let updated = state.repo.get(&id).await?;

    Ok(Json(ProductResponse::from(updated)))
}

// DELETE /api/products/{id} - Delete product (already-absent ids succeed)
#[instrument(skip(state))]
pub async fn delete_product(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    state.repo.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
