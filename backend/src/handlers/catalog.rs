//! HTTP handlers for the product catalog

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::Product;
use crate::AppState;

/// List every product in catalog order
pub async fn list_products(State(state): State<AppState>) -> Json<Vec<Product>> {
    Json(state.catalog.products().to_vec())
}

/// Get a product by ID
pub async fn get_product(
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
) -> AppResult<Json<Product>> {
    let product = state.catalog.get(product_id)?;
    Ok(Json(product.clone()))
}
