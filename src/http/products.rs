use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::{header, StatusCode},
    response::IntoResponse,
    Extension, Json,
};
use serde_json::{json, Value};
use tracing::{info, instrument};

use super::{error::ApiError, AppState};
use crate::auth::Claims;
use crate::domain::{Product, ProductPayload};
use crate::product_actor::ProductError;

type JsonPayload = Result<Json<ProductPayload>, JsonRejection>;
type IdPath = Result<Path<i32>, PathRejection>;

/// POST /api/product
#[instrument(skip_all, fields(user = %claims.name))]
pub async fn create(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    payload: JsonPayload,
) -> Result<impl IntoResponse, ApiError> {
    let Json(payload) = payload?;
    let product = state.products.create_product(payload).await?;
    info!(product_id = product.id, "Product added");
    let location = format!("/api/product/{}", product.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(product)))
}

/// DELETE /api/product/:id
#[instrument(skip_all, fields(user = %claims.name))]
pub async fn delete(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    id: IdPath,
) -> Result<Json<Value>, ApiError> {
    let Path(id) = id?;
    state.products.delete_product(id).await?;
    info!(product_id = id, "Product removed");
    Ok(Json(json!({ "message": "Product deleted." })))
}

/// PUT /api/product/:id
#[instrument(skip_all, fields(user = %claims.name))]
pub async fn update(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    id: IdPath,
    payload: JsonPayload,
) -> Result<Json<Value>, ApiError> {
    let Path(id) = id?;
    let Json(payload) = payload?;
    state.products.update_product(id, payload).await?;
    Ok(Json(json!({ "message": "Product updated." })))
}

/// GET /api/product
pub async fn list_all(State(state): State<AppState>) -> Result<Json<Vec<Product>>, ApiError> {
    Ok(Json(state.products.list_products().await?))
}

/// GET /api/product/:id
pub async fn get_by_id(State(state): State<AppState>, id: IdPath) -> Result<Json<Product>, ApiError> {
    let Path(id) = id?;
    state
        .products
        .get_product(id)
        .await?
        .map(Json)
        .ok_or_else(|| ProductError::missing_id(id).into())
}

/// GET /api/product/type/:type
pub async fn list_by_type(
    State(state): State<AppState>,
    Path(kind): Path<String>,
) -> Result<Json<Vec<Product>>, ApiError> {
    Ok(Json(state.products.find_by_type(kind).await?))
}

/// GET /api/product/name/:name
pub async fn list_by_name(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<Vec<Product>>, ApiError> {
    Ok(Json(state.products.find_by_name(name).await?))
}
