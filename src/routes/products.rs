use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use tracing::{error, info};
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::models::{
    ProductFilter, ProductListResponse, ProductQuery, ProductResponse, RecommendationResponse,
};
use crate::services::product_service;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(fetch_products))
        .route("/recommendations/for-me", get(fetch_recommendations))
        .route("/:id", get(get_product))
}

pub async fn fetch_products(
    State(state): State<AppState>,
    _auth: AuthUser,
    query: Result<Query<ProductQuery>, QueryRejection>,
) -> Result<Json<ProductListResponse>, AppError> {
    let Query(query) = query.map_err(|rejection| AppError::Validation(rejection.body_text()))?;
    let filter = ProductFilter::from(query);
    info!(
        "GET /products - risk={:?}, type={:?}, sort={:?}",
        filter.risk_level, filter.investment_type, filter.sort
    );
    let products = product_service::fetch_all(state.store.as_ref(), &filter)
        .await
        .map_err(|e| {
            error!("Failed to fetch products: {}", e);
            e
        })?;
    Ok(Json(ProductListResponse { products }))
}

pub async fn get_product(
    State(state): State<AppState>,
    _auth: AuthUser,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<ProductResponse>, AppError> {
    let Path(id) = id.map_err(|_| AppError::NotFound("Product not found".to_string()))?;
    info!("GET /products/{} - Fetching product", id);
    let product = product_service::fetch_one(state.store.as_ref(), id)
        .await
        .map_err(|e| {
            error!("Failed to fetch product {}: {}", id, e);
            e
        })?;
    Ok(Json(ProductResponse { product }))
}

pub async fn fetch_recommendations(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<RecommendationResponse>, AppError> {
    info!("GET /products/recommendations/for-me - user {}", auth.id);
    let (recommendations, risk_appetite) = product_service::recommend(state.store.as_ref(), auth.id)
        .await
        .map_err(|e| {
            error!("Failed to build recommendations for user {}: {}", auth.id, e);
            e
        })?;
    Ok(Json(RecommendationResponse { recommendations, risk_appetite }))
}
