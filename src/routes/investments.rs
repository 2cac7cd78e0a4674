use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use tracing::{error, info};
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::models::{
    CreateInvestment, CreatedInvestmentResponse, InvestmentResponse, MessageResponse,
    PortfolioResponse,
};
use crate::services::{investment_service, portfolio_service};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_investment).get(fetch_investments))
        .route("/:id", get(get_investment))
        .route("/:id/cancel", patch(cancel_investment))
}

fn investment_id(id: Result<Path<Uuid>, PathRejection>) -> Result<Uuid, AppError> {
    id.map(|Path(id)| id)
        .map_err(|_| AppError::NotFound("Investment not found".to_string()))
}

#[axum::debug_handler]
pub async fn create_investment(
    State(state): State<AppState>,
    auth: AuthUser,
    payload: Result<Json<CreateInvestment>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedInvestmentResponse>), AppError> {
    info!("POST /investments - Creating investment for user {}", auth.id);
    let Json(input) = payload.map_err(|rejection| AppError::Validation(rejection.body_text()))?;
    let (product_id, amount) = input.validate().map_err(AppError::Validation)?;

    let investment = investment_service::create(state.store.as_ref(), auth.id, product_id, amount)
        .await
        .map_err(|e| {
            error!("Failed to create investment for user {}: {}", auth.id, e);
            e
        })?;
    Ok((
        StatusCode::CREATED,
        Json(CreatedInvestmentResponse {
            message: "Investment created successfully".to_string(),
            investment,
        }),
    ))
}

pub async fn fetch_investments(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<PortfolioResponse>, AppError> {
    info!("GET /investments - Fetching portfolio for user {}", auth.id);
    let (investments, portfolio_summary) =
        portfolio_service::summarize(state.store.as_ref(), auth.id)
            .await
            .map_err(|e| {
                error!("Failed to fetch portfolio for user {}: {}", auth.id, e);
                e
            })?;
    Ok(Json(PortfolioResponse { investments, portfolio_summary }))
}

pub async fn get_investment(
    State(state): State<AppState>,
    auth: AuthUser,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<InvestmentResponse>, AppError> {
    let id = investment_id(id)?;
    info!("GET /investments/{} - Fetching investment", id);
    let investment = investment_service::fetch_one(state.store.as_ref(), id, auth.id)
        .await
        .map_err(|e| {
            error!("Failed to fetch investment {}: {}", id, e);
            e
        })?;
    Ok(Json(InvestmentResponse { investment }))
}

pub async fn cancel_investment(
    State(state): State<AppState>,
    auth: AuthUser,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    let id = investment_id(id)?;
    info!("PATCH /investments/{}/cancel - Cancelling investment", id);
    investment_service::cancel(state.store.as_ref(), id, auth.id)
        .await
        .map_err(|e| {
            error!("Failed to cancel investment {}: {}", id, e);
            e
        })?;
    Ok(Json(MessageResponse {
        message: "Investment cancelled successfully".to_string(),
    }))
}
