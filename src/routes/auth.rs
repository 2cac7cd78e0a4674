use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use tracing::{error, info};

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::models::{
    Actor, LoginRequest, LoginResponse, ProfileResponse, SignupRequest, SignupResponse,
};
use crate::services::auth_service;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/profile", get(profile))
}

// signup and login attach the Actor themselves: there is no token yet.
pub async fn signup(
    State(state): State<AppState>,
    payload: Result<Json<SignupRequest>, JsonRejection>,
) -> Response {
    info!("POST /auth/signup - Registering user");
    let input = match payload {
        Ok(Json(input)) => input,
        Err(rejection) => return AppError::Validation(rejection.body_text()).into_response(),
    };
    let actor = Actor { user_id: None, email: Some(input.email.clone()) };

    match auth_service::signup(state.store.as_ref(), input).await {
        Ok(user) => {
            let actor = Actor { user_id: Some(user.id), email: Some(user.email.clone()) };
            let body = SignupResponse {
                message: "User created successfully".to_string(),
                user_id: user.id,
            };
            (StatusCode::CREATED, Extension(actor), Json(body)).into_response()
        }
        Err(e) => {
            error!("Failed to register user: {}", e);
            (Extension(actor), e).into_response()
        }
    }
}

pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Response {
    info!("POST /auth/login - Authenticating user");
    let input = match payload {
        Ok(Json(input)) => input,
        Err(rejection) => return AppError::Validation(rejection.body_text()).into_response(),
    };
    let actor = Actor { user_id: None, email: Some(input.email.clone()) };

    match auth_service::login(state.store.as_ref(), &state.tokens, input).await {
        Ok((token, user)) => {
            let actor = Actor { user_id: Some(user.id), email: Some(user.email.clone()) };
            let body = LoginResponse { token, user: user.into() };
            (Extension(actor), Json(body)).into_response()
        }
        Err(e) => {
            error!("Login failed: {}", e);
            (Extension(actor), e).into_response()
        }
    }
}

pub async fn profile(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ProfileResponse>, AppError> {
    info!("GET /auth/profile - Fetching profile for user {}", auth.id);
    let user = auth_service::profile(state.store.as_ref(), auth.id)
        .await
        .map_err(|e| {
            error!("Failed to fetch profile for user {}: {}", auth.id, e);
            e
        })?;
    Ok(Json(ProfileResponse { user: user.into() }))
}
