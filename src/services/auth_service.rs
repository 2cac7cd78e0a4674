use tracing::{info, warn};
use uuid::Uuid;

use crate::auth::{hash_password, verify_password, TokenKeys};
use crate::errors::AppError;
use crate::models::{LoginRequest, NewUser, SignupRequest, User};
use crate::store::{Store, StoreError};

pub async fn signup(store: &dyn Store, input: SignupRequest) -> Result<User, AppError> {
    input.validate().map_err(AppError::Validation)?;

    let new_user = NewUser {
        first_name: input.first_name.trim().to_string(),
        last_name: input.last_name.unwrap_or_default(),
        email: input.email,
        password_hash: hash_password(&input.password)?,
        risk_appetite: input.risk_appetite.unwrap_or_default(),
    };

    match store.insert_user(&new_user).await {
        Ok(user) => {
            info!("Registered user {}", user.id);
            Ok(user)
        }
        Err(StoreError::UniqueViolation(constraint)) => {
            warn!("Signup rejected, {} already registered ({})", new_user.email, constraint);
            Err(AppError::Conflict("Email already exists".to_string()))
        }
        Err(e) => Err(AppError::Db(e)),
    }
}

/// Checks credentials and issues a token. Unknown email and wrong password
/// are indistinguishable to the caller.
pub async fn login(
    store: &dyn Store,
    tokens: &TokenKeys,
    input: LoginRequest,
) -> Result<(String, User), AppError> {
    input.validate().map_err(AppError::Validation)?;

    let invalid = || AppError::Unauthorized("Invalid credentials".to_string());
    let user = match store.find_user_by_email(&input.email).await? {
        Some(user) => user,
        None => {
            warn!("Login failed, user {} not found", input.email);
            return Err(invalid());
        }
    };
    if !verify_password(&input.password, &user.password_hash) {
        warn!("Login failed, wrong password for user {}", user.id);
        return Err(invalid());
    }

    let token = tokens.issue(&user)?;
    info!("User {} logged in", user.id);
    Ok((token, user))
}

pub async fn profile(store: &dyn Store, user_id: Uuid) -> Result<User, AppError> {
    store
        .find_user(user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))
}
