use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::models::PublicUser;
use crate::state::AppState;
use crate::store::users;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: PublicUser,
}

/// POST /auth/login - Authenticate and receive a bearer token
///
/// Unknown email and wrong password produce the identical error, so a
/// caller cannot probe which accounts exist.
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> ApiResult<LoginResponse> {
    let user = users::find_by_email(&state.pool, &payload.email)
        .await?
        .ok_or_else(invalid_credentials)?;

    let valid = bcrypt::verify(&payload.password, &user.password_hash).map_err(|e| {
        tracing::error!("password verification failed: {}", e);
        ApiError::internal_server_error("Failed to process login")
    })?;

    if !valid {
        return Err(invalid_credentials());
    }

    let token = state.tokens.issue(user.id).map_err(|e| {
        tracing::error!("token issuance failed: {}", e);
        ApiError::internal_server_error("Failed to issue token")
    })?;

    tracing::info!("user {} logged in", user.id);
    Ok(ApiResponse::success(LoginResponse { token, user: user.into() }))
}

fn invalid_credentials() -> ApiError {
    ApiError::unauthorized("Invalid credentials")
}
