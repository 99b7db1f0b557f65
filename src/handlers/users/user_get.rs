use axum::extract::{Path, State};
use uuid::Uuid;

use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::models::PublicUser;
use crate::state::AppState;
use crate::store::users;

/// GET /users/:id - fetch one user's public profile
pub async fn user_get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<PublicUser> {
    let user = users::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    Ok(ApiResponse::success(user.into()))
}
