use axum::extract::{Path, State};
use uuid::Uuid;

use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::models::FriendSummary;
use crate::state::AppState;
use crate::store::users;

/// GET /users/:id/friends - list a user's friends as display summaries
pub async fn friends_get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Vec<FriendSummary>> {
    let user = users::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    let friends = users::find_by_ids(&state.pool, &user.friends).await?;

    Ok(ApiResponse::success(friends.into_iter().map(FriendSummary::from).collect()))
}
