use axum::extract::{Path, State};
use uuid::Uuid;

use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::models::{FriendSummary, User};
use crate::state::AppState;
use crate::store::users;

/// PATCH /users/:id/:friend_id - mutual friend toggle
///
/// Adds `friend_id` to the user's friends and the user to the friend's
/// friends; if already present, removes both sides. The two updates are
/// separate round trips (no cross-record transaction at this scope).
/// Returns the user's updated friends list.
pub async fn friend_toggle(
    State(state): State<AppState>,
    Path((id, friend_id)): Path<(Uuid, Uuid)>,
) -> ApiResult<Vec<FriendSummary>> {
    let mut user = users::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;
    let mut friend = users::find_by_id(&state.pool, friend_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Friend not found"))?;

    let now_present = User::toggle_friend(&mut user.friends, friend_id);
    if now_present {
        if !friend.friends.contains(&id) {
            friend.friends.push(id);
        }
    } else {
        friend.friends.retain(|f| *f != id);
    }

    users::set_friends(&state.pool, user.id, &user.friends).await?;
    users::set_friends(&state.pool, friend.id, &friend.friends).await?;

    let friends = users::find_by_ids(&state.pool, &user.friends).await?;

    Ok(ApiResponse::success(friends.into_iter().map(FriendSummary::from).collect()))
}
