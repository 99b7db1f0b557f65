use axum::extract::{Path, State};
use uuid::Uuid;

use crate::middleware::{ApiResponse, ApiResult};
use crate::models::Post;
use crate::state::AppState;
use crate::store::posts;

/// GET /posts/:user_id/posts - one author's posts, newest first
pub async fn user_posts_get(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> ApiResult<Vec<Post>> {
    let posts = posts::by_user(&state.pool, user_id).await?;
    Ok(ApiResponse::success(posts))
}
