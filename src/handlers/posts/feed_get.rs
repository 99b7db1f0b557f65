use axum::extract::State;

use crate::middleware::{ApiResponse, ApiResult};
use crate::models::Post;
use crate::state::AppState;
use crate::store::posts;

/// GET /posts - the feed: every post, newest first
pub async fn feed_get(State(state): State<AppState>) -> ApiResult<Vec<Post>> {
    let feed = posts::all(&state.pool).await?;
    Ok(ApiResponse::success(feed))
}
