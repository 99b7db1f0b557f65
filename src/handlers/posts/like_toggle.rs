use axum::extract::{Path, State};
use axum::Extension;
use uuid::Uuid;

use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::models::Post;
use crate::state::AppState;
use crate::store::posts;

/// PATCH /posts/:id/like - toggle the authenticated subject's like
///
/// Flips the subject's presence in the post's like map in a single store
/// round trip; a second identical toggle reverses the first. Toggles by
/// different subjects touch different map keys and never clobber each
/// other; concurrent toggles by the same subject are last-write-wins,
/// which is acceptable for toggle semantics.
pub async fn like_toggle(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> ApiResult<Post> {
    let updated = posts::toggle_like(&state.pool, id, auth.user_id).await?;
    Ok(ApiResponse::success(updated))
}
