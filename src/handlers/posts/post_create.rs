use axum::extract::{Multipart, State};
use axum::Extension;
use std::path::Path;

use crate::config;
use crate::error::ApiError;
use crate::handlers::require_field;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::models::Post;
use crate::state::AppState;
use crate::store::posts::{self, NewPost};
use crate::store::users;
use crate::upload::FormData;

/// POST /posts - create a post, optionally with a picture
///
/// The author is the authenticated subject from the verified token, not a
/// client-supplied id. Author display fields are denormalized onto the post
/// at creation time. Responds 201 with the refreshed feed.
pub async fn post_create(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    mut multipart: Multipart,
) -> ApiResult<Vec<Post>> {
    let config = config::config();

    let form = FormData::read(&mut multipart, Path::new(&config.storage.upload_dir)).await?;
    let description = require_field(&form, "description")?;

    let user = users::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Author not found"))?;

    // A location sent with the form wins; otherwise the author's profile
    // location is denormalized onto the post.
    let location = form
        .text("location")
        .filter(|l| !l.trim().is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| user.location.clone());

    let new = NewPost {
        user_id: user.id,
        first_name: user.first_name,
        last_name: user.last_name,
        location,
        description,
        picture_path: form.picture.unwrap_or_default(),
        user_picture_path: user.picture_path,
    };

    let post = posts::insert(&state.pool, new).await?;
    tracing::info!("user {} created post {}", auth.user_id, post.id);

    let feed = posts::all(&state.pool).await?;
    Ok(ApiResponse::created(feed))
}
