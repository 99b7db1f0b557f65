use axum::extract::{Multipart, State};
use rand::Rng;
use std::path::Path;

use crate::config;
use crate::error::ApiError;
use crate::handlers::require_field;
use crate::middleware::{ApiResponse, ApiResult};
use crate::models::PublicUser;
use crate::state::AppState;
use crate::store::users::{self, NewUser};
use crate::store::StoreError;
use crate::upload::FormData;

/// POST /auth/register - Create a new user account
///
/// Multipart form: `firstName`, `lastName`, `email`, `password`, optional
/// `location` / `occupation` text fields, optional `picture` file. The
/// picture (if any) is persisted before the record is inserted so the
/// stored reference never points at a missing file.
///
/// Returns 201 with the created user's public fields; the password hash is
/// never part of the response. A duplicate email yields 409.
pub async fn register(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<PublicUser> {
    let config = config::config();

    let form = FormData::read(&mut multipart, Path::new(&config.storage.upload_dir)).await?;

    let first_name = require_field(&form, "firstName")?;
    let last_name = require_field(&form, "lastName")?;
    let email = require_field(&form, "email")?;
    let password = require_field(&form, "password")?;
    let location = form.text("location").unwrap_or_default().to_string();
    let occupation = form.text("occupation").unwrap_or_default().to_string();

    let password_hash = bcrypt::hash(&password, config.security.bcrypt_cost).map_err(|e| {
        tracing::error!("password hashing failed: {}", e);
        ApiError::internal_server_error("Failed to process registration")
    })?;

    // New profiles start with randomized view counters. The RNG is scoped so
    // the non-Send ThreadRng is dropped before the insert await below.
    let (viewed_profile, impressions) = {
        let mut rng = rand::thread_rng();
        (rng.gen_range(0..10_000), rng.gen_range(0..10_000))
    };
    let new = NewUser {
        first_name,
        last_name,
        email,
        password_hash,
        picture_path: form.picture.unwrap_or_default(),
        location,
        occupation,
        viewed_profile,
        impressions,
    };

    let user = users::insert(&state.pool, new).await.map_err(|e| match e {
        StoreError::Duplicate(_) => {
            ApiError::conflict("An account with this email already exists")
        }
        other => other.into(),
    })?;

    tracing::info!("registered user {} ({})", user.id, user.email);
    Ok(ApiResponse::created(user.into()))
}
