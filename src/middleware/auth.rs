use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

/// Authenticated user context extracted from a verified bearer token
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub user_id: Uuid,
}

/// Token-verification middleware guarding protected routes.
///
/// Extracts the bearer token from the Authorization header, verifies it with
/// the token codec, and injects [`AuthUser`] into the request extensions for
/// downstream handlers. Any failure short-circuits the request with a 401;
/// the distinct verification failures are deliberately collapsed into one
/// client-visible kind.
pub async fn jwt_auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer_token(request.headers())?;

    let claims = state.tokens.verify(&token).map_err(|e| {
        tracing::warn!("rejected bearer token: {}", e);
        ApiError::unauthorized("Invalid or expired token")
    })?;

    request.extensions_mut().insert(AuthUser { user_id: claims.sub });

    Ok(next.run(request).await)
}

/// Pull the token out of the Authorization header, stripping the "Bearer "
/// prefix when present.
fn extract_bearer_token(headers: &HeaderMap) -> Result<String, ApiError> {
    let auth_header = headers
        .get("authorization")
        .ok_or_else(|| ApiError::unauthorized("Missing Authorization header"))?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| ApiError::unauthorized("Invalid Authorization header"))?;

    let token = auth_str.strip_prefix("Bearer ").unwrap_or(auth_str).trim();

    if token.is_empty() {
        return Err(ApiError::unauthorized("Empty bearer token"));
    }

    Ok(token.to_string())
}
