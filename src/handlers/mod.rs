pub mod auth;
pub mod posts;
pub mod users;

use crate::error::ApiError;
use crate::upload::FormData;

/// Pull a required text field out of a multipart form.
pub(crate) fn require_field(form: &FormData, name: &str) -> Result<String, ApiError> {
    form.text(name)
        .filter(|v| !v.trim().is_empty())
        .map(str::to_string)
        .ok_or_else(|| ApiError::bad_request(format!("Missing required field: {}", name)))
}
