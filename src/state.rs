use sqlx::PgPool;

use crate::auth::TokenCodec;

/// Shared per-process state handed to handlers and middleware.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub tokens: TokenCodec,
}
