use axum::{routing::get, Router};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

mod auth;
mod config;
mod error;
mod handlers;
mod middleware;
mod models;
mod state;
mod store;
mod upload;

use auth::TokenCodec;
use state::AppState;

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let config = config::config();
    tracing::info!("starting mingle-api in {:?} mode", config.environment);

    if config.security.jwt_secret.is_empty() {
        panic!("JWT_SECRET must be set");
    }

    // The store and the upload directory are required before we accept
    // traffic; failing either aborts startup rather than running half-ready.
    let pool = store::connect(config)
        .await
        .unwrap_or_else(|e| panic!("failed to connect to store: {}", e));
    store::init_schema(&pool)
        .await
        .unwrap_or_else(|e| panic!("failed to initialize store schema: {}", e));
    tokio::fs::create_dir_all(&config.storage.upload_dir)
        .await
        .unwrap_or_else(|e| {
            panic!("failed to create upload dir {}: {}", config.storage.upload_dir, e)
        });

    let state = AppState {
        pool,
        tokens: TokenCodec::new(
            config.security.jwt_secret.clone(),
            chrono::Duration::hours(config.security.jwt_expiry_hours as i64),
        ),
    };

    let app = app(state);

    let bind_addr = format!("0.0.0.0:{}", config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    tracing::info!("mingle-api listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}

fn app(state: AppState) -> Router {
    let config = config::config();

    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        // Public auth routes
        .merge(auth_routes())
        // Protected resources (gated per-group by the auth middleware)
        .merge(user_routes(state.clone()))
        .merge(post_routes(state.clone()))
        // Previously uploaded pictures, by stored filename
        .nest_service("/assets", ServeDir::new(&config.storage.upload_dir))
        // Global middleware
        .layer(axum::extract::DefaultBodyLimit::max(30 * 1024 * 1024))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn auth_routes() -> Router<AppState> {
    use axum::routing::post;
    use handlers::auth;

    Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
}

fn user_routes(state: AppState) -> Router<AppState> {
    use axum::routing::patch;
    use handlers::users;

    Router::new()
        .route("/users/:id", get(users::user_get))
        .route("/users/:id/friends", get(users::friends_get))
        .route("/users/:id/:friend_id", patch(users::friend_toggle))
        .route_layer(axum::middleware::from_fn_with_state(
            state,
            middleware::jwt_auth_middleware,
        ))
}

fn post_routes(state: AppState) -> Router<AppState> {
    use axum::routing::{patch, post};
    use handlers::posts;

    Router::new()
        .route("/posts", get(posts::feed_get).post(posts::post_create))
        // :id here is the author's user id, not a post id
        .route("/posts/:id/posts", get(posts::user_posts_get))
        .route("/posts/:id/like", patch(posts::like_toggle))
        .route_layer(axum::middleware::from_fn_with_state(
            state,
            middleware::jwt_auth_middleware,
        ))
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "success": true,
        "data": {
            "name": "Mingle API",
            "version": version,
            "description": "Minimal social backend built with Rust (Axum)",
            "endpoints": {
                "home": "/ (public)",
                "auth": "/auth/register, /auth/login (public)",
                "users": "/users/:id[/friends], /users/:id/:friend_id (protected)",
                "posts": "/posts, /posts/:user_id/posts, /posts/:id/like (protected)",
                "assets": "/assets/:filename (public)",
            }
        }
    }))
}

async fn health(
    axum::extract::State(state): axum::extract::State<AppState>,
) -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match store::ping(&state.pool).await {
        Ok(_) => (
            axum::http::StatusCode::OK,
            axum::response::Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "store": "ok"
                }
            })),
        ),
        Err(e) => {
            // Connection details stay in the logs, never in the response
            tracing::error!("health check store ping failed: {}", e);
            (
                axum::http::StatusCode::SERVICE_UNAVAILABLE,
                axum::response::Json(json!({
                    "success": false,
                    "error": "store unavailable",
                    "data": {
                        "status": "degraded",
                        "timestamp": now,
                        "store": "unavailable"
                    }
                })),
            )
        }
    }
}
