use std::sync::Arc;

use axum::{
    extract::{DefaultBodyLimit, State},
    http::{header, HeaderValue, Method, StatusCode},
    middleware,
    response::{IntoResponse, Json},
    routing::{delete, get, post},
    Router,
};
use serde_json::{json, Value};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::auth::{AuthError, TokenKeys};
use crate::config::AppConfig;
use crate::database::Store;
use crate::handlers::{protected, public};
use crate::middleware::jwt_auth_middleware;

/// Multipart framing overhead allowed on top of the file size limit.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Shared, read-only state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub tokens: Arc<TokenKeys>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, config: AppConfig) -> Result<Self, AuthError> {
        let tokens = TokenKeys::from_secret(&config.security.jwt_secret)?;
        Ok(Self {
            store,
            tokens: Arc::new(tokens),
            config: Arc::new(config),
        })
    }
}

/// Build the complete router: public routes, protected routes behind the
/// bearer token gate, static uploads and the global layers.
pub fn app(state: AppState) -> Router {
    let protected = protected_routes().route_layer(middleware::from_fn_with_state(
        state.clone(),
        jwt_auth_middleware,
    ));
    let body_limit = state.config.uploads.max_file_size_bytes + MULTIPART_OVERHEAD_BYTES;

    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        .merge(public_routes())
        // Protected
        .merge(protected)
        // Stored files
        .nest_service("/uploads", ServeDir::new(&state.config.uploads.dir))
        // Global middleware
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(cors_layer(&state.config))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn public_routes() -> Router<AppState> {
    use public::{auth, likes, media, users};

    Router::new()
        .route("/api/auth/login", post(auth::login_post))
        .route("/api/media", get(media::media_list))
        .route("/api/media/:id", get(media::media_get))
        .route("/api/users", post(users::user_register))
        .route("/api/likes/media/:id", get(likes::likes_by_media))
        .route("/api/likes/user/:id", get(likes::likes_by_user))
}

fn protected_routes() -> Router<AppState> {
    use protected::{auth, likes, media, users};

    Router::new()
        .route("/api/auth/me", get(auth::me_get))
        .route("/api/media", post(media::media_create))
        .route(
            "/api/media/:id",
            axum::routing::put(media::media_update).delete(media::media_delete),
        )
        .route("/api/users", get(users::user_list))
        .route(
            "/api/users/:id",
            get(users::user_get)
                .put(users::user_update)
                .delete(users::user_delete),
        )
        .route("/api/likes", post(likes::like_create))
        .route("/api/likes/:id", delete(likes::like_delete))
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .security
        .cors_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin {:?}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
}

async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "name": "Media API",
        "version": version,
        "description": "Media sharing REST API with JWT authentication",
        "endpoints": {
            "auth": "/api/auth/login (public), /api/auth/me (protected)",
            "media": "/api/media[/:id] (GET public, POST/PUT/DELETE protected)",
            "users": "/api/users[/:id] (POST public registration, others protected)",
            "likes": "/api/likes/media/:id, /api/likes/user/:id (public), /api/likes[/:id] (protected)",
            "uploads": "/uploads/:filename (public)",
            "health": "/health (public)",
        }
    }))
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.store.health_check().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": now,
                "database": "ok"
            })),
        ),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "degraded",
                    "timestamp": now,
                    "database": e.to_string()
                })),
            )
        }
    }
}
