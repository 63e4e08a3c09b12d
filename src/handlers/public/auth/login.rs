// handlers/public/auth/login.rs - POST /api/auth/login handler

use axum::extract::State;
use serde::Serialize;

use crate::app::AppState;
use crate::auth::verify_credentials;
use crate::database::models::User;
use crate::middleware::{ApiJson, ApiResponse, ApiResult};
use crate::validation::LoginRequest;

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: &'static str,
    pub token: String,
    pub user: User,
}

/// POST /api/auth/login - Authenticate user and receive JWT token
///
/// Expected Input:
/// ```json
/// { "username": "string", "password": "string" }
/// ```
///
/// Returns `{ "message": "Login successful", "token", "user" }`. Unknown
/// usernames, wrong passwords and empty fields all produce 401
/// `Invalid credentials`; only a body that is not a JSON object is a 400.
pub async fn login_post(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<LoginRequest>,
) -> ApiResult<LoginResponse> {
    let user = verify_credentials(
        state.store.as_ref(),
        &payload.username,
        &payload.password,
        state.config.security.bcrypt_cost,
    )
    .await?;
    let token = state.tokens.issue(&user)?;

    tracing::info!("User {} logged in", user.user_id);
    Ok(ApiResponse::ok(LoginResponse {
        message: "Login successful",
        token,
        user,
    }))
}
