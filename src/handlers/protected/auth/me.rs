// handlers/protected/auth/me.rs - GET /api/auth/me handler

use serde::Serialize;

use crate::middleware::{ApiResponse, ApiResult, AuthUser};

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub message: &'static str,
    pub user: AuthUser,
}

/// GET /api/auth/me - echo the decoded token identity
///
/// Answers from the token alone; a user deleted after login still appears
/// here until the token expires.
pub async fn me_get(user: AuthUser) -> ApiResult<MeResponse> {
    Ok(ApiResponse::ok(MeResponse {
        message: "Authenticated",
        user,
    }))
}
