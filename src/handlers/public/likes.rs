// handlers/public/likes.rs - GET /api/likes/media/:id and /api/likes/user/:id

use axum::extract::State;

use crate::app::AppState;
use crate::database::models::Like;
use crate::middleware::{ApiPath, ApiResponse, ApiResult};

pub async fn likes_by_media(
    State(state): State<AppState>,
    ApiPath(media_id): ApiPath<i32>,
) -> ApiResult<Vec<Like>> {
    Ok(ApiResponse::ok(state.store.likes_for_media(media_id).await?))
}

pub async fn likes_by_user(
    State(state): State<AppState>,
    ApiPath(user_id): ApiPath<i32>,
) -> ApiResult<Vec<Like>> {
    Ok(ApiResponse::ok(state.store.likes_by_user(user_id).await?))
}
