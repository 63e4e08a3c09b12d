// handlers/protected/likes.rs - POST /api/likes, DELETE /api/likes/:id

use axum::extract::State;

use crate::app::AppState;
use crate::auth::authorize_owner;
use crate::error::ApiError;
use crate::middleware::{Ack, ApiJson, ApiPath, ApiResponse, ApiResult, AuthUser};
use crate::validation::LikeRequest;

/// POST /api/likes - like a media item as the signed-in user
pub async fn like_create(
    State(state): State<AppState>,
    user: AuthUser,
    ApiJson(payload): ApiJson<LikeRequest>,
) -> ApiResult<Ack> {
    let media_id = payload.validate()?;

    if state.store.find_media(media_id).await?.is_none() {
        return Err(ApiError::not_found("Item not found"));
    }

    let like_id = state.store.insert_like(media_id, user.user_id).await?;
    Ok(ApiResponse::created(Ack::new("Like added", like_id)))
}

/// DELETE /api/likes/:id - owner or admin
pub async fn like_delete(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(like_id): ApiPath<i32>,
) -> ApiResult<Ack> {
    let like = state
        .store
        .find_like(like_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Like not found"))?;

    authorize_owner(&user, like.user_id, "Forbidden: You cannot delete this like")?;

    if state.store.delete_like(like_id).await? == 0 {
        return Err(ApiError::not_found("Like not found"));
    }

    Ok(ApiResponse::ok(Ack::new("Like deleted", like_id)))
}
