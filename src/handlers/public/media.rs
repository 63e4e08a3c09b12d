// handlers/public/media.rs - GET /api/media[/:id]

use axum::extract::State;

use crate::app::AppState;
use crate::database::models::MediaItemView;
use crate::error::ApiError;
use crate::middleware::{ApiPath, ApiResponse, ApiResult};

/// GET /api/media - every media item
pub async fn media_list(State(state): State<AppState>) -> ApiResult<Vec<MediaItemView>> {
    let items = state.store.list_media().await?;
    Ok(ApiResponse::ok(items.into_iter().map(MediaItemView::from).collect()))
}

/// GET /api/media/:id - single media item
pub async fn media_get(
    State(state): State<AppState>,
    ApiPath(media_id): ApiPath<i32>,
) -> ApiResult<MediaItemView> {
    let item = state
        .store
        .find_media(media_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Item not found"))?;

    Ok(ApiResponse::ok(item.into()))
}
