// handlers/protected/media.rs - POST /api/media, PUT/DELETE /api/media/:id

use axum::{body::Bytes, extract::State};

use crate::app::AppState;
use crate::auth::authorize_owner;
use crate::database::models::{MediaChanges, MediaItem, NewMediaItem};
use crate::error::ApiError;
use crate::middleware::{Ack, ApiJson, ApiMultipart, ApiPath, ApiResponse, ApiResult, AuthUser};
use crate::uploads::UploadDir;
use crate::validation::{MediaUpdateRequest, MediaUpload, ValidUpload};

const NOT_OWNER: &str = "Forbidden: You do not own this item";

struct PendingFile {
    name: Option<String>,
    content_type: Option<String>,
    bytes: Bytes,
}

/// POST /api/media - multipart upload with `title`, optional `description` and `file`
pub async fn media_create(
    State(state): State<AppState>,
    user: AuthUser,
    ApiMultipart(mut multipart): ApiMultipart,
) -> ApiResult<Ack> {
    let uploads = UploadDir::new(&state.config.uploads);
    let mut form = MediaUpload::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "title" => form.title = Some(field.text().await?),
            "description" => form.description = Some(field.text().await?),
            "file" => {
                let pending = PendingFile {
                    name: field.file_name().map(str::to_string),
                    content_type: field.content_type().map(str::to_string),
                    bytes: field.bytes().await?,
                };
                uploads.check_size(pending.bytes.len())?;
                form.file = (!pending.bytes.is_empty()).then_some(pending);
            }
            other => tracing::debug!("Ignoring multipart field {:?}", other),
        }
    }

    let ValidUpload {
        title,
        description,
        file,
    } = form.validate()?;

    let stored = uploads
        .save(file.name.as_deref(), file.content_type.as_deref(), &file.bytes)
        .await?;
    let filename = stored.filename.clone();

    let inserted = state
        .store
        .insert_media(NewMediaItem {
            user_id: user.user_id,
            filename: stored.filename,
            filesize: stored.filesize,
            media_type: stored.media_type,
            title,
            description,
        })
        .await;

    match inserted {
        Ok(media_id) => {
            tracing::info!("User {} added media item {}", user.user_id, media_id);
            Ok(ApiResponse::created(Ack::new("Item added", media_id)))
        }
        Err(e) => {
            uploads.remove(&filename).await;
            Err(e.into())
        }
    }
}

async fn owned_item(state: &AppState, user: &AuthUser, media_id: i32) -> Result<MediaItem, ApiError> {
    let item = state
        .store
        .find_media(media_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Item not found"))?;

    authorize_owner(user, item.user_id, NOT_OWNER)?;
    Ok(item)
}

/// PUT /api/media/:id - change title and description (owner or admin)
pub async fn media_update(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(media_id): ApiPath<i32>,
    ApiJson(payload): ApiJson<MediaUpdateRequest>,
) -> ApiResult<Ack> {
    owned_item(&state, &user, media_id).await?;
    let (title, description) = payload.validate()?;

    let updated = state
        .store
        .update_media(media_id, MediaChanges { title, description })
        .await?;
    if updated == 0 {
        return Err(ApiError::not_found("Item not found"));
    }

    Ok(ApiResponse::ok(Ack::new("Item updated", media_id)))
}

/// DELETE /api/media/:id - remove the row and its stored file (owner or admin)
pub async fn media_delete(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(media_id): ApiPath<i32>,
) -> ApiResult<Ack> {
    let item = owned_item(&state, &user, media_id).await?;

    if state.store.delete_media(media_id).await? == 0 {
        return Err(ApiError::not_found("Item not found"));
    }
    UploadDir::new(&state.config.uploads).remove(&item.filename).await;

    tracing::info!("User {} deleted media item {}", user.user_id, media_id);
    Ok(ApiResponse::ok(Ack::new("Item deleted", media_id)))
}
