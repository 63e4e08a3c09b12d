// handlers/protected/users.rs - /api/users management for signed-in users

use axum::extract::State;

use crate::app::AppState;
use crate::auth::{authorize_owner, require_admin};
use crate::database::models::{User, UserChanges};
use crate::error::ApiError;
use crate::middleware::{Ack, ApiJson, ApiPath, ApiResponse, ApiResult, AuthUser};
use crate::validation::UserUpdateRequest;

/// GET /api/users
pub async fn user_list(State(state): State<AppState>) -> ApiResult<Vec<User>> {
    Ok(ApiResponse::ok(state.store.list_users().await?))
}

/// GET /api/users/:id
pub async fn user_get(
    State(state): State<AppState>,
    ApiPath(user_id): ApiPath<i32>,
) -> ApiResult<User> {
    let user = state
        .store
        .find_user(user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    Ok(ApiResponse::ok(user))
}

/// PUT /api/users/:id - self or admin; only admins may change `user_level_id`
pub async fn user_update(
    State(state): State<AppState>,
    actor: AuthUser,
    ApiPath(user_id): ApiPath<i32>,
    ApiJson(payload): ApiJson<UserUpdateRequest>,
) -> ApiResult<Ack> {
    authorize_owner(&actor, user_id, "Forbidden: You cannot modify this user")?;
    let payload = payload.validate()?;

    let existing = state
        .store
        .find_user(user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    if let Some(level) = payload.user_level_id {
        if level != existing.user_level_id {
            require_admin(&actor, "Forbidden: Only admins can change user levels")?;
        }
    }

    let changes = UserChanges {
        username: payload.username.unwrap_or(existing.username),
        email: payload.email.unwrap_or(existing.email),
        user_level_id: payload.user_level_id.unwrap_or(existing.user_level_id),
    };
    if state.store.update_user(user_id, changes).await? == 0 {
        return Err(ApiError::not_found("User not found"));
    }

    Ok(ApiResponse::ok(Ack::new("User updated", user_id)))
}

/// DELETE /api/users/:id - self or admin
pub async fn user_delete(
    State(state): State<AppState>,
    actor: AuthUser,
    ApiPath(user_id): ApiPath<i32>,
) -> ApiResult<Ack> {
    authorize_owner(&actor, user_id, "Forbidden: You cannot delete this user")?;

    if state.store.delete_user(user_id).await? == 0 {
        return Err(ApiError::not_found("User not found"));
    }

    tracing::info!("User {} deleted user_id {}", actor.user_id, user_id);
    Ok(ApiResponse::ok(Ack::new("User deleted", user_id)))
}
