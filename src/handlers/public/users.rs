// handlers/public/users.rs - POST /api/users (registration)

use axum::extract::State;

use crate::app::AppState;
use crate::auth::{password, require_admin, AuthError};
use crate::database::models::{NewUser, ADMIN_LEVEL};
use crate::middleware::{Ack, ApiJson, ApiResponse, ApiResult, OptionalAuthUser};
use crate::validation::RegisterRequest;

const ADMIN_ONLY: &str = "Forbidden: Only admins can create admin users";

/// POST /api/users - register a new account
///
/// Anyone may register a standard user. Asking for `user_level_id: 1` needs a
/// bearer token belonging to an admin.
pub async fn user_register(
    State(state): State<AppState>,
    OptionalAuthUser(actor): OptionalAuthUser,
    ApiJson(payload): ApiJson<RegisterRequest>,
) -> ApiResult<Ack> {
    let registration = payload.validate()?;

    if registration.user_level_id == ADMIN_LEVEL {
        match &actor {
            Some(actor) => require_admin(actor, ADMIN_ONLY)?,
            None => return Err(AuthError::Forbidden(ADMIN_ONLY.to_string()).into()),
        }
    }

    let password_hash =
        password::hash_password(registration.password, state.config.security.bcrypt_cost).await?;
    let user_id = state
        .store
        .insert_user(NewUser {
            username: registration.username,
            password_hash,
            email: registration.email,
            user_level_id: registration.user_level_id,
        })
        .await?;

    tracing::info!("Registered user_id {}", user_id);
    Ok(ApiResponse::created(Ack::new("User added", user_id)))
}
