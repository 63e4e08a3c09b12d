use super::AuthError;
use crate::middleware::AuthUser;

/// Allow the resource owner or any admin; everyone else is `Forbidden`.
pub fn authorize_owner(identity: &AuthUser, owner_id: i32, denial: &str) -> Result<(), AuthError> {
    if identity.user_id == owner_id || identity.is_admin() {
        return Ok(());
    }

    tracing::warn!(
        "Ownership check failed: user_id {} acting on resource owned by {}",
        identity.user_id,
        owner_id
    );
    Err(AuthError::Forbidden(denial.to_string()))
}

pub fn require_admin(identity: &AuthUser, denial: &str) -> Result<(), AuthError> {
    if identity.is_admin() {
        Ok(())
    } else {
        tracing::warn!("Admin check failed for user_id {}", identity.user_id);
        Err(AuthError::Forbidden(denial.to_string()))
    }
}
