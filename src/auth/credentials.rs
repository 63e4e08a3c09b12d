use super::{password, AuthError};
use crate::database::models::User;
use crate::database::Store;

/// Check a username/password pair against the stored bcrypt hash.
///
/// Both failure modes return `InvalidCredentials`. An unknown username still
/// pays for one bcrypt computation so timing does not reveal which usernames
/// exist.
pub async fn verify_credentials(
    store: &dyn Store,
    username: &str,
    plaintext: &str,
    bcrypt_cost: u32,
) -> Result<User, AuthError> {
    let Some(stored) = store.find_credentials(username).await? else {
        let _ = password::hash_password(plaintext.to_string(), bcrypt_cost).await;
        tracing::warn!("Login rejected: unknown username");
        return Err(AuthError::InvalidCredentials);
    };

    if !password::verify_password(plaintext.to_string(), stored.password.clone()).await? {
        tracing::warn!("Login rejected: wrong password for user_id {}", stored.user_id);
        return Err(AuthError::InvalidCredentials);
    }

    tracing::debug!("Credentials verified for user_id {}", stored.user_id);
    Ok(stored.into_public())
}
