use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use super::AuthError;
use crate::database::models::User;

/// Lifetime of every issued token.
pub const TOKEN_TTL_HOURS: i64 = 24;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: i32,
    pub username: String,
    pub user_level_id: i32,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn for_user(user: &User) -> Self {
        Self::issued_at(user, Utc::now())
    }

    pub fn issued_at(user: &User, now: DateTime<Utc>) -> Self {
        Self {
            user_id: user.user_id,
            username: user.username.clone(),
            user_level_id: user.user_level_id,
            iat: now.timestamp(),
            exp: (now + Duration::hours(TOKEN_TTL_HOURS)).timestamp(),
        }
    }
}

/// Signing and verification keys derived once from the configured secret.
pub struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl TokenKeys {
    pub fn from_secret(secret: &str) -> Result<Self, AuthError> {
        if secret.is_empty() {
            return Err(AuthError::TokenGeneration("JWT secret not configured".to_string()));
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "iat"]);

        Ok(Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        })
    }

    /// Sign a fresh 24h token for a verified user.
    pub fn issue(&self, user: &User) -> Result<String, AuthError> {
        self.encode(&Claims::for_user(user))
    }

    pub fn encode(&self, claims: &Claims) -> Result<String, AuthError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding)
            .map_err(|e| AuthError::TokenGeneration(e.to_string()))
    }

    /// Verify signature and expiry. Every failure collapses into `TokenInvalid`.
    pub fn decode(&self, token: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                match e.kind() {
                    ErrorKind::ExpiredSignature => tracing::debug!("Rejected expired token"),
                    kind => tracing::warn!("Token verification failed: {:?}", kind),
                }
                AuthError::TokenInvalid
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "unit-test-secret-that-is-at-least-32-bytes";

    fn user(user_id: i32, level: i32) -> User {
        User {
            user_id,
            username: format!("user{}", user_id),
            email: format!("user{}@example.com", user_id),
            user_level_id: level,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn issued_token_round_trips_identity() {
        let keys = TokenKeys::from_secret(SECRET).unwrap();
        let alice = user(7, 2);

        let claims = keys.decode(&keys.issue(&alice).unwrap()).unwrap();

        assert_eq!(claims.user_id, 7);
        assert_eq!(claims.username, "user7");
        assert_eq!(claims.user_level_id, 2);
        assert_eq!(claims.exp - claims.iat, TOKEN_TTL_HOURS * 3600);
    }

    #[test]
    fn token_older_than_a_day_is_rejected() {
        let keys = TokenKeys::from_secret(SECRET).unwrap();
        let issued = Utc::now() - Duration::hours(TOKEN_TTL_HOURS) - Duration::seconds(5);
        let token = keys.encode(&Claims::issued_at(&user(1, 1), issued)).unwrap();

        assert!(matches!(keys.decode(&token), Err(AuthError::TokenInvalid)));
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let keys = TokenKeys::from_secret(SECRET).unwrap();
        let other = TokenKeys::from_secret("a-completely-different-secret-value!!").unwrap();
        let token = other.issue(&user(1, 2)).unwrap();

        assert!(matches!(keys.decode(&token), Err(AuthError::TokenInvalid)));
    }

    #[test]
    fn garbage_token_is_rejected() {
        let keys = TokenKeys::from_secret(SECRET).unwrap();
        assert!(matches!(keys.decode("not.a.jwt"), Err(AuthError::TokenInvalid)));
    }

    #[test]
    fn empty_secret_is_refused() {
        assert!(TokenKeys::from_secret("").is_err());
    }
}
