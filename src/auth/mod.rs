//! Authentication and authorization.
//!
//! Login runs the credential check in [`credentials`] and signs a token with
//! [`jwt::TokenKeys`]. Protected routes decode that token in
//! `middleware::auth` and hand handlers an `AuthUser`, which
//! [`ownership`] compares against resource owners.

pub mod credentials;
pub mod jwt;
pub mod ownership;
pub mod password;

use thiserror::Error;

use crate::database::DatabaseError;

pub use credentials::verify_credentials;
pub use jwt::{Claims, TokenKeys, TOKEN_TTL_HOURS};
pub use ownership::{authorize_owner, require_admin};

#[derive(Debug, Error)]
pub enum AuthError {
    /// Unknown username and wrong password are deliberately indistinguishable.
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Token missing")]
    TokenMissing,

    #[error("Invalid token")]
    TokenInvalid,

    #[error("{0}")]
    Forbidden(String),

    #[error("JWT generation error: {0}")]
    TokenGeneration(String),

    #[error("Password hashing error: {0}")]
    Hashing(String),

    #[error(transparent)]
    Store(#[from] DatabaseError),
}
