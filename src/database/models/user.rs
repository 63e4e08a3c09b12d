use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

pub const ADMIN_LEVEL: i32 = 1;
pub const STANDARD_LEVEL: i32 = 2;

/// Public view of a user row. Never carries the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct User {
    pub user_id: i32,
    pub username: String,
    pub email: String,
    pub user_level_id: i32,
    pub created_at: DateTime<Utc>,
}

/// User row including the stored bcrypt hash, only read by the credential check.
#[derive(Debug, Clone, FromRow)]
pub struct UserCredentials {
    pub user_id: i32,
    pub username: String,
    pub password: String,
    pub email: String,
    pub user_level_id: i32,
    pub created_at: DateTime<Utc>,
}

impl UserCredentials {
    pub fn into_public(self) -> User {
        User {
            user_id: self.user_id,
            username: self.username,
            email: self.email,
            user_level_id: self.user_level_id,
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
    pub email: String,
    pub user_level_id: i32,
}

#[derive(Debug, Clone)]
pub struct UserChanges {
    pub username: String,
    pub email: String,
    pub user_level_id: i32,
}
