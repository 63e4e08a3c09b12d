use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Like {
    pub like_id: i32,
    pub media_id: i32,
    pub user_id: i32,
    pub created_at: DateTime<Utc>,
}
