use async_trait::async_trait;
use sqlx::PgPool;

use super::manager::{DatabaseError, DatabaseManager};
use super::models::{Like, MediaChanges, MediaItem, NewMediaItem, NewUser, User, UserChanges, UserCredentials};
use super::store::Store;

const USER_COLUMNS: &str = "user_id, username, email, user_level_id, created_at";
const MEDIA_COLUMNS: &str =
    "media_id, user_id, filename, filesize, media_type, title, description, created_at";
const LIKE_COLUMNS: &str = "like_id, media_id, user_id, created_at";

/// `Store` backed by the Postgres pool
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Store for PgStore {
    async fn list_users(&self) -> Result<Vec<User>, DatabaseError> {
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY user_id"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    async fn find_user(&self, user_id: i32) -> Result<Option<User>, DatabaseError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE user_id = $1"
        ))
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_credentials(&self, username: &str) -> Result<Option<UserCredentials>, DatabaseError> {
        let user = sqlx::query_as::<_, UserCredentials>(
            "SELECT user_id, username, password, email, user_level_id, created_at
             FROM users
             WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn insert_user(&self, user: NewUser) -> Result<i32, DatabaseError> {
        sqlx::query_scalar::<_, i32>(
            "INSERT INTO users (username, password, email, user_level_id)
             VALUES ($1, $2, $3, $4)
             RETURNING user_id",
        )
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(&user.email)
        .bind(user.user_level_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DatabaseError::on_unique_violation(e, "Username already exists"))
    }

    async fn update_user(&self, user_id: i32, changes: UserChanges) -> Result<u64, DatabaseError> {
        let result = sqlx::query(
            "UPDATE users SET username = $1, email = $2, user_level_id = $3 WHERE user_id = $4",
        )
        .bind(&changes.username)
        .bind(&changes.email)
        .bind(changes.user_level_id)
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(|e| DatabaseError::on_unique_violation(e, "Username already exists"))?;

        Ok(result.rows_affected())
    }

    async fn delete_user(&self, user_id: i32) -> Result<u64, DatabaseError> {
        let result = sqlx::query("DELETE FROM users WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn list_media(&self) -> Result<Vec<MediaItem>, DatabaseError> {
        let items = sqlx::query_as::<_, MediaItem>(&format!(
            "SELECT {MEDIA_COLUMNS} FROM media_items ORDER BY media_id"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    async fn find_media(&self, media_id: i32) -> Result<Option<MediaItem>, DatabaseError> {
        let item = sqlx::query_as::<_, MediaItem>(&format!(
            "SELECT {MEDIA_COLUMNS} FROM media_items WHERE media_id = $1"
        ))
        .bind(media_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(item)
    }

    async fn insert_media(&self, item: NewMediaItem) -> Result<i32, DatabaseError> {
        let media_id = sqlx::query_scalar::<_, i32>(
            "INSERT INTO media_items (user_id, filename, filesize, media_type, title, description)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING media_id",
        )
        .bind(item.user_id)
        .bind(&item.filename)
        .bind(item.filesize)
        .bind(&item.media_type)
        .bind(&item.title)
        .bind(&item.description)
        .fetch_one(&self.pool)
        .await?;

        Ok(media_id)
    }

    async fn update_media(&self, media_id: i32, changes: MediaChanges) -> Result<u64, DatabaseError> {
        let result = sqlx::query("UPDATE media_items SET title = $1, description = $2 WHERE media_id = $3")
            .bind(&changes.title)
            .bind(&changes.description)
            .bind(media_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn delete_media(&self, media_id: i32) -> Result<u64, DatabaseError> {
        let result = sqlx::query("DELETE FROM media_items WHERE media_id = $1")
            .bind(media_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn likes_for_media(&self, media_id: i32) -> Result<Vec<Like>, DatabaseError> {
        let likes = sqlx::query_as::<_, Like>(&format!(
            "SELECT {LIKE_COLUMNS} FROM likes WHERE media_id = $1 ORDER BY like_id"
        ))
        .bind(media_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(likes)
    }

    async fn likes_by_user(&self, user_id: i32) -> Result<Vec<Like>, DatabaseError> {
        let likes = sqlx::query_as::<_, Like>(&format!(
            "SELECT {LIKE_COLUMNS} FROM likes WHERE user_id = $1 ORDER BY like_id"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(likes)
    }

    async fn find_like(&self, like_id: i32) -> Result<Option<Like>, DatabaseError> {
        let like = sqlx::query_as::<_, Like>(&format!(
            "SELECT {LIKE_COLUMNS} FROM likes WHERE like_id = $1"
        ))
        .bind(like_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(like)
    }

    async fn insert_like(&self, media_id: i32, user_id: i32) -> Result<i32, DatabaseError> {
        sqlx::query_scalar::<_, i32>(
            "INSERT INTO likes (media_id, user_id) VALUES ($1, $2) RETURNING like_id",
        )
        .bind(media_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DatabaseError::on_unique_violation(e, "Media item already liked"))
    }

    async fn delete_like(&self, like_id: i32) -> Result<u64, DatabaseError> {
        let result = sqlx::query("DELETE FROM likes WHERE like_id = $1")
            .bind(like_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        DatabaseManager::health_check(&self.pool).await
    }
}
