use async_trait::async_trait;

use super::manager::DatabaseError;
use super::models::{Like, MediaChanges, MediaItem, NewMediaItem, NewUser, User, UserChanges, UserCredentials};

/// Persistence operations behind every handler.
///
/// Mutating calls return the number of affected rows so handlers can tell
/// "nothing matched" apart from success. Uniqueness violations surface as
/// `DatabaseError::Conflict`.
#[async_trait]
pub trait Store: Send + Sync {
    // Users
    async fn list_users(&self) -> Result<Vec<User>, DatabaseError>;
    async fn find_user(&self, user_id: i32) -> Result<Option<User>, DatabaseError>;
    async fn find_credentials(&self, username: &str) -> Result<Option<UserCredentials>, DatabaseError>;
    async fn insert_user(&self, user: NewUser) -> Result<i32, DatabaseError>;
    async fn update_user(&self, user_id: i32, changes: UserChanges) -> Result<u64, DatabaseError>;
    async fn delete_user(&self, user_id: i32) -> Result<u64, DatabaseError>;

    // Media items
    async fn list_media(&self) -> Result<Vec<MediaItem>, DatabaseError>;
    async fn find_media(&self, media_id: i32) -> Result<Option<MediaItem>, DatabaseError>;
    async fn insert_media(&self, item: NewMediaItem) -> Result<i32, DatabaseError>;
    async fn update_media(&self, media_id: i32, changes: MediaChanges) -> Result<u64, DatabaseError>;
    async fn delete_media(&self, media_id: i32) -> Result<u64, DatabaseError>;

    // Likes
    async fn likes_for_media(&self, media_id: i32) -> Result<Vec<Like>, DatabaseError>;
    async fn likes_by_user(&self, user_id: i32) -> Result<Vec<Like>, DatabaseError>;
    async fn find_like(&self, like_id: i32) -> Result<Option<Like>, DatabaseError>;
    async fn insert_like(&self, media_id: i32, user_id: i32) -> Result<i32, DatabaseError>;
    async fn delete_like(&self, like_id: i32) -> Result<u64, DatabaseError>;

    async fn health_check(&self) -> Result<(), DatabaseError>;
}
