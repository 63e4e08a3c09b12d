//! Lock-protected in-memory `Store` for tests and local experiments.
//!
//! Mirrors the constraints of the Postgres schema: unique usernames, one like
//! per (media, user) pair, and cascading deletes from users and media items.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::database::models::{
    Like, MediaChanges, MediaItem, NewMediaItem, NewUser, User, UserChanges, UserCredentials,
};
use crate::database::{DatabaseError, Store};

#[derive(Default)]
struct Tables {
    users: Vec<UserCredentials>,
    media: Vec<MediaItem>,
    likes: Vec<Like>,
    next_user_id: i32,
    next_media_id: i32,
    next_like_id: i32,
}

impl Tables {
    fn next_id(counter: &mut i32) -> i32 {
        *counter += 1;
        *counter
    }
}

#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a user with a freshly hashed password and return its id.
    pub async fn seed_user(
        &self,
        username: &str,
        password: &str,
        email: &str,
        user_level_id: i32,
        bcrypt_cost: u32,
    ) -> Result<i32, DatabaseError> {
        let password_hash = bcrypt::hash(password, bcrypt_cost)
            .map_err(|e| DatabaseError::QueryError(e.to_string()))?;
        self.insert_user(NewUser {
            username: username.to_string(),
            password_hash,
            email: email.to_string(),
            user_level_id,
        })
        .await
    }

    /// Insert a media item row without touching the filesystem.
    pub async fn seed_media(&self, owner_id: i32, title: &str) -> Result<i32, DatabaseError> {
        self.insert_media(NewMediaItem {
            user_id: owner_id,
            filename: format!("{}.jpg", title.replace(' ', "-")),
            filesize: 1024,
            media_type: "image/jpeg".to_string(),
            title: title.to_string(),
            description: None,
        })
        .await
    }

    pub async fn user_count(&self) -> usize {
        self.tables.read().await.users.len()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn list_users(&self) -> Result<Vec<User>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().cloned().map(UserCredentials::into_public).collect())
    }

    async fn find_user(&self, user_id: i32) -> Result<Option<User>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .iter()
            .find(|u| u.user_id == user_id)
            .cloned()
            .map(UserCredentials::into_public))
    }

    async fn find_credentials(&self, username: &str) -> Result<Option<UserCredentials>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.username == username).cloned())
    }

    async fn insert_user(&self, user: NewUser) -> Result<i32, DatabaseError> {
        let mut tables = self.tables.write().await;
        if tables.users.iter().any(|u| u.username == user.username) {
            return Err(DatabaseError::Conflict("Username already exists".to_string()));
        }

        let user_id = Tables::next_id(&mut tables.next_user_id);
        tables.users.push(UserCredentials {
            user_id,
            username: user.username,
            password: user.password_hash,
            email: user.email,
            user_level_id: user.user_level_id,
            created_at: Utc::now(),
        });
        Ok(user_id)
    }

    async fn update_user(&self, user_id: i32, changes: UserChanges) -> Result<u64, DatabaseError> {
        let mut tables = self.tables.write().await;
        if tables
            .users
            .iter()
            .any(|u| u.username == changes.username && u.user_id != user_id)
        {
            return Err(DatabaseError::Conflict("Username already exists".to_string()));
        }

        match tables.users.iter_mut().find(|u| u.user_id == user_id) {
            Some(user) => {
                user.username = changes.username;
                user.email = changes.email;
                user.user_level_id = changes.user_level_id;
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete_user(&self, user_id: i32) -> Result<u64, DatabaseError> {
        let mut tables = self.tables.write().await;
        let before = tables.users.len();
        tables.users.retain(|u| u.user_id != user_id);
        if tables.users.len() == before {
            return Ok(0);
        }

        let owned_media: Vec<i32> = tables
            .media
            .iter()
            .filter(|m| m.user_id == user_id)
            .map(|m| m.media_id)
            .collect();
        tables.media.retain(|m| m.user_id != user_id);
        tables
            .likes
            .retain(|l| l.user_id != user_id && !owned_media.contains(&l.media_id));
        Ok(1)
    }

    async fn list_media(&self) -> Result<Vec<MediaItem>, DatabaseError> {
        Ok(self.tables.read().await.media.clone())
    }

    async fn find_media(&self, media_id: i32) -> Result<Option<MediaItem>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables.media.iter().find(|m| m.media_id == media_id).cloned())
    }

    async fn insert_media(&self, item: NewMediaItem) -> Result<i32, DatabaseError> {
        let mut tables = self.tables.write().await;
        let media_id = Tables::next_id(&mut tables.next_media_id);
        tables.media.push(MediaItem {
            media_id,
            user_id: item.user_id,
            filename: item.filename,
            filesize: item.filesize,
            media_type: item.media_type,
            title: item.title,
            description: item.description,
            created_at: Utc::now(),
        });
        Ok(media_id)
    }

    async fn update_media(&self, media_id: i32, changes: MediaChanges) -> Result<u64, DatabaseError> {
        let mut tables = self.tables.write().await;
        match tables.media.iter_mut().find(|m| m.media_id == media_id) {
            Some(item) => {
                item.title = changes.title;
                item.description = changes.description;
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete_media(&self, media_id: i32) -> Result<u64, DatabaseError> {
        let mut tables = self.tables.write().await;
        let before = tables.media.len();
        tables.media.retain(|m| m.media_id != media_id);
        if tables.media.len() == before {
            return Ok(0);
        }
        tables.likes.retain(|l| l.media_id != media_id);
        Ok(1)
    }

    async fn likes_for_media(&self, media_id: i32) -> Result<Vec<Like>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables.likes.iter().filter(|l| l.media_id == media_id).cloned().collect())
    }

    async fn likes_by_user(&self, user_id: i32) -> Result<Vec<Like>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables.likes.iter().filter(|l| l.user_id == user_id).cloned().collect())
    }

    async fn find_like(&self, like_id: i32) -> Result<Option<Like>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables.likes.iter().find(|l| l.like_id == like_id).cloned())
    }

    async fn insert_like(&self, media_id: i32, user_id: i32) -> Result<i32, DatabaseError> {
        let mut tables = self.tables.write().await;
        if tables
            .likes
            .iter()
            .any(|l| l.media_id == media_id && l.user_id == user_id)
        {
            return Err(DatabaseError::Conflict("Media item already liked".to_string()));
        }

        let like_id = Tables::next_id(&mut tables.next_like_id);
        tables.likes.push(Like {
            like_id,
            media_id,
            user_id,
            created_at: Utc::now(),
        });
        Ok(like_id)
    }

    async fn delete_like(&self, like_id: i32) -> Result<u64, DatabaseError> {
        let mut tables = self.tables.write().await;
        let before = tables.likes.len();
        tables.likes.retain(|l| l.like_id != like_id);
        Ok((before - tables.likes.len()) as u64)
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
}
