use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct MediaItem {
    pub media_id: i32,
    pub user_id: i32,
    pub filename: String,
    pub filesize: i64,
    pub media_type: String,
    pub title: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl MediaItem {
    /// Public path the stored file is served from.
    pub fn url(&self) -> String {
        format!("/uploads/{}", self.filename)
    }
}

#[derive(Debug, Clone)]
pub struct NewMediaItem {
    pub user_id: i32,
    pub filename: String,
    pub filesize: i64,
    pub media_type: String,
    pub title: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone)]
pub struct MediaChanges {
    pub title: String,
    pub description: Option<String>,
}

/// Media item as returned by the API, with its public URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MediaItemView {
    #[serde(flatten)]
    pub item: MediaItem,
    pub url: String,
}

impl From<MediaItem> for MediaItemView {
    fn from(item: MediaItem) -> Self {
        let url = item.url();
        Self { item, url }
    }
}
