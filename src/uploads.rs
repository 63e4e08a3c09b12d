use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use uuid::Uuid;

use crate::config::UploadConfig;
use crate::error::ApiError;

const DEFAULT_MEDIA_TYPE: &str = "application/octet-stream";

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("File exceeds the upload size limit of {limit} bytes")]
    TooLarge { limit: usize },

    #[error("Invalid stored filename: {0}")]
    InvalidFilename(String),

    #[error("Upload storage error: {0}")]
    Io(#[from] io::Error),
}

impl From<UploadError> for ApiError {
    fn from(err: UploadError) -> Self {
        match err {
            UploadError::TooLarge { .. } => ApiError::payload_too_large(err.to_string()),
            UploadError::InvalidFilename(_) => ApiError::bad_request(err.to_string()),
            UploadError::Io(_) => {
                tracing::error!("{}", err);
                ApiError::internal_server_error(err.to_string())
            }
        }
    }
}

/// Metadata recorded for a file written to the upload directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    pub filename: String,
    pub filesize: i64,
    pub media_type: String,
}

/// Flat directory of uploaded files, served read-only under `/uploads`.
#[derive(Debug, Clone)]
pub struct UploadDir {
    root: PathBuf,
    max_file_size: usize,
}

impl UploadDir {
    pub fn new(config: &UploadConfig) -> Self {
        Self {
            root: PathBuf::from(&config.dir),
            max_file_size: config.max_file_size_bytes,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub async fn ensure_exists(&self) -> Result<(), UploadError> {
        tokio::fs::create_dir_all(&self.root).await?;
        Ok(())
    }

    /// Reject a body before it is written anywhere.
    pub fn check_size(&self, len: usize) -> Result<(), UploadError> {
        if len > self.max_file_size {
            return Err(UploadError::TooLarge {
                limit: self.max_file_size,
            });
        }
        Ok(())
    }

    /// Write the bytes under a fresh random name, keeping the client's extension.
    pub async fn save(
        &self,
        original_name: Option<&str>,
        media_type: Option<&str>,
        bytes: &[u8],
    ) -> Result<StoredFile, UploadError> {
        self.check_size(bytes.len())?;
        self.ensure_exists().await?;

        let filename = match original_name.and_then(extension_of) {
            Some(ext) => format!("{}.{}", Uuid::new_v4(), ext),
            None => Uuid::new_v4().to_string(),
        };
        tokio::fs::write(self.root.join(&filename), bytes).await?;
        tracing::info!("Stored upload {} ({} bytes)", filename, bytes.len());

        Ok(StoredFile {
            filename,
            filesize: bytes.len() as i64,
            media_type: media_type.unwrap_or(DEFAULT_MEDIA_TYPE).to_string(),
        })
    }

    /// Best effort removal; a missing file is only logged.
    pub async fn remove(&self, filename: &str) {
        if let Err(e) = self.try_remove(filename).await {
            tracing::warn!("Could not remove upload {}: {}", filename, e);
        }
    }

    async fn try_remove(&self, filename: &str) -> Result<(), UploadError> {
        if filename.is_empty() || filename.contains(['/', '\\']) || filename.contains("..") {
            return Err(UploadError::InvalidFilename(filename.to_string()));
        }
        tokio::fs::remove_file(self.root.join(filename)).await?;
        Ok(())
    }
}

fn extension_of(name: &str) -> Option<String> {
    let ext = Path::new(name).extension()?.to_str()?;
    if ext.is_empty() || ext.len() > 10 || !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}
