//! Request bodies and the rules they must satisfy before reaching the store.
//!
//! Every validator collects all violations instead of stopping at the first
//! one, so a client sees the full list in the error's `details`.

use serde::{Deserialize, Serialize};

use crate::database::models::{ADMIN_LEVEL, STANDARD_LEVEL};
use crate::error::ApiError;

pub const MIN_USERNAME_LEN: usize = 3;
pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

#[derive(Debug, Default)]
struct Violations(Vec<FieldError>);

impl Violations {
    fn check(&mut self, ok: bool, field: &str, message: &str) {
        if !ok {
            self.0.push(FieldError::new(field, message));
        }
    }

    fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn into_error(self) -> ApiError {
        tracing::debug!("Validation failed on {} field(s)", self.0.len());
        ApiError::validation_error("Validation failed", self.0)
    }

    fn finish(self) -> Result<(), ApiError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self.into_error())
        }
    }
}

fn valid_username(username: &str) -> bool {
    username.chars().count() >= MIN_USERNAME_LEN
}

fn valid_password(password: &str) -> bool {
    password.chars().count() >= MIN_PASSWORD_LEN
}

fn valid_user_level(level: i32) -> bool {
    level == ADMIN_LEVEL || level == STANDARD_LEVEL
}

/// Minimal address check: one `@`, a non-empty local part and a dotted domain.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Login body. Missing fields default to empty strings and fail as ordinary
/// bad credentials.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub email: String,
    pub user_level_id: Option<i32>,
}

/// A registration that passed validation, with username and email normalized
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub username: String,
    pub password: String,
    pub email: String,
    pub user_level_id: i32,
}

impl RegisterRequest {
    pub fn validate(self) -> Result<Registration, ApiError> {
        let username = self.username.trim().to_string();
        let email = normalize_email(&self.email);
        let user_level_id = self.user_level_id.unwrap_or(STANDARD_LEVEL);

        let mut violations = Violations::default();
        violations.check(valid_username(&username), "username", "Username must be at least 3 characters");
        violations.check(valid_password(&self.password), "password", "Password must be at least 6 characters");
        violations.check(is_valid_email(&email), "email", "Invalid email address");
        violations.check(valid_user_level(user_level_id), "user_level_id", "User level must be 1 or 2");
        violations.finish()?;

        Ok(Registration {
            username,
            password: self.password,
            email,
            user_level_id,
        })
    }
}

/// Partial user update; absent fields keep their stored value.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UserUpdateRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub user_level_id: Option<i32>,
}

impl UserUpdateRequest {
    pub fn validate(self) -> Result<Self, ApiError> {
        let username = self.username.map(|u| u.trim().to_string());
        let email = self.email.as_deref().map(normalize_email);

        let mut violations = Violations::default();
        if let Some(username) = &username {
            violations.check(valid_username(username), "username", "Username must be at least 3 characters");
        }
        if let Some(email) = &email {
            violations.check(is_valid_email(email), "email", "Invalid email address");
        }
        if let Some(level) = self.user_level_id {
            violations.check(valid_user_level(level), "user_level_id", "User level must be 1 or 2");
        }
        violations.finish()?;

        Ok(Self {
            username,
            email,
            user_level_id: self.user_level_id,
        })
    }
}

/// Fields of a media upload, gathered from the multipart form.
#[derive(Debug, Clone)]
pub struct MediaUpload<F> {
    pub title: Option<String>,
    pub description: Option<String>,
    pub file: Option<F>,
}

impl<F> Default for MediaUpload<F> {
    fn default() -> Self {
        Self {
            title: None,
            description: None,
            file: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidUpload<F> {
    pub title: String,
    pub description: Option<String>,
    pub file: F,
}

impl<F> MediaUpload<F> {
    pub fn validate(self) -> Result<ValidUpload<F>, ApiError> {
        let title = self.title.as_deref().map(str::trim).unwrap_or_default().to_string();

        let mut violations = Violations::default();
        violations.check(!title.is_empty(), "title", "Title is required");
        violations.check(self.file.is_some(), "file", "File is required");

        match self.file {
            Some(file) if violations.is_empty() => Ok(ValidUpload {
                title,
                description: clean_description(self.description.as_deref()),
                file,
            }),
            _ => Err(violations.into_error()),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MediaUpdateRequest {
    pub title: String,
    pub description: Option<String>,
}

impl MediaUpdateRequest {
    pub fn validate(self) -> Result<(String, Option<String>), ApiError> {
        let title = self.title.trim().to_string();

        let mut violations = Violations::default();
        violations.check(!title.is_empty(), "title", "Title is required");
        violations.finish()?;

        Ok((title, clean_description(self.description.as_deref())))
    }
}

fn clean_description(description: Option<&str>) -> Option<String> {
    description
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(str::to_string)
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LikeRequest {
    pub media_id: Option<i32>,
}

impl LikeRequest {
    pub fn validate(&self) -> Result<i32, ApiError> {
        self.media_id
            .ok_or_else(|| ApiError::bad_request("media_id is required"))
    }
}
