#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::{Duration, Utc};
use serde_json::Value;
use tower::ServiceExt;

use media_api::auth::Claims;
use media_api::config::AppConfig;
use media_api::testing::MemoryStore;
use media_api::{app, AppState};

pub const SECRET: &str = "integration-test-secret-at-least-32-bytes";
pub const TEST_BCRYPT_COST: u32 = 4;
const BOUNDARY: &str = "media-api-test-boundary";

/// The real router wired to an in-memory store and a private upload directory
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub store: Arc<MemoryStore>,
    pub upload_dir: PathBuf,
}

/// A multipart file part: (filename, content type, bytes)
pub type FilePart<'a> = (&'a str, &'a str, &'a [u8]);

impl TestApp {
    pub fn new() -> Self {
        Self::with_upload_limit(1024 * 1024)
    }

    pub fn with_upload_limit(max_file_size_bytes: usize) -> Self {
        let upload_dir = std::env::temp_dir().join(format!("media-api-test-{}", uuid::Uuid::new_v4()));

        let mut config = AppConfig::development();
        config.security.jwt_secret = SECRET.to_string();
        config.security.bcrypt_cost = TEST_BCRYPT_COST;
        config.uploads.dir = upload_dir.to_string_lossy().into_owned();
        config.uploads.max_file_size_bytes = max_file_size_bytes;

        let store = Arc::new(MemoryStore::new());
        let state = AppState::new(store.clone(), config).expect("test state");

        Self {
            router: app(state.clone()),
            state,
            store,
            upload_dir,
        }
    }

    pub async fn seed_user(&self, username: &str, password: &str, level: i32) -> Result<i32> {
        let email = format!("{}@example.com", username);
        Ok(self
            .store
            .seed_user(username, password, &email, level, TEST_BCRYPT_COST)
            .await?)
    }

    /// Log in over HTTP and return the bearer token
    pub async fn login(&self, username: &str, password: &str) -> Result<String> {
        let (status, body) = self
            .post_json(
                "/api/auth/login",
                None,
                serde_json::json!({ "username": username, "password": password }),
            )
            .await?;
        anyhow::ensure!(status == StatusCode::OK, "login failed: {} {}", status, body);

        body["token"]
            .as_str()
            .map(str::to_string)
            .context("login response has no token")
    }

    /// Sign a token directly, `age` after issue
    pub fn token_aged(&self, user_id: i32, username: &str, level: i32, age: Duration) -> String {
        let iat = Utc::now() - age;
        let claims = Claims {
            user_id,
            username: username.to_string(),
            user_level_id: level,
            iat: iat.timestamp(),
            exp: (iat + Duration::hours(24)).timestamp(),
        };
        self.state.tokens.encode(&claims).expect("sign test token")
    }

    pub async fn send(&self, request: Request<Body>) -> Result<(StatusCode, Value)> {
        let response = self.router.clone().oneshot(request).await?;
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;

        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };
        Ok((status, body))
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> Result<(StatusCode, Value)> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }

        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))?,
            None => builder.body(Body::empty())?,
        };
        self.send(request).await
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> Result<(StatusCode, Value)> {
        self.request(Method::GET, uri, token, None).await
    }

    pub async fn post_json(&self, uri: &str, token: Option<&str>, body: Value) -> Result<(StatusCode, Value)> {
        self.request(Method::POST, uri, token, Some(body)).await
    }

    pub async fn put_json(&self, uri: &str, token: Option<&str>, body: Value) -> Result<(StatusCode, Value)> {
        self.request(Method::PUT, uri, token, Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: Option<&str>) -> Result<(StatusCode, Value)> {
        self.request(Method::DELETE, uri, token, None).await
    }

    /// POST /api/media as multipart/form-data
    pub async fn upload(
        &self,
        token: Option<&str>,
        fields: &[(&str, &str)],
        file: Option<FilePart<'_>>,
    ) -> Result<(StatusCode, Value)> {
        let mut builder = Request::builder()
            .method(Method::POST)
            .uri("/api/media")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", BOUNDARY),
            );
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }

        let request = builder.body(Body::from(multipart_body(fields, file)))?;
        self.send(request).await
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.upload_dir);
    }
}

fn multipart_body(fields: &[(&str, &str)], file: Option<FilePart<'_>>) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                BOUNDARY, name, value
            )
            .as_bytes(),
        );
    }
    if let Some((filename, content_type, bytes)) = file {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                BOUNDARY, filename, content_type
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}
