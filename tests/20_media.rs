mod common;

use anyhow::Result;
use axum::http::StatusCode;
use serde_json::json;

use common::TestApp;
use media_api::database::Store;

const PNG: &[u8] = b"\x89PNG\r\n\x1a\nfake-image-bytes";

async fn upload_as(app: &TestApp, token: &str, title: &str) -> Result<i32> {
    let (status, body) = app
        .upload(Some(token), &[("title", title)], Some(("photo.png", "image/png", PNG)))
        .await?;
    anyhow::ensure!(status == StatusCode::CREATED, "upload failed: {} {}", status, body);
    Ok(body["id"].as_i64().unwrap_or_default() as i32)
}

#[tokio::test]
async fn upload_then_fetch() -> Result<()> {
    let app = TestApp::new();
    let alice = app.seed_user("alice", "correct-horse", 2).await?;
    let token = app.login("alice", "correct-horse").await?;

    let (status, body) = app
        .upload(
            Some(&token),
            &[("title", "Sunset"), ("description", "Over the lake")],
            Some(("photo.png", "image/png", PNG)),
        )
        .await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Item added");
    let media_id = body["id"].as_i64().unwrap();

    let (status, item) = app.get(&format!("/api/media/{}", media_id), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(item["user_id"], alice);
    assert_eq!(item["title"], "Sunset");
    assert_eq!(item["description"], "Over the lake");
    assert_eq!(item["media_type"], "image/png");
    assert_eq!(item["filesize"], PNG.len());

    let filename = item["filename"].as_str().unwrap();
    assert!(filename.ends_with(".png"));
    assert_eq!(item["url"], format!("/uploads/{}", filename));
    assert!(app.upload_dir.join(filename).exists());

    let (status, list) = app.get("/api/media", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().map(Vec::len), Some(1));
    Ok(())
}

#[tokio::test]
async fn uploaded_file_is_served_statically() -> Result<()> {
    let app = TestApp::new();
    app.seed_user("alice", "correct-horse", 2).await?;
    let token = app.login("alice", "correct-horse").await?;
    let media_id = upload_as(&app, &token, "Sunset").await?;

    let (_, item) = app.get(&format!("/api/media/{}", media_id), None).await?;
    let url = item["url"].as_str().unwrap().to_string();

    let request = axum::http::Request::builder().uri(&url).body(axum::body::Body::empty())?;
    let response = tower::ServiceExt::oneshot(app.router.clone(), request).await?;
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    assert_eq!(&bytes[..], PNG);
    Ok(())
}

#[tokio::test]
async fn upload_requires_token() -> Result<()> {
    let app = TestApp::new();

    let (status, body) = app
        .upload(None, &[("title", "Sunset")], Some(("photo.png", "image/png", PNG)))
        .await?;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Token missing");
    Ok(())
}

#[tokio::test]
async fn upload_validates_title_and_file() -> Result<()> {
    let app = TestApp::new();
    app.seed_user("alice", "correct-horse", 2).await?;
    let token = app.login("alice", "correct-horse").await?;

    let (status, body) = app.upload(Some(&token), &[("description", "no title")], None).await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let fields: Vec<&str> = body["details"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|d| d["field"].as_str())
        .collect();
    assert_eq!(fields, vec!["title", "file"]);
    assert!(app.store.list_media().await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn non_multipart_upload_is_400_with_envelope() -> Result<()> {
    let app = TestApp::new();
    app.seed_user("alice", "correct-horse", 2).await?;
    let token = app.login("alice", "correct-horse").await?;

    let (status, body) = app
        .post_json("/api/media", Some(&token), json!({ "title": "Sunset" }))
        .await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.is_object());
    assert!(body["message"].is_string());
    assert!(app.store.list_media().await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn oversized_upload_is_413() -> Result<()> {
    let app = TestApp::with_upload_limit(8);
    app.seed_user("alice", "correct-horse", 2).await?;
    let token = app.login("alice", "correct-horse").await?;

    let (status, _) = app
        .upload(Some(&token), &[("title", "Big")], Some(("big.png", "image/png", PNG)))
        .await?;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert!(app.store.list_media().await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn client_supplied_owner_is_ignored() -> Result<()> {
    let app = TestApp::new();
    let alice = app.seed_user("alice", "correct-horse", 2).await?;
    let bob = app.seed_user("bob", "hunter22", 2).await?;
    let token = app.login("alice", "correct-horse").await?;
    let bob_id = bob.to_string();

    let (status, body) = app
        .upload(
            Some(&token),
            &[("title", "Mine"), ("user_id", bob_id.as_str())],
            Some(("photo.png", "image/png", PNG)),
        )
        .await?;
    assert_eq!(status, StatusCode::CREATED);

    let item = app.store.find_media(body["id"].as_i64().unwrap() as i32).await?.unwrap();
    assert_eq!(item.user_id, alice);
    Ok(())
}

#[tokio::test]
async fn missing_item_is_404() -> Result<()> {
    let app = TestApp::new();

    let (status, body) = app.get("/api/media/4242", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "message": "Item not found" }));

    let (status, body) = app.get("/api/media/not-a-number", None).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].is_string());
    Ok(())
}

#[tokio::test]
async fn only_owner_or_admin_may_update() -> Result<()> {
    let app = TestApp::new();
    app.seed_user("alice", "correct-horse", 2).await?;
    app.seed_user("bob", "hunter22", 2).await?;
    app.seed_user("root", "rootpass", 1).await?;
    let alice = app.login("alice", "correct-horse").await?;
    let bob = app.login("bob", "hunter22").await?;
    let root = app.login("root", "rootpass").await?;
    let media_id = upload_as(&app, &alice, "Sunset").await?;
    let uri = format!("/api/media/{}", media_id);

    let (status, body) = app.put_json(&uri, Some(&bob), json!({ "title": "Mine now" })).await?;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Forbidden: You do not own this item");

    let (status, body) = app.put_json(&uri, Some(&alice), json!({ "title": "Dusk" })).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Item updated", "id": media_id }));

    let (status, _) = app
        .put_json(&uri, Some(&root), json!({ "title": "Moderated", "description": "edited" }))
        .await?;
    assert_eq!(status, StatusCode::OK);

    let item = app.store.find_media(media_id).await?.unwrap();
    assert_eq!(item.title, "Moderated");
    assert_eq!(item.description.as_deref(), Some("edited"));
    Ok(())
}

#[tokio::test]
async fn update_requires_title() -> Result<()> {
    let app = TestApp::new();
    app.seed_user("alice", "correct-horse", 2).await?;
    let alice = app.login("alice", "correct-horse").await?;
    let media_id = upload_as(&app, &alice, "Sunset").await?;

    let (status, body) = app
        .put_json(&format!("/api/media/{}", media_id), Some(&alice), json!({ "title": "  " }))
        .await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"][0]["message"], "Title is required");
    Ok(())
}

#[tokio::test]
async fn delete_removes_row_and_file() -> Result<()> {
    let app = TestApp::new();
    app.seed_user("alice", "correct-horse", 2).await?;
    app.seed_user("bob", "hunter22", 2).await?;
    let alice = app.login("alice", "correct-horse").await?;
    let bob = app.login("bob", "hunter22").await?;
    let media_id = upload_as(&app, &alice, "Sunset").await?;
    let uri = format!("/api/media/{}", media_id);
    let filename = app.store.find_media(media_id).await?.unwrap().filename;

    let (status, _) = app.delete(&uri, Some(&bob)).await?;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app.delete(&uri, Some(&alice)).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Item deleted", "id": media_id }));

    assert_eq!(app.get(&uri, None).await?.0, StatusCode::NOT_FOUND);
    assert!(!app.upload_dir.join(filename).exists());

    let (status, _) = app.delete(&uri, Some(&alice)).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}
