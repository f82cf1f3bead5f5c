mod common;

use axum::http::StatusCode;
use axum_test::multipart::{MultipartForm, Part};
use common::{TestApp, BUCKET};
use serde_json::Value;

const PNG_HEADER: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

fn image_form(bytes: Vec<u8>, file_name: &str, mime: &str) -> MultipartForm {
    MultipartForm::new().add_part(
        "image",
        Part::bytes(bytes).file_name(file_name).mime_type(mime),
    )
}

#[tokio::test]
async fn uploads_an_image_to_storage() {
    let app = TestApp::new().await;
    let (_, token) = app.user("kim@example.com", "kim").await;

    let response = app
        .server
        .post("/v1/upload/images")
        .authorization_bearer(&token)
        .multipart(image_form(PNG_HEADER.to_vec(), "Diagram.PNG", "image/png"))
        .await;
    response.assert_status(StatusCode::CREATED);

    let url = response.json::<Value>()["url"].as_str().unwrap().to_string();
    let prefix = format!("https://{BUCKET}.s3.amazonaws.com/");
    assert!(url.starts_with(&prefix));
    assert!(url.ends_with(".png"));

    let key = url.trim_start_matches(&prefix);
    let (bytes, content_type) = app.storage.get(key).unwrap();
    assert_eq!(bytes, PNG_HEADER);
    assert_eq!(content_type, "image/png");
}

#[tokio::test]
async fn rejects_non_image_files() {
    let app = TestApp::new().await;
    let (_, token) = app.user("kim@example.com", "kim").await;

    app.server
        .post("/v1/upload/images")
        .authorization_bearer(&token)
        .multipart(image_form(b"%PDF-1.7".to_vec(), "notes.pdf", "application/pdf"))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn rejects_images_over_the_size_limit() {
    let app = TestApp::new().await;
    let (_, token) = app.user("kim@example.com", "kim").await;

    let oversized = vec![0u8; scs::services::upload::MAX_IMAGE_BYTES + 1];
    app.server
        .post("/v1/upload/images")
        .authorization_bearer(&token)
        .multipart(image_form(oversized, "huge.png", "image/png"))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn issues_presigned_urls() {
    let app = TestApp::new().await;
    let (_, token) = app.user("kim@example.com", "kim").await;

    let response = app
        .server
        .post("/v1/upload/presigned-url")
        .authorization_bearer(&token)
        .await;
    response.assert_status(StatusCode::CREATED);

    let body = response.json::<Value>();
    let key = body["key"].as_str().unwrap();
    assert!(key.ends_with(".jpg"));
    assert!(body["url"].as_str().unwrap().contains(key));
    assert!(body["url"].as_str().unwrap().contains("X-Amz-Expires=3600"));
}

#[tokio::test]
async fn uploads_require_a_token() {
    let app = TestApp::new().await;

    app.server
        .post("/v1/upload/presigned-url")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
    app.server
        .post("/v1/upload/images")
        .multipart(image_form(PNG_HEADER.to_vec(), "a.png", "image/png"))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}
