mod common;

use axum::http::StatusCode;
use common::TestApp;
use serde_json::{json, Value};

#[tokio::test]
async fn creating_a_question_needs_an_existing_section() {
    let app = TestApp::new().await;
    let (_, token) = app.user("kim@example.com", "kim").await;

    let response = app
        .server
        .post("/v1/questions")
        .authorization_bearer(&token)
        .json(&json!({ "sectionId": 42, "content": "Orphan?" }))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(
        response.json::<Value>()["error"]["message"],
        "Section with id 42 has not been found."
    );
}

#[tokio::test]
async fn only_admins_edit_or_delete_questions() {
    let app = TestApp::new().await;
    let (_, admin) = app.admin("admin@example.com").await;
    let (_, token) = app.user("kim@example.com", "kim").await;
    let section = app.create_section(&admin, "Network").await;
    let question = app.create_question(&token, section, "What is DNS?").await;

    app.server
        .patch(&format!("/v1/questions/{question}"))
        .authorization_bearer(&token)
        .json(&json!({ "content": "What is DNS really?" }))
        .await
        .assert_status(StatusCode::FORBIDDEN);

    let response = app
        .server
        .patch(&format!("/v1/questions/{question}"))
        .authorization_bearer(&admin)
        .json(&json!({ "content": "How does DNS resolve names?" }))
        .await;
    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["question"]["content"], "How does DNS resolve names?");
    assert_eq!(body["question"]["saved"], 0);

    app.server
        .delete(&format!("/v1/questions/{question}"))
        .authorization_bearer(&admin)
        .await
        .assert_status_ok();
    app.server
        .delete(&format!("/v1/questions/{question}"))
        .authorization_bearer(&admin)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}
