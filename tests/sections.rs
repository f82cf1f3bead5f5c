mod common;

use axum::http::StatusCode;
use common::TestApp;
use serde_json::{json, Value};

#[tokio::test]
async fn only_admins_manage_sections() {
    let app = TestApp::new().await;
    let (_, token) = app.user("kim@example.com", "kim").await;
    let (_, admin) = app.admin("admin@example.com").await;

    let response = app
        .server
        .post("/v1/sections")
        .authorization_bearer(&token)
        .json(&json!({ "subject": "Network" }))
        .await;
    response.assert_status(StatusCode::FORBIDDEN);

    let id = app.create_section(&admin, "Network").await;

    let response = app
        .server
        .patch(&format!("/v1/sections/{id}/subject"))
        .authorization_bearer(&admin)
        .json(&json!({ "subject": "Computer Network" }))
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["section"]["subject"], "Computer Network");

    let response = app
        .server
        .patch(&format!("/v1/sections/{id}/description"))
        .authorization_bearer(&admin)
        .json(&json!({ "description": null }))
        .await;
    assert!(response.json::<Value>()["section"]["description"].is_null());

    app.server
        .patch("/v1/sections/9999/subject")
        .authorization_bearer(&admin)
        .json(&json!({ "subject": "x" }))
        .await
        .assert_status(StatusCode::NOT_FOUND);

    app.server
        .delete(&format!("/v1/sections/{id}"))
        .authorization_bearer(&token)
        .await
        .assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn lists_sections_sorted() {
    let app = TestApp::new().await;
    let (_, admin) = app.admin("admin@example.com").await;
    app.create_section(&admin, "Operating System").await;
    app.create_section(&admin, "Algorithm").await;
    app.create_section(&admin, "Network").await;

    let body = app.server.get("/v1/sections").await.json::<Value>();
    let subjects: Vec<&str> = body["sections"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["subject"].as_str().unwrap())
        .collect();
    assert_eq!(subjects, ["Algorithm", "Network", "Operating System"]);
    assert_eq!(body["sections"][0]["creator"]["nickname"], "admin");

    let body = app
        .server
        .get("/v1/sections?sort=id&order=DESC")
        .await
        .json::<Value>();
    assert_eq!(body["sections"][0]["subject"], "Network");

    app.server
        .get("/v1/sections?sort=createdAt")
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn deleting_a_section_removes_its_questions() {
    let app = TestApp::new().await;
    let (_, admin) = app.admin("admin@example.com").await;
    let section = app.create_section(&admin, "Database").await;
    let question = app.create_question(&admin, section, "What is an index?").await;

    app.server
        .delete(&format!("/v1/sections/{section}"))
        .authorization_bearer(&admin)
        .await
        .assert_status_ok();

    app.server
        .get(&format!("/v1/sections/{section}"))
        .await
        .assert_status(StatusCode::NOT_FOUND);
    app.server
        .get(&format!("/v1/questions/{question}"))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn paginates_and_searches_section_questions() {
    let app = TestApp::new().await;
    let (_, admin) = app.admin("admin@example.com").await;
    let (_, token) = app.user("kim@example.com", "kim").await;
    let section = app.create_section(&admin, "Network").await;
    for content in ["What is TCP?", "What is UDP?", "TCP vs UDP"] {
        app.create_question(&token, section, content).await;
    }

    let body = app
        .server
        .get(&format!("/v1/sections/{section}/questions?page=2&limit=2"))
        .await
        .json::<Value>();
    assert_eq!(body["total"], 3);
    assert_eq!(body["questions"].as_array().unwrap().len(), 1);

    let body = app
        .server
        .get(&format!("/v1/sections/{section}/questions?search=TCP&order=ASC"))
        .await
        .json::<Value>();
    assert_eq!(body["total"], 2);
    assert_eq!(body["questions"][0]["content"], "What is TCP?");
    assert_eq!(body["questions"][0]["writer"]["nickname"], "kim");

    app.server
        .get(&format!("/v1/sections/{section}/questions?page=0"))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
    app.server
        .get(&format!("/v1/sections/{section}/questions?sort=likeCount"))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
    app.server
        .get("/v1/sections/9999/questions")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}
