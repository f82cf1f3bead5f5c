mod common;

use axum::http::StatusCode;
use common::{TestApp, PASSWORD};
use serde_json::{json, Value};

#[tokio::test]
async fn lists_and_finds_users() {
    let app = TestApp::new().await;
    let kim = app.signup("kim@example.com", "kim").await;
    app.signup("lee@example.com", "lee").await;

    let body = app.server.get("/v1/users").await.json::<Value>();
    assert_eq!(body["users"].as_array().unwrap().len(), 2);

    let response = app.server.get(&format!("/v1/users/{kim}")).await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["user"]["email"], "kim@example.com");

    app.server
        .get("/v1/users/9999")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn changes_profile_fields() {
    let app = TestApp::new().await;
    let (_, token) = app.user("kim@example.com", "kim").await;

    let response = app
        .server
        .patch("/v1/users/nickname")
        .authorization_bearer(&token)
        .json(&json!({ "nickname": "kimchi" }))
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["user"]["nickname"], "kimchi");

    let response = app
        .server
        .patch("/v1/users/position")
        .authorization_bearer(&token)
        .json(&json!({ "position": "developer" }))
        .await;
    assert_eq!(response.json::<Value>()["user"]["position"], "developer");

    app.server
        .patch("/v1/users/affiliation")
        .authorization_bearer(&token)
        .json(&json!({ "affiliation": "  " }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn password_change_checks_confirmation_and_current_password() {
    let app = TestApp::new().await;
    let (_, token) = app.user("kim@example.com", "kim").await;

    app.server
        .patch("/v1/users/password")
        .authorization_bearer(&token)
        .json(&json!({
            "password": PASSWORD,
            "newPassword": "new-password-1",
            "confirmPassword": "new-password-2",
        }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    app.server
        .patch("/v1/users/password")
        .authorization_bearer(&token)
        .json(&json!({
            "password": "not-my-password",
            "newPassword": "new-password-1",
            "confirmPassword": "new-password-1",
        }))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    app.server
        .patch("/v1/users/password")
        .authorization_bearer(&token)
        .json(&json!({
            "password": PASSWORD,
            "newPassword": "new-password-1",
            "confirmPassword": "new-password-1",
        }))
        .await
        .assert_status_ok();

    app.server
        .post("/v1/auth/jwt/login")
        .json(&json!({ "email": "kim@example.com", "password": "new-password-1" }))
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn deleted_user_disappears_but_content_remains() {
    let app = TestApp::new().await;
    let (_, admin) = app.admin("admin@example.com").await;
    let (kim, token) = app.user("kim@example.com", "kim").await;
    let section = app.create_section(&admin, "Network").await;
    let question = app.create_question(&token, section, "What is TCP?").await;

    app.server
        .delete("/v1/users")
        .authorization_bearer(&token)
        .json(&json!({ "password": PASSWORD, "confirmMessage": "탈퇴" }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    app.server
        .delete("/v1/users")
        .authorization_bearer(&token)
        .json(&json!({ "password": "wrong-password", "confirmMessage": "회원 탈퇴를 희망합니다." }))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    app.server
        .delete("/v1/users")
        .authorization_bearer(&token)
        .json(&json!({ "password": PASSWORD, "confirmMessage": "회원 탈퇴를 희망합니다." }))
        .await
        .assert_status_ok();

    app.server
        .get(&format!("/v1/users/{kim}"))
        .await
        .assert_status(StatusCode::NOT_FOUND);
    app.server
        .post("/v1/auth/jwt/login")
        .json(&json!({ "email": "kim@example.com", "password": PASSWORD }))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    let response = app.server.get(&format!("/v1/questions/{question}")).await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["question"]["writer"]["nickname"], "kim");
}

#[tokio::test]
async fn deleted_user_token_cannot_write() {
    let app = TestApp::new().await;
    let (_, admin) = app.admin("admin@example.com").await;
    let (_, token) = app.user("kim@example.com", "kim").await;
    let section = app.create_section(&admin, "Network").await;
    let question = app.create_question(&admin, section, "What is TCP?").await;
    let action = app.create_action(&admin, question, "transport layer").await;
    let book = app.create_book(&admin, "Interview", "public").await;

    app.server
        .delete("/v1/users")
        .authorization_bearer(&token)
        .json(&json!({ "password": PASSWORD, "confirmMessage": "회원 탈퇴를 희망합니다." }))
        .await
        .assert_status_ok();

    let writes = [
        ("/v1/books".to_string(), json!({ "title": "Ghost" })),
        ("/v1/questions".to_string(), json!({ "sectionId": section, "content": "Ghost?" })),
        (
            "/v1/actions".to_string(),
            json!({ "questionId": question, "title": "ghost", "content": "boo" }),
        ),
        ("/v1/comments".to_string(), json!({ "actionId": action, "content": "boo" })),
        (format!("/v1/books/{book}/like"), json!({})),
        (format!("/v1/actions/{action}/like"), json!({})),
    ];
    for (url, body) in writes {
        let response = app.server.post(&url).authorization_bearer(&token).json(&body).await;
        response.assert_status(StatusCode::UNAUTHORIZED);
        assert_eq!(response.json::<Value>()["error"]["message"], "User does not exist.");
    }

    let (likes,): (i64,) = sqlx::query_as(
        "SELECT (SELECT COUNT(*) FROM book_likes) + (SELECT COUNT(*) FROM action_likes)",
    )
    .fetch_one(&app.pool)
    .await
    .unwrap();
    assert_eq!(likes, 0);
}

#[tokio::test]
async fn contribution_ranks_users_by_total() {
    let app = TestApp::new().await;
    let (_, admin) = app.admin("admin@example.com").await;
    let (_, token) = app.user("kim@example.com", "kim").await;
    let section = app.create_section(&admin, "OS").await;
    app.create_question(&token, section, "What is a process?").await;
    app.create_question(&token, section, "What is a thread?").await;

    let body = app
        .server
        .get("/v1/users/contribution?type=created")
        .authorization_bearer(&token)
        .await
        .json::<Value>();
    assert_eq!(body["total"], 2);
    assert_eq!(body["percentile"], 0);

    let body = app
        .server
        .get("/v1/users/contribution?type=created")
        .authorization_bearer(&admin)
        .await
        .json::<Value>();
    assert_eq!(body["total"], 0);
    assert_eq!(body["percentile"], 100);

    app.server
        .get("/v1/users/contribution?type=popularity")
        .authorization_bearer(&token)
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

async fn contribution_of(app: &TestApp, token: &str, kind: &str) -> (i64, i64) {
    let response = app
        .server
        .get(&format!("/v1/users/contribution?type={kind}"))
        .authorization_bearer(token)
        .await;
    response.assert_status_ok();
    let body = response.json::<Value>();
    (body["total"].as_i64().unwrap(), body["percentile"].as_i64().unwrap())
}

#[tokio::test]
async fn contribution_counts_saves_and_likes() {
    let app = TestApp::new().await;
    let (_, admin) = app.admin("admin@example.com").await;
    let (_, kim) = app.user("kim@example.com", "kim").await;
    let (_, lee) = app.user("lee@example.com", "lee").await;
    let section = app.create_section(&admin, "Network").await;

    // kim의 질문을 lee가 북에 저장
    let question = app.create_question(&kim, section, "What is TCP?").await;
    let lee_book = app.create_book(&lee, "Interview", "public").await;
    app.server
        .post(&format!("/v1/books/{lee_book}/questions/{question}"))
        .authorization_bearer(&lee)
        .await
        .assert_status(StatusCode::CREATED);

    // kim의 액션을 lee가 좋아요
    let action = app.create_action(&kim, question, "reliable stream").await;
    app.server
        .post(&format!("/v1/actions/{action}/like"))
        .authorization_bearer(&lee)
        .await
        .assert_status_ok();

    // lee의 북을 kim이 좋아요
    app.server
        .post(&format!("/v1/books/{lee_book}/like"))
        .authorization_bearer(&kim)
        .await
        .assert_status_ok();

    // 세 명 중 1등은 0, 공동 2등은 (2 - 1) / (3 - 1) = 50
    assert_eq!(contribution_of(&app, &kim, "question").await, (1, 0));
    assert_eq!(contribution_of(&app, &lee, "question").await, (0, 50));
    assert_eq!(contribution_of(&app, &kim, "action").await, (1, 0));
    assert_eq!(contribution_of(&app, &admin, "action").await, (0, 50));
    assert_eq!(contribution_of(&app, &lee, "book").await, (1, 0));
    assert_eq!(contribution_of(&app, &kim, "book").await, (0, 50));
}
