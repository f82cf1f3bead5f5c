//! # SCS 백엔드
//!
//! 섹션 → 질문 → 액션(답변) → 댓글 구조의 Q&A 서비스와,
//! 질문을 모아 두는 북(Book) 기능을 제공하는 API 서버입니다.
//!
//! 계층 구조:
//! - `routes`: HTTP 핸들러 (입력 검증, 응답 봉투)
//! - `services`: 비즈니스 규칙 (존재/소유권 확인, 트랜잭션)
//! - `db`: SQL 쿼리
//!
//! `main.rs`는 설정을 읽고 `AppState`를 만든 뒤 [`app`]으로 라우터를 조립합니다.
//! 통합 테스트도 같은 함수로 라우터를 만듭니다.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;

use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    routing::{get, patch, post},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::routes::*;
use crate::services::upload::MAX_IMAGE_BYTES;
pub use crate::state::AppState;

/// multipart 경계와 헤더를 위한 여유분
const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// `/v1` 아래의 모든 API 라우트
fn api_routes() -> Router<AppState> {
    let auth_routes = Router::new()
        .route("/auth/email/verification-code", post(auth::send_verification_code))
        .route("/auth/email/verify-code", post(auth::verify_code))
        .route("/auth/signup", post(auth::signup))
        .route("/auth/jwt/login", post(auth::login))
        .route("/auth/jwt/refresh", post(auth::refresh))
        .route("/auth/jwt/logout", post(auth::logout));

    // 고정 경로(/users/me 등)가 /users/{id}보다 우선 매칭됩니다.
    let user_routes = Router::new()
        .route("/users", get(users::list_users).delete(users::delete_user))
        .route("/users/me", get(users::get_me))
        .route("/users/contribution", get(users::get_contribution))
        .route("/users/books", get(users::list_my_books))
        .route("/users/books/liked", get(users::list_liked_books))
        .route("/users/password", patch(users::change_password))
        .route("/users/nickname", patch(users::change_nickname))
        .route("/users/affiliation", patch(users::change_affiliation))
        .route("/users/position", patch(users::change_position))
        .route("/users/{id}", get(users::get_user));

    let section_routes = Router::new()
        .route("/sections", get(sections::list_sections).post(sections::create_section))
        .route("/sections/{id}", get(sections::get_section).delete(sections::delete_section))
        .route("/sections/{id}/subject", patch(sections::update_subject))
        .route("/sections/{id}/description", patch(sections::update_description))
        .route("/sections/{id}/questions", get(sections::list_questions));

    let question_routes = Router::new()
        .route("/questions", post(questions::create_question))
        .route(
            "/questions/{id}",
            get(questions::get_question)
                .patch(questions::update_question)
                .delete(questions::delete_question),
        )
        .route("/questions/{id}/actions", get(questions::list_actions));

    let action_routes = Router::new()
        .route("/actions", post(actions::create_action))
        .route(
            "/actions/{id}",
            get(actions::get_action)
                .patch(actions::update_action)
                .delete(actions::delete_action),
        )
        .route("/actions/{id}/raw-content", get(actions::get_raw_content))
        .route("/actions/{id}/like", get(actions::get_like).post(actions::toggle_like))
        .route("/actions/{id}/comments", get(actions::list_comments));

    let comment_routes = Router::new()
        .route("/comments", post(comments::create_comment))
        .route(
            "/comments/{id}",
            patch(comments::update_comment).delete(comments::delete_comment),
        );

    let book_routes = Router::new()
        .route("/books", get(books::list_books).post(books::create_book))
        .route("/books/{id}", get(books::get_book).delete(books::delete_book))
        .route("/books/{id}/title", patch(books::update_title))
        .route("/books/{id}/visibility", patch(books::update_visibility))
        .route("/books/{id}/like", get(books::get_like).post(books::toggle_like))
        .route("/books/{id}/questions", get(books::list_questions))
        .route(
            "/books/{id}/questions/{question_id}",
            post(books::save_question).delete(books::remove_question),
        );

    let upload_routes = Router::new()
        .route(
            "/upload/images",
            post(upload::upload_image)
                .layer(DefaultBodyLimit::max(MAX_IMAGE_BYTES + MULTIPART_OVERHEAD)),
        )
        .route("/upload/presigned-url", post(upload::presigned_url));

    Router::new()
        .merge(auth_routes)
        .merge(user_routes)
        .merge(section_routes)
        .merge(question_routes)
        .merge(action_routes)
        .merge(comment_routes)
        .merge(book_routes)
        .merge(upload_routes)
        .route("/health", get(health::health_check))
}

/// 설정된 출처만 허용합니다. 파싱할 수 없는 값은 건너뜁니다.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

/// 전체 애플리케이션 라우터
pub fn app(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors_origins);

    Router::new()
        .nest("/v1", api_routes())
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
