//! # 요청 추출기 래퍼
//!
//! axum 기본 추출기는 역직렬화 실패 시 422/400 평문 응답을 돌려줍니다.
//! 아래 래퍼는 같은 추출을 하되 실패를 `AppError::BadRequest`로 바꿔
//! 다른 에러와 같은 JSON 봉투로 응답합니다.
//!
//! ```ignore
//! pub async fn create_book(AppJson(req): AppJson<CreateBookRequest>) { ... }
//! ```

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::AppError;

/// `axum::Json` + JSON 에러 봉투
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// `axum::extract::Query` + JSON 에러 봉투
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct AppQuery<T>(pub T);

/// `axum::extract::Path` + JSON 에러 봉투
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct AppPath<T>(pub T);
