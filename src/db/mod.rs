//! # 데이터베이스 접근 계층 (Data Access Layer)
//!
//! 서비스 계층(services/)에서 이 모듈의 함수를 호출하여 DB 작업을 수행합니다.
//!
//! 단일 쿼리 함수는 `impl SqliteExecutor`를 받으므로 `&pool`과
//! 트랜잭션(`&mut *tx`) 양쪽에서 그대로 쓸 수 있습니다.
//! 목록 조회처럼 쿼리를 두 번 실행하는 함수는 `&SqlitePool`을 받습니다.
//!
//! 각 하위 모듈:
//! - `users`: 사용자, refresh 토큰 해시, 기여도 통계
//! - `verifications`: 가입 전 이메일 인증 코드
//! - `sections`, `questions`, `actions`, `comments`: Q&A 계층 CRUD
//! - `books`: 북 CRUD, 북-질문 관계, 북 좋아요

pub mod actions;
pub mod books;
pub mod comments;
pub mod questions;
pub mod sections;
pub mod users;
pub mod verifications;

use sqlx::migrate::Migrator;

/// `migrations/` 폴더의 SQL을 바이너리에 포함합니다.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");
