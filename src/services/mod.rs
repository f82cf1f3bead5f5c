//! # 서비스 계층
//!
//! 존재 확인 → 소유권/권한 확인 → 변경 → 저장 순서로 비즈니스 규칙을 적용합니다.
//! 읽은 뒤 쓰는 작업은 하나의 트랜잭션(`pool.begin()` ... `commit()`)에서 실행합니다.
//!
//! - 도메인: `auth`, `users`, `sections`, `questions`, `actions`, `comments`, `books`, `upload`
//! - 공용: `markdown`(렌더링/새니타이즈), `password`(Argon2, 인증 코드)
//! - 외부 협력자: `mail`(SMTP), `storage`(S3)

pub mod actions;
pub mod auth;
pub mod books;
pub mod comments;
pub mod mail;
pub mod markdown;
pub mod password;
pub mod questions;
pub mod sections;
pub mod storage;
pub mod upload;
pub mod users;
