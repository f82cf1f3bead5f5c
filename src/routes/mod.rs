//! # 라우트 핸들러 모듈
//!
//! 핸들러는 입력을 검증하고 서비스 계층을 호출한 뒤,
//! 결과를 `{ "message": ..., <payload> }` 형태의 JSON으로 감쌉니다.
//!
//! 각 하위 모듈:
//! - `auth`: 인증 코드 발송/확인, 회원가입, 로그인, 토큰 갱신, 로그아웃
//! - `users`: 내 정보, 프로필 수정, 탈퇴, 기여도, 내 북/좋아요한 북
//! - `sections`, `questions`, `actions`, `comments`, `books`: Q&A 도메인
//! - `upload`: 이미지 업로드, presigned URL
//! - `health`: 헬스체크
//! - `validate`: 요청 본문 검증 헬퍼

pub mod actions;
pub mod auth;
pub mod books;
pub mod comments;
pub mod extract;
pub mod health;
pub mod questions;
pub mod sections;
pub mod upload;
pub mod users;
pub mod validate;
