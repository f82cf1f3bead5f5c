//! # 데이터 모델 모듈
//!
//! 각 하위 모듈은 특정 도메인의 데이터 타입을 담당합니다:
//! - `user`: 사용자, 회원가입/로그인 요청
//! - `verification`: 가입 전 이메일 인증 레코드
//! - `section`, `question`, `action`, `comment`: Q&A 계층
//! - `book`: 질문 모음(북)
//! - `query`: 목록 API의 페이지네이션/정렬 쿼리 파라미터
//!
//! DB 행 구조체(`FromRow`)와 응답 구조체를 분리해 두고,
//! 작성자 정보처럼 JOIN으로 가져온 평평한 컬럼은 `From` 구현에서 중첩 객체로 바꿉니다.

pub mod action;
pub mod book;
pub mod comment;
pub mod query;
pub mod question;
pub mod section;
pub mod user;
pub mod verification;

pub use action::*;
pub use book::*;
pub use comment::*;
pub use query::*;
pub use question::*;
pub use section::*;
pub use user::*;
pub use verification::*;
