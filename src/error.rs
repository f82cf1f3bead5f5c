//! # 에러 처리 모듈
//!
//! 서비스 계층에서 발생하는 모든 에러를 `AppError` 하나로 모읍니다.
//! 핸들러가 `Result<T, AppError>`를 반환하면 `IntoResponse` 구현이
//! 상태 코드와 JSON 에러 본문으로 바꿔 줍니다.
//!
//! ```json
//! { "error": { "code": "not_found", "message": "Question with id 3 has not been found." } }
//! ```

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// 애플리케이션에서 발생할 수 있는 모든 에러 종류
///
/// 클라이언트 에러(4xx)는 메시지를 그대로 노출하고,
/// 서버 에러(5xx)는 로그에만 상세 내용을 남깁니다.
#[derive(Debug, Error)]
pub enum AppError {
    /// 요청한 엔티티가 없음 (HTTP 404)
    #[error("{0}")]
    NotFound(String),

    /// 입력값 검증 실패, 확인 필드 불일치 (HTTP 400)
    #[error("{0}")]
    BadRequest(String),

    /// 인증 실패: 잘못된 자격 증명, 토큰 없음 (HTTP 401)
    #[error("{0}")]
    Unauthorized(String),

    /// 인증은 됐지만 작성자/소유자/관리자가 아님 (HTTP 403)
    #[error("{0}")]
    Forbidden(String),

    /// 중복 이메일, 이미 저장된 질문 등 (HTTP 409)
    #[error("{0}")]
    Conflict(String),

    /// 메일, 새니타이저, S3 등 외부 협력자 실패 (HTTP 500)
    #[error("Internal error: {0}")]
    Internal(String),

    /// 데이터베이스 오류 (HTTP 500)
    /// `#[from]` 덕분에 sqlx 호출 뒤에 `?`만 붙이면 자동 변환됩니다.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl AppError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// 응답에 쓰이는 HTTP 상태 코드
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Internal(_) | AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// 추출기 실패는 모두 입력값 문제이므로 400으로 통일합니다.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (code, message) = match self {
            AppError::NotFound(msg) => ("not_found", msg),
            AppError::BadRequest(msg) => ("bad_request", msg),
            AppError::Unauthorized(msg) => ("unauthorized", msg),
            AppError::Forbidden(msg) => ("forbidden", msg),
            AppError::Conflict(msg) => ("conflict", msg),
            AppError::Internal(msg) => {
                // 내부 에러는 로그에만 기록하고 클라이언트에는 일반 메시지를 돌려줍니다.
                tracing::error!("Internal error: {}", msg);
                ("internal_error", "An internal error occurred".to_string())
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {}", e);
                ("database_error", "A database error occurred".to_string())
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_variants_to_status_codes() {
        assert_eq!(AppError::not_found("x").status(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::forbidden("x").status(), StatusCode::FORBIDDEN);
        assert_eq!(AppError::conflict("x").status(), StatusCode::CONFLICT);
        assert_eq!(
            AppError::Database(sqlx::Error::RowNotFound).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn client_errors_keep_their_message() {
        let err = AppError::unauthorized("The token is not valid.");
        assert_eq!(err.to_string(), "The token is not valid.");
    }
}
