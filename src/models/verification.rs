use serde::Serialize;

/// 회원가입 전 이메일 인증 레코드. 가입이 완료되면 삭제됩니다.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Verification {
    pub id: i64,
    pub email: String,
    pub verification_code: String,
    pub verified: bool,
    pub created_at: String,
}
