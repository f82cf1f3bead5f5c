use serde::{Deserialize, Serialize};

/// `users` 테이블의 한 행. 탈퇴한(soft delete) 사용자는 조회 쿼리에서 제외됩니다.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub nickname: String,
    pub affiliation: String,
    pub position: String,
    #[serde(skip_serializing)]
    pub refresh_token_hash: Option<String>,
    pub role: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: i64,
    pub email: String,
    pub nickname: String,
    pub affiliation: String,
    pub position: String,
    pub role: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            nickname: user.nickname,
            affiliation: user.affiliation,
            position: user.position,
            role: user.role,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// 질문/액션/댓글 작성자, 섹션 생성자, 북 발행자로 응답에 포함되는 요약 정보
#[derive(Debug, Clone, Serialize)]
pub struct Writer {
    pub id: i64,
    pub nickname: String,
}

#[derive(Debug, Deserialize)]
pub struct EmailRequest {
    pub email: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyCodeRequest {
    pub email: String,
    pub verification_code: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub nickname: String,
    pub affiliation: String,
    pub position: String,
    pub verification_code: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub password: String,
    pub new_password: String,
    pub confirm_password: String,
}

#[derive(Debug, Deserialize)]
pub struct ChangeNicknameRequest {
    pub nickname: String,
}

#[derive(Debug, Deserialize)]
pub struct ChangeAffiliationRequest {
    pub affiliation: String,
}

#[derive(Debug, Deserialize)]
pub struct ChangePositionRequest {
    pub position: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteUserRequest {
    pub password: String,
    pub confirm_message: String,
}

/// 수정 가능한 프로필 항목. 각 항목은 고정된 컬럼 이름으로만 매핑됩니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileField {
    Nickname,
    Affiliation,
    Position,
}

impl ProfileField {
    pub fn column(self) -> &'static str {
        match self {
            ProfileField::Nickname => "nickname",
            ProfileField::Affiliation => "affiliation",
            ProfileField::Position => "position",
        }
    }
}

/// 기여도 종류
/// - `created`: 작성한 질문 + 액션 + 북 수
/// - `question`: 내 질문이 북에 저장된 횟수
/// - `action`: 내 액션이 받은 좋아요 수
/// - `book`: 내 북이 받은 좋아요 수
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContributionType {
    Created,
    Question,
    Action,
    Book,
}

#[derive(Debug, Deserialize)]
pub struct ContributionQuery {
    #[serde(rename = "type")]
    pub kind: ContributionType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Contribution {
    pub total: i64,
    /// 상위 몇 %인지 (0 = 1등)
    pub percentile: i64,
}
