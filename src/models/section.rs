use serde::{Deserialize, Serialize};

use super::Writer;

/// `sections` 행 + 생성자 닉네임(JOIN)
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Section {
    pub id: i64,
    pub subject: String,
    pub description: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    pub creator_id: i64,
    pub creator_nickname: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionResponse {
    pub id: i64,
    pub subject: String,
    pub description: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    pub creator: Writer,
}

impl From<Section> for SectionResponse {
    fn from(section: Section) -> Self {
        Self {
            id: section.id,
            subject: section.subject,
            description: section.description,
            created_at: section.created_at,
            updated_at: section.updated_at,
            creator: Writer {
                id: section.creator_id,
                nickname: section.creator_nickname,
            },
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateSectionRequest {
    pub subject: String,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateSectionSubjectRequest {
    pub subject: String,
}

/// `description`을 생략하거나 null로 보내면 설명을 지웁니다.
#[derive(Debug, Deserialize)]
pub struct UpdateSectionDescriptionRequest {
    pub description: Option<String>,
}
