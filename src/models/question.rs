use serde::{Deserialize, Serialize};

use super::Writer;

/// `questions` 행 + 작성자 닉네임(JOIN)
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Question {
    pub id: i64,
    pub content: String,
    /// 이 질문을 담고 있는 북의 수
    pub saved: i64,
    pub created_at: String,
    pub updated_at: String,
    pub section_id: i64,
    pub writer_id: i64,
    pub writer_nickname: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionResponse {
    pub id: i64,
    pub content: String,
    pub saved: i64,
    pub created_at: String,
    pub updated_at: String,
    pub section_id: i64,
    pub writer: Writer,
}

impl From<Question> for QuestionResponse {
    fn from(question: Question) -> Self {
        Self {
            id: question.id,
            content: question.content,
            saved: question.saved,
            created_at: question.created_at,
            updated_at: question.updated_at,
            section_id: question.section_id,
            writer: Writer {
                id: question.writer_id,
                nickname: question.writer_nickname,
            },
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuestionRequest {
    pub section_id: i64,
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateQuestionRequest {
    pub content: String,
}
