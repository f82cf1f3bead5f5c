use serde::{Deserialize, Serialize};

use super::Writer;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Comment {
    pub id: i64,
    pub content: String,
    pub created_at: String,
    pub updated_at: String,
    pub action_id: i64,
    pub writer_id: i64,
    pub writer_nickname: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub id: i64,
    pub content: String,
    pub created_at: String,
    pub updated_at: String,
    pub action_id: i64,
    pub writer: Writer,
}

impl From<Comment> for CommentResponse {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id,
            content: comment.content,
            created_at: comment.created_at,
            updated_at: comment.updated_at,
            action_id: comment.action_id,
            writer: Writer {
                id: comment.writer_id,
                nickname: comment.writer_nickname,
            },
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentRequest {
    pub action_id: i64,
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateCommentRequest {
    pub content: String,
}
