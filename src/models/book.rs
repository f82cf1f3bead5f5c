use serde::{Deserialize, Serialize};

use super::Writer;

/// 북 공개 범위. DB에는 소문자 문자열로 저장됩니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Public,
    Private,
}

/// `books` 행 + 발행자 닉네임(JOIN)
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Book {
    pub id: i64,
    pub visibility: Visibility,
    pub title: String,
    pub description: Option<String>,
    pub like_count: i64,
    pub created_at: String,
    pub updated_at: String,
    pub publisher_id: i64,
    pub publisher_nickname: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookResponse {
    pub id: i64,
    pub visibility: Visibility,
    pub title: String,
    pub description: Option<String>,
    pub like_count: i64,
    pub created_at: String,
    pub updated_at: String,
    pub publisher: Writer,
}

impl From<Book> for BookResponse {
    fn from(book: Book) -> Self {
        Self {
            id: book.id,
            visibility: book.visibility,
            title: book.title,
            description: book.description,
            like_count: book.like_count,
            created_at: book.created_at,
            updated_at: book.updated_at,
            publisher: Writer {
                id: book.publisher_id,
                nickname: book.publisher_nickname,
            },
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateBookRequest {
    #[serde(default)]
    pub visibility: Visibility,
    pub title: String,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateBookRequest {
    pub title: String,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateBookVisibilityRequest {
    pub visibility: Visibility,
}
