//! # 북 데이터베이스 쿼리 모듈
//!
//! ## 테이블 구조
//! - `books`: 북 엔티티 (공개 범위, 제목, 설명, 좋아요 수)
//! - `book_questions`: 북과 질문의 다대다(N:M) 관계 테이블
//! - `book_likes`: 북 좋아요 (북, 사용자) 쌍

use crate::error::AppError;
use crate::models::{Book, BookSort, ListQuery, SortField, Visibility};
use sqlx::{SqliteExecutor, SqlitePool};

/// 북 목록의 조회 범위
#[derive(Debug, Clone, Copy)]
pub enum BookScope {
    /// 공개 북 전체
    Public,
    /// 특정 사용자가 발행한 북 (비공개 포함)
    PublishedBy(i64),
    /// 특정 사용자가 좋아요한 북 중 공개이거나 본인이 발행한 것
    LikedBy(i64),
}

impl BookScope {
    fn from_where(self) -> &'static str {
        match self {
            BookScope::Public => "FROM books b JOIN users u ON u.id = b.publisher_id
                WHERE b.visibility = 'public'",
            BookScope::PublishedBy(_) => "FROM books b JOIN users u ON u.id = b.publisher_id
                WHERE b.publisher_id = ?",
            BookScope::LikedBy(_) => "FROM book_likes bl
                JOIN books b ON b.id = bl.book_id
                JOIN users u ON u.id = b.publisher_id
                WHERE bl.user_id = ? AND (b.visibility = 'public' OR b.publisher_id = ?)",
        }
    }

    fn binds(self) -> Vec<i64> {
        match self {
            BookScope::Public => Vec::new(),
            BookScope::PublishedBy(user_id) => vec![user_id],
            BookScope::LikedBy(user_id) => vec![user_id, user_id],
        }
    }
}

/// 북 목록 (`search`는 제목 부분 일치)
pub async fn list_books(
    pool: &SqlitePool,
    scope: BookScope,
    query: &ListQuery<BookSort>,
) -> Result<(Vec<Book>, i64), AppError> {
    let sql = format!(
        r#"
        SELECT b.id, b.visibility, b.title, b.description, b.like_count,
               b.created_at, b.updated_at, b.publisher_id, u.nickname AS publisher_nickname
        {from_where} AND (? = '' OR b.title LIKE '%' || ? || '%')
        ORDER BY {column} {order}, b.id {order}
        LIMIT ? OFFSET ?
        "#,
        from_where = scope.from_where(),
        column = query.sort.column(),
        order = query.order.as_sql()
    );

    let mut books_query = sqlx::query_as::<_, Book>(&sql);
    for user_id in scope.binds() {
        books_query = books_query.bind(user_id);
    }
    let books = books_query
        .bind(&query.search)
        .bind(&query.search)
        .bind(query.limit)
        .bind(query.offset())
        .fetch_all(pool)
        .await?;

    let count_sql = format!(
        "SELECT COUNT(*) {} AND (? = '' OR b.title LIKE '%' || ? || '%')",
        scope.from_where()
    );
    let mut count_query = sqlx::query_as::<_, (i64,)>(&count_sql);
    for user_id in scope.binds() {
        count_query = count_query.bind(user_id);
    }
    let (total,) = count_query
        .bind(&query.search)
        .bind(&query.search)
        .fetch_one(pool)
        .await?;

    Ok((books, total))
}

pub async fn find_book(executor: impl SqliteExecutor<'_>, id: i64) -> Result<Option<Book>, AppError> {
    let book = sqlx::query_as::<_, Book>(
        r#"
        SELECT b.id, b.visibility, b.title, b.description, b.like_count,
               b.created_at, b.updated_at, b.publisher_id, u.nickname AS publisher_nickname
        FROM books b
        JOIN users u ON u.id = b.publisher_id
        WHERE b.id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(executor)
    .await?;

    Ok(book)
}

pub async fn create_book(
    executor: impl SqliteExecutor<'_>,
    publisher_id: i64,
    visibility: Visibility,
    title: &str,
    description: Option<&str>,
) -> Result<i64, AppError> {
    let result = sqlx::query(
        "INSERT INTO books (visibility, title, description, publisher_id) VALUES (?, ?, ?, ?)",
    )
    .bind(visibility)
    .bind(title)
    .bind(description)
    .bind(publisher_id)
    .execute(executor)
    .await?;

    Ok(result.last_insert_rowid())
}

pub async fn update_title(
    executor: impl SqliteExecutor<'_>,
    id: i64,
    title: &str,
    description: Option<&str>,
) -> Result<(), AppError> {
    sqlx::query(
        r#"
        UPDATE books
        SET title = ?, description = ?, updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
        WHERE id = ?
        "#,
    )
    .bind(title)
    .bind(description)
    .bind(id)
    .execute(executor)
    .await?;

    Ok(())
}

pub async fn update_visibility(
    executor: impl SqliteExecutor<'_>,
    id: i64,
    visibility: Visibility,
) -> Result<(), AppError> {
    sqlx::query(
        r#"
        UPDATE books
        SET visibility = ?, updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
        WHERE id = ?
        "#,
    )
    .bind(visibility)
    .bind(id)
    .execute(executor)
    .await?;

    Ok(())
}

/// 북에 담긴 모든 질문의 `saved`를 1씩 줄입니다. 북을 지우기 전에 호출해야 합니다.
pub async fn release_saved_questions(
    executor: impl SqliteExecutor<'_>,
    book_id: i64,
) -> Result<u64, AppError> {
    let result = sqlx::query(
        r#"
        UPDATE questions
        SET saved = saved - 1
        WHERE id IN (SELECT question_id FROM book_questions WHERE book_id = ?)
        "#,
    )
    .bind(book_id)
    .execute(executor)
    .await?;

    Ok(result.rows_affected())
}

pub async fn delete_book(executor: impl SqliteExecutor<'_>, id: i64) -> Result<(), AppError> {
    sqlx::query("DELETE FROM books WHERE id = ?")
        .bind(id)
        .execute(executor)
        .await?;

    Ok(())
}

pub async fn contains_question(
    executor: impl SqliteExecutor<'_>,
    book_id: i64,
    question_id: i64,
) -> Result<bool, AppError> {
    let found: Option<(i64,)> = sqlx::query_as(
        "SELECT book_id FROM book_questions WHERE book_id = ? AND question_id = ?",
    )
    .bind(book_id)
    .bind(question_id)
    .fetch_optional(executor)
    .await?;

    Ok(found.is_some())
}

pub async fn add_question(
    executor: impl SqliteExecutor<'_>,
    book_id: i64,
    question_id: i64,
) -> Result<(), AppError> {
    sqlx::query("INSERT INTO book_questions (book_id, question_id) VALUES (?, ?)")
        .bind(book_id)
        .bind(question_id)
        .execute(executor)
        .await?;

    Ok(())
}

pub async fn remove_question(
    executor: impl SqliteExecutor<'_>,
    book_id: i64,
    question_id: i64,
) -> Result<(), AppError> {
    sqlx::query("DELETE FROM book_questions WHERE book_id = ? AND question_id = ?")
        .bind(book_id)
        .bind(question_id)
        .execute(executor)
        .await?;

    Ok(())
}

pub async fn has_liked(
    executor: impl SqliteExecutor<'_>,
    book_id: i64,
    user_id: i64,
) -> Result<bool, AppError> {
    let found: Option<(i64,)> =
        sqlx::query_as("SELECT book_id FROM book_likes WHERE book_id = ? AND user_id = ?")
            .bind(book_id)
            .bind(user_id)
            .fetch_optional(executor)
            .await?;

    Ok(found.is_some())
}

pub async fn add_like(
    executor: impl SqliteExecutor<'_>,
    book_id: i64,
    user_id: i64,
) -> Result<(), AppError> {
    sqlx::query("INSERT INTO book_likes (book_id, user_id) VALUES (?, ?)")
        .bind(book_id)
        .bind(user_id)
        .execute(executor)
        .await?;

    Ok(())
}

pub async fn remove_like(
    executor: impl SqliteExecutor<'_>,
    book_id: i64,
    user_id: i64,
) -> Result<(), AppError> {
    sqlx::query("DELETE FROM book_likes WHERE book_id = ? AND user_id = ?")
        .bind(book_id)
        .bind(user_id)
        .execute(executor)
        .await?;

    Ok(())
}

pub async fn adjust_like_count(
    executor: impl SqliteExecutor<'_>,
    id: i64,
    delta: i64,
) -> Result<(), AppError> {
    sqlx::query("UPDATE books SET like_count = like_count + ? WHERE id = ?")
        .bind(delta)
        .bind(id)
        .execute(executor)
        .await?;

    Ok(())
}

pub async fn like_count(executor: impl SqliteExecutor<'_>, id: i64) -> Result<i64, AppError> {
    let (count,): (i64,) = sqlx::query_as("SELECT like_count FROM books WHERE id = ?")
        .bind(id)
        .fetch_one(executor)
        .await?;

    Ok(count)
}
