use crate::error::AppError;
use crate::models::{ListQuery, Question, QuestionSort, SortField};
use sqlx::{SqliteExecutor, SqlitePool};

pub async fn find_question(
    executor: impl SqliteExecutor<'_>,
    id: i64,
) -> Result<Option<Question>, AppError> {
    let question = sqlx::query_as::<_, Question>(
        r#"
        SELECT q.id, q.content, q.saved, q.created_at, q.updated_at, q.section_id,
               q.writer_id, u.nickname AS writer_nickname
        FROM questions q
        JOIN users u ON u.id = q.writer_id
        WHERE q.id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(executor)
    .await?;

    Ok(question)
}

pub async fn question_exists(executor: impl SqliteExecutor<'_>, id: i64) -> Result<bool, AppError> {
    let found: Option<(i64,)> = sqlx::query_as("SELECT id FROM questions WHERE id = ?")
        .bind(id)
        .fetch_optional(executor)
        .await?;

    Ok(found.is_some())
}

/// 섹션의 질문 목록 (`search`는 본문 부분 일치)
pub async fn list_by_section(
    pool: &SqlitePool,
    section_id: i64,
    query: &ListQuery<QuestionSort>,
) -> Result<(Vec<Question>, i64), AppError> {
    let sql = format!(
        r#"
        SELECT q.id, q.content, q.saved, q.created_at, q.updated_at, q.section_id,
               q.writer_id, u.nickname AS writer_nickname
        FROM questions q
        JOIN users u ON u.id = q.writer_id
        WHERE q.section_id = ? AND (? = '' OR q.content LIKE '%' || ? || '%')
        ORDER BY {column} {order}, q.id {order}
        LIMIT ? OFFSET ?
        "#,
        column = query.sort.column(),
        order = query.order.as_sql()
    );

    let questions = sqlx::query_as::<_, Question>(&sql)
        .bind(section_id)
        .bind(&query.search)
        .bind(&query.search)
        .bind(query.limit)
        .bind(query.offset())
        .fetch_all(pool)
        .await?;

    let (total,): (i64,) = sqlx::query_as(
        r#"
        SELECT COUNT(*) FROM questions q
        WHERE q.section_id = ? AND (? = '' OR q.content LIKE '%' || ? || '%')
        "#,
    )
    .bind(section_id)
    .bind(&query.search)
    .bind(&query.search)
    .fetch_one(pool)
    .await?;

    Ok((questions, total))
}

/// 북에 저장된 질문 목록
pub async fn list_by_book(
    pool: &SqlitePool,
    book_id: i64,
    query: &ListQuery<QuestionSort>,
) -> Result<(Vec<Question>, i64), AppError> {
    let sql = format!(
        r#"
        SELECT q.id, q.content, q.saved, q.created_at, q.updated_at, q.section_id,
               q.writer_id, u.nickname AS writer_nickname
        FROM book_questions bq
        JOIN questions q ON q.id = bq.question_id
        JOIN users u ON u.id = q.writer_id
        WHERE bq.book_id = ? AND (? = '' OR q.content LIKE '%' || ? || '%')
        ORDER BY {column} {order}, q.id {order}
        LIMIT ? OFFSET ?
        "#,
        column = query.sort.column(),
        order = query.order.as_sql()
    );

    let questions = sqlx::query_as::<_, Question>(&sql)
        .bind(book_id)
        .bind(&query.search)
        .bind(&query.search)
        .bind(query.limit)
        .bind(query.offset())
        .fetch_all(pool)
        .await?;

    let (total,): (i64,) = sqlx::query_as(
        r#"
        SELECT COUNT(*)
        FROM book_questions bq
        JOIN questions q ON q.id = bq.question_id
        WHERE bq.book_id = ? AND (? = '' OR q.content LIKE '%' || ? || '%')
        "#,
    )
    .bind(book_id)
    .bind(&query.search)
    .bind(&query.search)
    .fetch_one(pool)
    .await?;

    Ok((questions, total))
}

pub async fn create_question(
    executor: impl SqliteExecutor<'_>,
    writer_id: i64,
    section_id: i64,
    content: &str,
) -> Result<i64, AppError> {
    let result = sqlx::query(
        "INSERT INTO questions (content, writer_id, section_id) VALUES (?, ?, ?)",
    )
    .bind(content)
    .bind(writer_id)
    .bind(section_id)
    .execute(executor)
    .await?;

    Ok(result.last_insert_rowid())
}

pub async fn update_content(
    executor: impl SqliteExecutor<'_>,
    id: i64,
    content: &str,
) -> Result<bool, AppError> {
    let result = sqlx::query(
        r#"
        UPDATE questions
        SET content = ?, updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
        WHERE id = ?
        "#,
    )
    .bind(content)
    .bind(id)
    .execute(executor)
    .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn delete_question(executor: impl SqliteExecutor<'_>, id: i64) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM questions WHERE id = ?")
        .bind(id)
        .execute(executor)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// `saved` 카운터를 `delta`만큼 더합니다 (북에 저장 +1, 제거 -1).
pub async fn adjust_saved(
    executor: impl SqliteExecutor<'_>,
    id: i64,
    delta: i64,
) -> Result<(), AppError> {
    sqlx::query("UPDATE questions SET saved = saved + ? WHERE id = ?")
        .bind(delta)
        .bind(id)
        .execute(executor)
        .await?;

    Ok(())
}
