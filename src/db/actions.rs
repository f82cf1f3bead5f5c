use crate::error::AppError;
use crate::models::{Action, ActionSort, ListQuery, SortField};
use sqlx::{SqliteExecutor, SqlitePool};

pub async fn find_action(
    executor: impl SqliteExecutor<'_>,
    id: i64,
) -> Result<Option<Action>, AppError> {
    let action = sqlx::query_as::<_, Action>(
        r#"
        SELECT a.id, a.title, a.content, a.raw_content, a.image_urls, a.like_count,
               a.created_at, a.updated_at, a.question_id,
               a.writer_id, u.nickname AS writer_nickname
        FROM actions a
        JOIN users u ON u.id = a.writer_id
        WHERE a.id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(executor)
    .await?;

    Ok(action)
}

/// 질문의 액션 목록 (`search`는 제목 부분 일치)
pub async fn list_by_question(
    pool: &SqlitePool,
    question_id: i64,
    query: &ListQuery<ActionSort>,
) -> Result<(Vec<Action>, i64), AppError> {
    let sql = format!(
        r#"
        SELECT a.id, a.title, a.content, a.raw_content, a.image_urls, a.like_count,
               a.created_at, a.updated_at, a.question_id,
               a.writer_id, u.nickname AS writer_nickname
        FROM actions a
        JOIN users u ON u.id = a.writer_id
        WHERE a.question_id = ? AND (? = '' OR a.title LIKE '%' || ? || '%')
        ORDER BY {column} {order}, a.id {order}
        LIMIT ? OFFSET ?
        "#,
        column = query.sort.column(),
        order = query.order.as_sql()
    );

    let actions = sqlx::query_as::<_, Action>(&sql)
        .bind(question_id)
        .bind(&query.search)
        .bind(&query.search)
        .bind(query.limit)
        .bind(query.offset())
        .fetch_all(pool)
        .await?;

    let (total,): (i64,) = sqlx::query_as(
        r#"
        SELECT COUNT(*) FROM actions a
        WHERE a.question_id = ? AND (? = '' OR a.title LIKE '%' || ? || '%')
        "#,
    )
    .bind(question_id)
    .bind(&query.search)
    .bind(&query.search)
    .fetch_one(pool)
    .await?;

    Ok((actions, total))
}

/// 렌더링이 끝난 본문을 받습니다. `image_urls`는 쉼표로 이어 붙인 값(없으면 NULL).
pub struct ActionContent<'a> {
    pub title: &'a str,
    pub html: &'a str,
    pub raw: &'a str,
    pub image_urls: Option<&'a str>,
}

pub async fn create_action(
    executor: impl SqliteExecutor<'_>,
    writer_id: i64,
    question_id: i64,
    content: &ActionContent<'_>,
) -> Result<i64, AppError> {
    let result = sqlx::query(
        r#"
        INSERT INTO actions (title, content, raw_content, image_urls, writer_id, question_id)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(content.title)
    .bind(content.html)
    .bind(content.raw)
    .bind(content.image_urls)
    .bind(writer_id)
    .bind(question_id)
    .execute(executor)
    .await?;

    Ok(result.last_insert_rowid())
}

pub async fn update_action(
    executor: impl SqliteExecutor<'_>,
    id: i64,
    content: &ActionContent<'_>,
) -> Result<(), AppError> {
    sqlx::query(
        r#"
        UPDATE actions
        SET title = ?, content = ?, raw_content = ?, image_urls = ?,
            updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
        WHERE id = ?
        "#,
    )
    .bind(content.title)
    .bind(content.html)
    .bind(content.raw)
    .bind(content.image_urls)
    .bind(id)
    .execute(executor)
    .await?;

    Ok(())
}

pub async fn delete_action(executor: impl SqliteExecutor<'_>, id: i64) -> Result<(), AppError> {
    sqlx::query("DELETE FROM actions WHERE id = ?")
        .bind(id)
        .execute(executor)
        .await?;

    Ok(())
}

pub async fn has_liked(
    executor: impl SqliteExecutor<'_>,
    action_id: i64,
    user_id: i64,
) -> Result<bool, AppError> {
    let found: Option<(i64,)> =
        sqlx::query_as("SELECT action_id FROM action_likes WHERE action_id = ? AND user_id = ?")
            .bind(action_id)
            .bind(user_id)
            .fetch_optional(executor)
            .await?;

    Ok(found.is_some())
}

pub async fn add_like(
    executor: impl SqliteExecutor<'_>,
    action_id: i64,
    user_id: i64,
) -> Result<(), AppError> {
    sqlx::query("INSERT INTO action_likes (action_id, user_id) VALUES (?, ?)")
        .bind(action_id)
        .bind(user_id)
        .execute(executor)
        .await?;

    Ok(())
}

pub async fn remove_like(
    executor: impl SqliteExecutor<'_>,
    action_id: i64,
    user_id: i64,
) -> Result<(), AppError> {
    sqlx::query("DELETE FROM action_likes WHERE action_id = ? AND user_id = ?")
        .bind(action_id)
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
    sqlx::query("UPDATE actions SET like_count = like_count + ? WHERE id = ?")
        .bind(delta)
        .bind(id)
        .execute(executor)
        .await?;

    Ok(())
}

pub async fn like_count(executor: impl SqliteExecutor<'_>, id: i64) -> Result<i64, AppError> {
    let (count,): (i64,) = sqlx::query_as("SELECT like_count FROM actions WHERE id = ?")
        .bind(id)
        .fetch_one(executor)
        .await?;

    Ok(count)
}
