use crate::error::AppError;
use crate::models::{Comment, CommentSort, ListQuery, SortField};
use sqlx::{SqliteExecutor, SqlitePool};

pub async fn find_comment(
    executor: impl SqliteExecutor<'_>,
    id: i64,
) -> Result<Option<Comment>, AppError> {
    let comment = sqlx::query_as::<_, Comment>(
        r#"
        SELECT c.id, c.content, c.created_at, c.updated_at, c.action_id,
               c.writer_id, u.nickname AS writer_nickname
        FROM comments c
        JOIN users u ON u.id = c.writer_id
        WHERE c.id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(executor)
    .await?;

    Ok(comment)
}

pub async fn list_by_action(
    pool: &SqlitePool,
    action_id: i64,
    query: &ListQuery<CommentSort>,
) -> Result<(Vec<Comment>, i64), AppError> {
    let sql = format!(
        r#"
        SELECT c.id, c.content, c.created_at, c.updated_at, c.action_id,
               c.writer_id, u.nickname AS writer_nickname
        FROM comments c
        JOIN users u ON u.id = c.writer_id
        WHERE c.action_id = ?
        ORDER BY {column} {order}, c.id {order}
        LIMIT ? OFFSET ?
        "#,
        column = query.sort.column(),
        order = query.order.as_sql()
    );

    let comments = sqlx::query_as::<_, Comment>(&sql)
        .bind(action_id)
        .bind(query.limit)
        .bind(query.offset())
        .fetch_all(pool)
        .await?;

    let (total,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM comments WHERE action_id = ?")
        .bind(action_id)
        .fetch_one(pool)
        .await?;

    Ok((comments, total))
}

pub async fn create_comment(
    executor: impl SqliteExecutor<'_>,
    writer_id: i64,
    action_id: i64,
    content: &str,
) -> Result<i64, AppError> {
    let result = sqlx::query(
        "INSERT INTO comments (content, writer_id, action_id) VALUES (?, ?, ?)",
    )
    .bind(content)
    .bind(writer_id)
    .bind(action_id)
    .execute(executor)
    .await?;

    Ok(result.last_insert_rowid())
}

pub async fn update_comment(
    executor: impl SqliteExecutor<'_>,
    id: i64,
    content: &str,
) -> Result<(), AppError> {
    sqlx::query(
        r#"
        UPDATE comments
        SET content = ?, updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
        WHERE id = ?
        "#,
    )
    .bind(content)
    .bind(id)
    .execute(executor)
    .await?;

    Ok(())
}

pub async fn delete_comment(executor: impl SqliteExecutor<'_>, id: i64) -> Result<(), AppError> {
    sqlx::query("DELETE FROM comments WHERE id = ?")
        .bind(id)
        .execute(executor)
        .await?;

    Ok(())
}
