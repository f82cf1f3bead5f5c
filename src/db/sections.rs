use crate::error::AppError;
use crate::models::{Section, SectionListQuery, SortField};
use sqlx::SqliteExecutor;

pub async fn list_sections(
    executor: impl SqliteExecutor<'_>,
    query: &SectionListQuery,
) -> Result<Vec<Section>, AppError> {
    let sql = format!(
        r#"
        SELECT s.id, s.subject, s.description, s.created_at, s.updated_at,
               s.creator_id, u.nickname AS creator_nickname
        FROM sections s
        JOIN users u ON u.id = s.creator_id
        ORDER BY {} {}
        "#,
        query.sort.column(),
        query.order().as_sql()
    );

    let sections = sqlx::query_as::<_, Section>(&sql)
        .fetch_all(executor)
        .await?;

    Ok(sections)
}

pub async fn find_section(
    executor: impl SqliteExecutor<'_>,
    id: i64,
) -> Result<Option<Section>, AppError> {
    let section = sqlx::query_as::<_, Section>(
        r#"
        SELECT s.id, s.subject, s.description, s.created_at, s.updated_at,
               s.creator_id, u.nickname AS creator_nickname
        FROM sections s
        JOIN users u ON u.id = s.creator_id
        WHERE s.id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(executor)
    .await?;

    Ok(section)
}

pub async fn section_exists(executor: impl SqliteExecutor<'_>, id: i64) -> Result<bool, AppError> {
    let found: Option<(i64,)> = sqlx::query_as("SELECT id FROM sections WHERE id = ?")
        .bind(id)
        .fetch_optional(executor)
        .await?;

    Ok(found.is_some())
}

pub async fn create_section(
    executor: impl SqliteExecutor<'_>,
    creator_id: i64,
    subject: &str,
    description: Option<&str>,
) -> Result<i64, AppError> {
    let result = sqlx::query(
        "INSERT INTO sections (subject, description, creator_id) VALUES (?, ?, ?)",
    )
    .bind(subject)
    .bind(description)
    .bind(creator_id)
    .execute(executor)
    .await?;

    Ok(result.last_insert_rowid())
}

/// 수정된 행이 없으면 `false` (섹션 없음)
pub async fn update_subject(
    executor: impl SqliteExecutor<'_>,
    id: i64,
    subject: &str,
) -> Result<bool, AppError> {
    let result = sqlx::query(
        r#"
        UPDATE sections
        SET subject = ?, updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
        WHERE id = ?
        "#,
    )
    .bind(subject)
    .bind(id)
    .execute(executor)
    .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn update_description(
    executor: impl SqliteExecutor<'_>,
    id: i64,
    description: Option<&str>,
) -> Result<bool, AppError> {
    let result = sqlx::query(
        r#"
        UPDATE sections
        SET description = ?, updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
        WHERE id = ?
        "#,
    )
    .bind(description)
    .bind(id)
    .execute(executor)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// 섹션의 질문, 액션, 댓글, 좋아요는 외래키 CASCADE로 함께 삭제됩니다.
pub async fn delete_section(executor: impl SqliteExecutor<'_>, id: i64) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM sections WHERE id = ?")
        .bind(id)
        .execute(executor)
        .await?;

    Ok(result.rows_affected() > 0)
}
