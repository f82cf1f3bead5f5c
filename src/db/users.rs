use crate::error::AppError;
use crate::models::user::{Contribution, ContributionType, ProfileField, User};
use sqlx::SqliteExecutor;

pub async fn create_user(
    executor: impl SqliteExecutor<'_>,
    email: &str,
    password_hash: &str,
    nickname: &str,
    affiliation: &str,
    position: &str,
) -> Result<i64, AppError> {
    let result = sqlx::query(
        r#"
        INSERT INTO users (email, password_hash, nickname, affiliation, position)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(email)
    .bind(password_hash)
    .bind(nickname)
    .bind(affiliation)
    .bind(position)
    .execute(executor)
    .await?;

    Ok(result.last_insert_rowid())
}

pub async fn list_users(executor: impl SqliteExecutor<'_>) -> Result<Vec<User>, AppError> {
    let users = sqlx::query_as::<_, User>(
        r#"
        SELECT id, email, password_hash, nickname, affiliation, position,
               refresh_token_hash, role, created_at, updated_at
        FROM users
        WHERE deleted_at IS NULL
        ORDER BY id
        "#,
    )
    .fetch_all(executor)
    .await?;

    Ok(users)
}

pub async fn find_by_id(executor: impl SqliteExecutor<'_>, id: i64) -> Result<Option<User>, AppError> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, email, password_hash, nickname, affiliation, position,
               refresh_token_hash, role, created_at, updated_at
        FROM users
        WHERE id = ? AND deleted_at IS NULL
        "#,
    )
    .bind(id)
    .fetch_optional(executor)
    .await?;

    Ok(user)
}

pub async fn find_by_email(
    executor: impl SqliteExecutor<'_>,
    email: &str,
) -> Result<Option<User>, AppError> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, email, password_hash, nickname, affiliation, position,
               refresh_token_hash, role, created_at, updated_at
        FROM users
        WHERE email = ? AND deleted_at IS NULL
        "#,
    )
    .bind(email)
    .fetch_optional(executor)
    .await?;

    Ok(user)
}

pub async fn set_refresh_token_hash(
    executor: impl SqliteExecutor<'_>,
    id: i64,
    token_hash: Option<&str>,
) -> Result<(), AppError> {
    sqlx::query("UPDATE users SET refresh_token_hash = ? WHERE id = ?")
        .bind(token_hash)
        .bind(id)
        .execute(executor)
        .await?;

    Ok(())
}

pub async fn update_password(
    executor: impl SqliteExecutor<'_>,
    id: i64,
    password_hash: &str,
) -> Result<(), AppError> {
    sqlx::query(
        r#"
        UPDATE users
        SET password_hash = ?, refresh_token_hash = NULL,
            updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
        WHERE id = ?
        "#,
    )
    .bind(password_hash)
    .bind(id)
    .execute(executor)
    .await?;

    Ok(())
}

pub async fn update_profile(
    executor: impl SqliteExecutor<'_>,
    id: i64,
    field: ProfileField,
    value: &str,
) -> Result<(), AppError> {
    let sql = format!(
        "UPDATE users SET {} = ?, updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now') WHERE id = ?",
        field.column()
    );
    sqlx::query(&sql)
        .bind(value)
        .bind(id)
        .execute(executor)
        .await?;

    Ok(())
}

pub async fn soft_delete(executor: impl SqliteExecutor<'_>, id: i64) -> Result<(), AppError> {
    sqlx::query(
        r#"
        UPDATE users
        SET deleted_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now'), refresh_token_hash = NULL
        WHERE id = ?
        "#,
    )
    .bind(id)
    .execute(executor)
    .await?;

    Ok(())
}

fn contribution_total(kind: ContributionType) -> &'static str {
    match kind {
        ContributionType::Created => {
            "(SELECT COUNT(*) FROM questions q WHERE q.writer_id = u.id)
             + (SELECT COUNT(*) FROM actions a WHERE a.writer_id = u.id)
             + (SELECT COUNT(*) FROM books b WHERE b.publisher_id = u.id)"
        }
        ContributionType::Question => {
            "(SELECT COALESCE(SUM(q.saved), 0) FROM questions q WHERE q.writer_id = u.id)"
        }
        ContributionType::Action => {
            "(SELECT COALESCE(SUM(a.like_count), 0) FROM actions a WHERE a.writer_id = u.id)"
        }
        ContributionType::Book => {
            "(SELECT COALESCE(SUM(b.like_count), 0) FROM books b WHERE b.publisher_id = u.id)"
        }
    }
}

/// 기여도 합계와 전체 사용자 중 상위 백분위를 계산합니다.
///
/// `PERCENT_RANK() OVER (ORDER BY total DESC)`는 1등이 0.0, 꼴찌가 1.0입니다.
pub async fn contribution(
    executor: impl SqliteExecutor<'_>,
    id: i64,
    kind: ContributionType,
) -> Result<Option<Contribution>, AppError> {
    let sql = format!(
        r#"
        WITH totals AS (
            SELECT u.id AS user_id, {} AS total
            FROM users u
        ),
        ranked AS (
            SELECT user_id, total, PERCENT_RANK() OVER (ORDER BY total DESC) AS percentile
            FROM totals
        )
        SELECT total, percentile FROM ranked WHERE user_id = ?
        "#,
        contribution_total(kind)
    );

    let row = sqlx::query_as::<_, (i64, f64)>(&sql)
        .bind(id)
        .fetch_optional(executor)
        .await?;

    Ok(row.map(|(total, percentile)| Contribution {
        total,
        percentile: (percentile * 100.0).round() as i64,
    }))
}
