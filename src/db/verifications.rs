use crate::error::AppError;
use crate::models::Verification;
use sqlx::SqliteExecutor;

/// 이메일당 인증 레코드는 하나뿐입니다.
/// 다시 요청하면 코드를 새로 발급하고 `verified`를 되돌립니다.
pub async fn upsert_verification(
    executor: impl SqliteExecutor<'_>,
    email: &str,
    code: &str,
) -> Result<(), AppError> {
    sqlx::query(
        r#"
        INSERT INTO verifications (email, verification_code)
        VALUES (?, ?)
        ON CONFLICT(email) DO UPDATE SET
            verification_code = excluded.verification_code,
            verified = 0,
            created_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
        "#,
    )
    .bind(email)
    .bind(code)
    .execute(executor)
    .await?;

    Ok(())
}

pub async fn find_verification(
    executor: impl SqliteExecutor<'_>,
    email: &str,
    code: &str,
) -> Result<Option<Verification>, AppError> {
    let verification = sqlx::query_as::<_, Verification>(
        r#"
        SELECT id, email, verification_code, verified, created_at
        FROM verifications
        WHERE email = ? AND verification_code = ?
        "#,
    )
    .bind(email)
    .bind(code)
    .fetch_optional(executor)
    .await?;

    Ok(verification)
}

pub async fn mark_verified(executor: impl SqliteExecutor<'_>, id: i64) -> Result<(), AppError> {
    sqlx::query("UPDATE verifications SET verified = 1 WHERE id = ?")
        .bind(id)
        .execute(executor)
        .await?;

    Ok(())
}

pub async fn delete_verification(executor: impl SqliteExecutor<'_>, id: i64) -> Result<(), AppError> {
    sqlx::query("DELETE FROM verifications WHERE id = ?")
        .bind(id)
        .execute(executor)
        .await?;

    Ok(())
}
