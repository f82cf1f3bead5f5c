use sqlx::{SqliteExecutor, SqlitePool};

use crate::db::users;
use crate::error::AppError;
use crate::models::{Contribution, ContributionType, ProfileField, UserResponse};
use crate::services::password::{hash_password, verify_password};

/// 회원 탈퇴 확인 문구. 요청 본문의 `confirmMessage`와 정확히 같아야 합니다.
pub const DELETE_CONFIRM_MESSAGE: &str = "회원 탈퇴를 희망합니다.";

/// 토큰이 유효해도 탈퇴했거나 없는 계정이면 401입니다.
/// 작성/좋아요처럼 사용자 id를 새로 기록하는 작업 앞에서 호출합니다.
pub async fn ensure_active(executor: impl SqliteExecutor<'_>, id: i64) -> Result<(), AppError> {
    if users::find_by_id(executor, id).await?.is_none() {
        return Err(AppError::unauthorized("User does not exist."));
    }
    Ok(())
}

pub async fn list_users(pool: &SqlitePool) -> Result<Vec<UserResponse>, AppError> {
    let users = users::list_users(pool).await?;
    Ok(users.into_iter().map(UserResponse::from).collect())
}

pub async fn get_user(pool: &SqlitePool, id: i64) -> Result<UserResponse, AppError> {
    users::find_by_id(pool, id)
        .await?
        .map(UserResponse::from)
        .ok_or_else(|| AppError::not_found("User has not been found."))
}

pub async fn contribution(
    pool: &SqlitePool,
    id: i64,
    kind: ContributionType,
) -> Result<Contribution, AppError> {
    users::contribution(pool, id, kind)
        .await?
        .ok_or_else(|| AppError::not_found("User has not been found."))
}

pub async fn change_password(
    pool: &SqlitePool,
    id: i64,
    password: &str,
    new_password: &str,
    confirm_password: &str,
) -> Result<(), AppError> {
    if new_password != confirm_password {
        return Err(AppError::bad_request(
            "New password and confirm password do not match.",
        ));
    }

    let user = users::find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("User has not been found."))?;
    if !verify_password(password, &user.password_hash)? {
        return Err(AppError::unauthorized("The current password is incorrect."));
    }

    let password_hash = hash_password(new_password)?;
    users::update_password(pool, id, &password_hash).await?;
    tracing::info!(user_id = id, "password changed");

    Ok(())
}

pub async fn update_profile(
    pool: &SqlitePool,
    id: i64,
    field: ProfileField,
    value: &str,
) -> Result<UserResponse, AppError> {
    let mut tx = pool.begin().await?;

    if users::find_by_id(&mut *tx, id).await?.is_none() {
        return Err(AppError::not_found("User has not been found."));
    }
    users::update_profile(&mut *tx, id, field, value).await?;
    let user = users::find_by_id(&mut *tx, id)
        .await?
        .ok_or_else(|| AppError::internal("Failed to retrieve updated user"))?;

    tx.commit().await?;
    Ok(user.into())
}

/// 소프트 삭제: 작성한 글은 남고, 계정은 조회/로그인 대상에서 빠집니다.
pub async fn delete_user(
    pool: &SqlitePool,
    id: i64,
    password: &str,
    confirm_message: &str,
) -> Result<(), AppError> {
    if confirm_message != DELETE_CONFIRM_MESSAGE {
        return Err(AppError::bad_request("Confirm message is invalid."));
    }

    let user = users::find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("User has not been found."))?;
    if !verify_password(password, &user.password_hash)? {
        return Err(AppError::unauthorized("The current password is incorrect."));
    }

    users::soft_delete(pool, id).await?;
    tracing::info!(user_id = id, "user deleted");

    Ok(())
}
