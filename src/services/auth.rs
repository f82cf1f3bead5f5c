//! # 인증 서비스
//!
//! 회원가입 흐름: 인증 코드 발송 → 코드 확인(verified) → 가입(인증 레코드 삭제 + 사용자 생성)
//! 로그인/토큰 갱신 시 refresh 토큰의 SHA-256 해시만 사용자 행에 저장합니다.

use crate::db::{users, verifications};
use crate::error::AppError;
use crate::middleware::auth::{create_token_pair, hash_token, TokenPair};
use crate::models::{SignupRequest, User, UserResponse};
use crate::services::password::{generate_verification_code, hash_password, verify_password};
use crate::state::AppState;

pub async fn send_verification_code(state: &AppState, email: &str) -> Result<(), AppError> {
    if users::find_by_email(&state.pool, email).await?.is_some() {
        return Err(AppError::conflict(format!(
            "User with email {email} already exists."
        )));
    }

    let code = generate_verification_code();
    verifications::upsert_verification(&state.pool, email, &code).await?;
    tracing::debug!(email, "verification code issued");

    if let Err(e) = state.mailer.send_verification_code(email, &code).await {
        tracing::error!(email, error = %e, "failed to send verification mail");
        return Err(AppError::internal(
            "An error has been occurred while sending a mail.",
        ));
    }
    tracing::info!(email, "verification mail sent");

    Ok(())
}

pub async fn verify_code(state: &AppState, email: &str, code: &str) -> Result<(), AppError> {
    let mut tx = state.pool.begin().await?;

    let verification = verifications::find_verification(&mut *tx, email, code)
        .await?
        .ok_or_else(|| AppError::bad_request("Verification code is not valid."))?;
    verifications::mark_verified(&mut *tx, verification.id).await?;

    tx.commit().await?;
    Ok(())
}

pub async fn signup(state: &AppState, req: &SignupRequest) -> Result<UserResponse, AppError> {
    let password_hash = hash_password(&req.password)?;

    let mut tx = state.pool.begin().await?;

    let verification = verifications::find_verification(&mut *tx, &req.email, &req.verification_code)
        .await?
        .filter(|v| v.verified)
        .ok_or_else(|| AppError::unauthorized("Email has not been verified."))?;
    verifications::delete_verification(&mut *tx, verification.id).await?;

    let created = users::create_user(
        &mut *tx,
        &req.email,
        &password_hash,
        &req.nickname,
        &req.affiliation,
        &req.position,
    )
    .await;
    let user_id = match created {
        Ok(id) => id,
        Err(AppError::Database(sqlx::Error::Database(e))) if e.is_unique_violation() => {
            return Err(AppError::conflict(format!(
                "User with email {} already exists.",
                req.email
            )));
        }
        Err(e) => return Err(e),
    };

    let user = users::find_by_id(&mut *tx, user_id)
        .await?
        .ok_or_else(|| AppError::internal("Failed to retrieve created user"))?;

    tx.commit().await?;
    tracing::info!(user_id, "user signed up");

    Ok(user.into())
}

async fn issue_tokens(state: &AppState, user: &User) -> Result<TokenPair, AppError> {
    let tokens = create_token_pair(user, &state.config.jwt)
        .map_err(|e| AppError::internal(format!("Failed to create tokens: {e}")))?;

    users::set_refresh_token_hash(&state.pool, user.id, Some(&hash_token(&tokens.refresh_token)))
        .await?;

    Ok(tokens)
}

pub async fn login(state: &AppState, email: &str, password: &str) -> Result<TokenPair, AppError> {
    let user = users::find_by_email(&state.pool, email)
        .await?
        .ok_or_else(|| AppError::unauthorized("User information is invalid."))?;

    if !verify_password(password, &user.password_hash)? {
        return Err(AppError::unauthorized("User information is invalid."));
    }

    issue_tokens(state, &user).await
}

/// 저장된 해시와 일치하는 refresh 토큰만 새 토큰 쌍으로 교환합니다.
pub async fn refresh(
    state: &AppState,
    user_id: i64,
    refresh_token: &str,
) -> Result<TokenPair, AppError> {
    let user = users::find_by_id(&state.pool, user_id)
        .await?
        .ok_or_else(|| AppError::unauthorized("User does not exist."))?;

    let matches = user
        .refresh_token_hash
        .as_deref()
        .is_some_and(|stored| stored == hash_token(refresh_token));
    if !matches {
        return Err(AppError::unauthorized("The token is not valid."));
    }

    issue_tokens(state, &user).await
}

pub async fn logout(state: &AppState, user_id: i64) -> Result<(), AppError> {
    users::set_refresh_token_hash(&state.pool, user_id, None).await
}
