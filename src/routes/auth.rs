use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};

use crate::{
    error::AppError,
    middleware::auth::{AuthUser, RefreshUser},
    models::user::*,
    routes::{extract::AppJson, validate},
    services::auth as auth_service,
    state::AppState,
};

pub async fn send_verification_code(
    State(state): State<AppState>,
    AppJson(req): AppJson<EmailRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    validate::email(&req.email)?;

    auth_service::send_verification_code(&state, &req.email).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "A verification mail has been sent." })),
    ))
}

pub async fn verify_code(
    State(state): State<AppState>,
    AppJson(req): AppJson<VerifyCodeRequest>,
) -> Result<Json<Value>, AppError> {
    validate::email(&req.email)?;
    validate::verification_code(&req.verification_code)?;

    auth_service::verify_code(&state, &req.email, &req.verification_code).await?;

    Ok(Json(json!({ "message": "Verified." })))
}

pub async fn signup(
    State(state): State<AppState>,
    AppJson(req): AppJson<SignupRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    validate::email(&req.email)?;
    validate::length_between("password", &req.password, 8, 32)?;
    validate::non_empty("nickname", &req.nickname)?;
    validate::non_empty("affiliation", &req.affiliation)?;
    validate::non_empty("position", &req.position)?;
    validate::verification_code(&req.verification_code)?;

    let user = auth_service::signup(&state, &req).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "A new user has been signed up.", "user": user })),
    ))
}

pub async fn login(
    State(state): State<AppState>,
    AppJson(req): AppJson<LoginRequest>,
) -> Result<Json<Value>, AppError> {
    validate::email(&req.email)?;
    validate::non_empty("password", &req.password)?;

    let tokens = auth_service::login(&state, &req.email, &req.password).await?;

    Ok(Json(json!({
        "message": "You have been logged in.",
        "accessToken": tokens.access_token,
        "refreshToken": tokens.refresh_token,
    })))
}

pub async fn refresh(
    State(state): State<AppState>,
    user: RefreshUser,
) -> Result<Json<Value>, AppError> {
    let tokens = auth_service::refresh(&state, user.user_id, &user.refresh_token).await?;

    Ok(Json(json!({
        "message": "JWT tokens have been refreshed.",
        "accessToken": tokens.access_token,
        "refreshToken": tokens.refresh_token,
    })))
}

pub async fn logout(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Value>, AppError> {
    auth_service::logout(&state, user.user_id).await?;

    Ok(Json(json!({ "message": "You have been logged out." })))
}
