use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};

use crate::{
    error::AppError,
    middleware::auth::AuthUser,
    models::*,
    routes::{extract::{AppJson, AppPath}, validate},
    services::comments as comment_service,
    state::AppState,
};

const MAX_COMMENT_CHARS: usize = 200;

fn validate_content(content: &str) -> Result<(), AppError> {
    validate::non_empty("content", content)?;
    validate::length_between("content", content, 1, MAX_COMMENT_CHARS)
}

pub async fn create_comment(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(req): AppJson<CreateCommentRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    validate_content(&req.content)?;

    let comment =
        comment_service::create_comment(&state.pool, user.user_id, req.action_id, &req.content)
            .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "New comment has been created.", "comment": comment })),
    ))
}

pub async fn update_comment(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(id): AppPath<i64>,
    AppJson(req): AppJson<UpdateCommentRequest>,
) -> Result<Json<Value>, AppError> {
    validate_content(&req.content)?;

    let comment =
        comment_service::update_comment(&state.pool, id, user.user_id, &req.content).await?;

    Ok(Json(json!({ "message": "Comment has been updated.", "comment": comment })))
}

pub async fn delete_comment(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(id): AppPath<i64>,
) -> Result<Json<Value>, AppError> {
    comment_service::delete_comment(&state.pool, id, user.user_id).await?;

    Ok(Json(json!({ "message": "Comment has been deleted." })))
}
