use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};

use crate::{
    error::AppError,
    middleware::auth::AuthUser,
    models::*,
    routes::{extract::{AppJson, AppPath, AppQuery}, validate},
    services::actions as action_service,
    state::AppState,
};

const MAX_CONTENT_CHARS: usize = 100_000;

fn validate_action(title: &str, content: &str) -> Result<(), AppError> {
    validate::non_empty("title", title)?;
    validate::non_empty("content", content)?;
    validate::length_between("content", content, 1, MAX_CONTENT_CHARS)
}

pub async fn get_action(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<Value>, AppError> {
    let action = action_service::get_action(&state.pool, id).await?;

    Ok(Json(json!({
        "message": format!("Action with id {id} has been found."),
        "action": action,
    })))
}

pub async fn create_action(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(req): AppJson<CreateActionRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    validate_action(&req.title, &req.content)?;

    let action = action_service::create_action(
        &state.pool,
        user.user_id,
        req.question_id,
        &req.title,
        &req.content,
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "New action has been created.", "action": action })),
    ))
}

pub async fn update_action(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(id): AppPath<i64>,
    AppJson(req): AppJson<UpdateActionRequest>,
) -> Result<Json<Value>, AppError> {
    validate_action(&req.title, &req.content)?;

    let action =
        action_service::update_action(&state.pool, id, user.user_id, &req.title, &req.content)
            .await?;

    Ok(Json(json!({ "message": "Action has been updated.", "action": action })))
}

pub async fn delete_action(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(id): AppPath<i64>,
) -> Result<Json<Value>, AppError> {
    action_service::delete_action(&state.pool, id, user.user_id).await?;

    Ok(Json(json!({ "message": "Action has been deleted." })))
}

pub async fn get_raw_content(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(id): AppPath<i64>,
) -> Result<Json<Value>, AppError> {
    let content = action_service::raw_content(&state.pool, id, user.user_id).await?;

    Ok(Json(json!({
        "message": "Raw markdown content has been found.",
        "content": content,
    })))
}

pub async fn toggle_like(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(id): AppPath<i64>,
) -> Result<Json<Value>, AppError> {
    let status = action_service::toggle_like(&state.pool, id, user.user_id).await?;

    Ok(Json(json!({
        "message": "Like to the action has been processed.",
        "liked": status.liked,
        "likeCount": status.like_count,
    })))
}

pub async fn get_like(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(id): AppPath<i64>,
) -> Result<Json<Value>, AppError> {
    let status = action_service::like_status(&state.pool, id, user.user_id).await?;

    Ok(Json(json!({
        "message": "Like information for the action has been found.",
        "liked": status.liked,
        "likeCount": status.like_count,
    })))
}

pub async fn list_comments(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
    AppQuery(query): AppQuery<ListQuery<CommentSort>>,
) -> Result<Json<Value>, AppError> {
    query.validate()?;
    let (comments, total) = action_service::list_comments(&state.pool, id, &query).await?;

    Ok(Json(json!({
        "message": "Comments have been found.",
        "comments": comments,
        "total": total,
    })))
}
