use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};

use crate::{
    error::AppError,
    middleware::auth::{AdminUser, AuthUser},
    models::*,
    routes::{extract::{AppJson, AppPath, AppQuery}, validate},
    services::questions as question_service,
    state::AppState,
};

pub async fn get_question(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<Value>, AppError> {
    let question = question_service::get_question(&state.pool, id).await?;

    Ok(Json(json!({
        "message": format!("Question with id {id} has been found."),
        "question": question,
    })))
}

pub async fn create_question(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(req): AppJson<CreateQuestionRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    validate::non_empty("content", &req.content)?;

    let question =
        question_service::create_question(&state.pool, user.user_id, req.section_id, &req.content)
            .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "A new question has been created.", "question": question })),
    ))
}

pub async fn update_question(
    State(state): State<AppState>,
    _admin: AdminUser,
    AppPath(id): AppPath<i64>,
    AppJson(req): AppJson<UpdateQuestionRequest>,
) -> Result<Json<Value>, AppError> {
    validate::non_empty("content", &req.content)?;
    let question = question_service::update_content(&state.pool, id, &req.content).await?;

    Ok(Json(json!({ "message": "Question content has been updated.", "question": question })))
}

pub async fn delete_question(
    State(state): State<AppState>,
    _admin: AdminUser,
    AppPath(id): AppPath<i64>,
) -> Result<Json<Value>, AppError> {
    question_service::delete_question(&state.pool, id).await?;

    Ok(Json(json!({ "message": format!("Question with id {id} has been deleted.") })))
}

pub async fn list_actions(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
    AppQuery(query): AppQuery<ListQuery<ActionSort>>,
) -> Result<Json<Value>, AppError> {
    query.validate()?;
    let (actions, total) = question_service::list_actions(&state.pool, id, &query).await?;

    Ok(Json(json!({
        "message": "Actions of question have been found.",
        "actions": actions,
        "total": total,
    })))
}
