use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};

use crate::{
    error::AppError,
    middleware::auth::AdminUser,
    models::*,
    routes::{extract::{AppJson, AppPath, AppQuery}, validate},
    services::sections as section_service,
    state::AppState,
};

pub async fn list_sections(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<SectionListQuery>,
) -> Result<Json<Value>, AppError> {
    let sections = section_service::list_sections(&state.pool, &query).await?;

    Ok(Json(json!({ "message": "All sections have been found.", "sections": sections })))
}

pub async fn get_section(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<Value>, AppError> {
    let section = section_service::get_section(&state.pool, id).await?;

    Ok(Json(json!({
        "message": format!("Section with id: {id} has been found."),
        "section": section,
    })))
}

pub async fn list_questions(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
    AppQuery(query): AppQuery<ListQuery<QuestionSort>>,
) -> Result<Json<Value>, AppError> {
    query.validate()?;
    let (questions, total) = section_service::list_questions(&state.pool, id, &query).await?;

    Ok(Json(json!({
        "message": format!("Questions of section {id} have been found."),
        "questions": questions,
        "total": total,
    })))
}

pub async fn create_section(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    AppJson(req): AppJson<CreateSectionRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    validate::non_empty("subject", &req.subject)?;

    let section = section_service::create_section(
        &state.pool,
        admin.user_id,
        &req.subject,
        req.description.as_deref(),
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "New section has been created.", "section": section })),
    ))
}

pub async fn update_subject(
    State(state): State<AppState>,
    _admin: AdminUser,
    AppPath(id): AppPath<i64>,
    AppJson(req): AppJson<UpdateSectionSubjectRequest>,
) -> Result<Json<Value>, AppError> {
    validate::non_empty("subject", &req.subject)?;
    let section = section_service::update_subject(&state.pool, id, &req.subject).await?;

    Ok(Json(json!({ "message": "Section subject has been updated.", "section": section })))
}

pub async fn update_description(
    State(state): State<AppState>,
    _admin: AdminUser,
    AppPath(id): AppPath<i64>,
    AppJson(req): AppJson<UpdateSectionDescriptionRequest>,
) -> Result<Json<Value>, AppError> {
    let section =
        section_service::update_description(&state.pool, id, req.description.as_deref()).await?;

    Ok(Json(json!({ "message": "Section description has been updated.", "section": section })))
}

pub async fn delete_section(
    State(state): State<AppState>,
    _admin: AdminUser,
    AppPath(id): AppPath<i64>,
) -> Result<Json<Value>, AppError> {
    section_service::delete_section(&state.pool, id).await?;

    Ok(Json(json!({ "message": "Section has been deleted." })))
}
