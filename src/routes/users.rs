use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::{
    db::books::BookScope,
    error::AppError,
    middleware::auth::AuthUser,
    models::*,
    routes::{extract::{AppJson, AppPath, AppQuery}, validate},
    services::{books as book_service, users as user_service},
    state::AppState,
};

pub async fn list_users(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let users = user_service::list_users(&state.pool).await?;

    Ok(Json(json!({ "message": "All users have been found.", "users": users })))
}

pub async fn get_me(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Value>, AppError> {
    let me = user_service::get_user(&state.pool, user.user_id).await?;

    Ok(Json(json!({
        "message": format!("An user with id: {} has been found.", user.user_id),
        "user": me,
    })))
}

pub async fn get_user(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<Value>, AppError> {
    let user = user_service::get_user(&state.pool, id).await?;

    Ok(Json(json!({
        "message": format!("An user with id: {id} has been found."),
        "user": user,
    })))
}

pub async fn get_contribution(
    State(state): State<AppState>,
    user: AuthUser,
    AppQuery(query): AppQuery<ContributionQuery>,
) -> Result<Json<Value>, AppError> {
    let contribution = user_service::contribution(&state.pool, user.user_id, query.kind).await?;

    Ok(Json(json!({
        "message": "User contribution information has been found.",
        "total": contribution.total,
        "percentile": contribution.percentile,
    })))
}

pub async fn list_my_books(
    State(state): State<AppState>,
    user: AuthUser,
    AppQuery(query): AppQuery<ListQuery<BookSort>>,
) -> Result<Json<Value>, AppError> {
    query.validate()?;
    let (books, total) =
        book_service::list_books(&state.pool, BookScope::PublishedBy(user.user_id), &query).await?;

    Ok(Json(json!({
        "message": "User's books have been found.",
        "books": books,
        "total": total,
    })))
}

pub async fn list_liked_books(
    State(state): State<AppState>,
    user: AuthUser,
    AppQuery(query): AppQuery<ListQuery<BookSort>>,
) -> Result<Json<Value>, AppError> {
    query.validate()?;
    let (books, total) =
        book_service::list_books(&state.pool, BookScope::LikedBy(user.user_id), &query).await?;

    Ok(Json(json!({
        "message": "User's liked books have been found.",
        "books": books,
        "total": total,
    })))
}

pub async fn change_password(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(req): AppJson<ChangePasswordRequest>,
) -> Result<Json<Value>, AppError> {
    validate::non_empty("password", &req.password)?;
    validate::length_between("newPassword", &req.new_password, 8, 32)?;

    user_service::change_password(
        &state.pool,
        user.user_id,
        &req.password,
        &req.new_password,
        &req.confirm_password,
    )
    .await?;

    Ok(Json(json!({ "message": "User password has been changed." })))
}

async fn change_profile(
    state: &AppState,
    user_id: i64,
    field: ProfileField,
    value: &str,
    message: &str,
) -> Result<Json<Value>, AppError> {
    validate::non_empty(field.column(), value)?;
    let user = user_service::update_profile(&state.pool, user_id, field, value).await?;

    Ok(Json(json!({ "message": message, "user": user })))
}

pub async fn change_nickname(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(req): AppJson<ChangeNicknameRequest>,
) -> Result<Json<Value>, AppError> {
    change_profile(
        &state,
        user.user_id,
        ProfileField::Nickname,
        &req.nickname,
        "User nickname has been changed.",
    )
    .await
}

pub async fn change_affiliation(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(req): AppJson<ChangeAffiliationRequest>,
) -> Result<Json<Value>, AppError> {
    change_profile(
        &state,
        user.user_id,
        ProfileField::Affiliation,
        &req.affiliation,
        "User affiliation has been changed.",
    )
    .await
}

pub async fn change_position(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(req): AppJson<ChangePositionRequest>,
) -> Result<Json<Value>, AppError> {
    change_profile(
        &state,
        user.user_id,
        ProfileField::Position,
        &req.position,
        "User position has been changed.",
    )
    .await
}

pub async fn delete_user(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(req): AppJson<DeleteUserRequest>,
) -> Result<Json<Value>, AppError> {
    user_service::delete_user(&state.pool, user.user_id, &req.password, &req.confirm_message)
        .await?;

    Ok(Json(json!({
        "message": format!("An user with id: {} has been deleted.", user.user_id),
    })))
}
