use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};

use crate::{
    db::books::BookScope,
    error::AppError,
    middleware::auth::AuthUser,
    models::*,
    routes::{extract::{AppJson, AppPath, AppQuery}, validate},
    services::books as book_service,
    state::AppState,
};

pub async fn list_books(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<ListQuery<BookSort>>,
) -> Result<Json<Value>, AppError> {
    query.validate()?;
    let (books, total) = book_service::list_books(&state.pool, BookScope::Public, &query).await?;

    Ok(Json(json!({ "message": "Books have been found.", "books": books, "total": total })))
}

pub async fn get_book(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<Value>, AppError> {
    let book = book_service::get_book(&state.pool, id).await?;

    Ok(Json(json!({ "message": "Book has been found.", "book": book })))
}

pub async fn list_questions(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
    AppQuery(query): AppQuery<ListQuery<QuestionSort>>,
) -> Result<Json<Value>, AppError> {
    query.validate()?;
    let (questions, total) = book_service::list_questions(&state.pool, id, &query).await?;

    Ok(Json(json!({
        "message": "Questions have been found.",
        "questions": questions,
        "total": total,
    })))
}

pub async fn get_like(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(id): AppPath<i64>,
) -> Result<Json<Value>, AppError> {
    let status = book_service::like_status(&state.pool, id, user.user_id).await?;

    Ok(Json(json!({
        "message": "Book's like status has been found.",
        "liked": status.liked,
        "likeCount": status.like_count,
    })))
}

pub async fn toggle_like(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(id): AppPath<i64>,
) -> Result<Json<Value>, AppError> {
    let status = book_service::toggle_like(&state.pool, id, user.user_id).await?;

    Ok(Json(json!({
        "message": "Like request has been processed.",
        "liked": status.liked,
        "likeCount": status.like_count,
    })))
}

pub async fn create_book(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(req): AppJson<CreateBookRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    validate::non_empty("title", &req.title)?;

    let book = book_service::create_book(
        &state.pool,
        user.user_id,
        req.visibility,
        &req.title,
        req.description.as_deref(),
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "New book has been created.", "book": book })),
    ))
}

pub async fn update_title(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(id): AppPath<i64>,
    AppJson(req): AppJson<UpdateBookRequest>,
) -> Result<Json<Value>, AppError> {
    validate::non_empty("title", &req.title)?;

    let book = book_service::update_title(
        &state.pool,
        id,
        user.user_id,
        &req.title,
        req.description.as_deref(),
    )
    .await?;

    Ok(Json(json!({ "message": "Book has been updated.", "book": book })))
}

pub async fn update_visibility(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(id): AppPath<i64>,
    AppJson(req): AppJson<UpdateBookVisibilityRequest>,
) -> Result<Json<Value>, AppError> {
    let book =
        book_service::update_visibility(&state.pool, id, user.user_id, req.visibility).await?;

    Ok(Json(json!({ "message": "Book visibility has been updated.", "book": book })))
}

pub async fn delete_book(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath(id): AppPath<i64>,
) -> Result<Json<Value>, AppError> {
    book_service::delete_book(&state.pool, id, user.user_id).await?;

    Ok(Json(json!({ "message": "Book has been deleted." })))
}

pub async fn save_question(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath((id, question_id)): AppPath<(i64, i64)>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    book_service::save_question(&state.pool, id, question_id, user.user_id).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Question has been saved to the book." })),
    ))
}

pub async fn remove_question(
    State(state): State<AppState>,
    user: AuthUser,
    AppPath((id, question_id)): AppPath<(i64, i64)>,
) -> Result<Json<Value>, AppError> {
    book_service::remove_question(&state.pool, id, question_id, user.user_id).await?;

    Ok(Json(json!({ "message": "Question has been deleted from the book." })))
}
