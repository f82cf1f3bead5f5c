use sqlx::SqlitePool;

use crate::db::{actions, questions, sections};
use crate::error::AppError;
use crate::models::{ActionSort, ActionSummary, ListQuery, QuestionResponse};
use crate::services::sections::section_not_found;
use crate::services::users::ensure_active;

pub(crate) fn question_not_found(id: i64) -> AppError {
    AppError::not_found(format!("Question with id {id} has not been found."))
}

pub async fn get_question(pool: &SqlitePool, id: i64) -> Result<QuestionResponse, AppError> {
    questions::find_question(pool, id)
        .await?
        .map(QuestionResponse::from)
        .ok_or_else(|| question_not_found(id))
}

pub async fn create_question(
    pool: &SqlitePool,
    writer_id: i64,
    section_id: i64,
    content: &str,
) -> Result<QuestionResponse, AppError> {
    let mut tx = pool.begin().await?;

    ensure_active(&mut *tx, writer_id).await?;
    if !sections::section_exists(&mut *tx, section_id).await? {
        return Err(section_not_found(section_id));
    }
    let id = questions::create_question(&mut *tx, writer_id, section_id, content).await?;
    let question = questions::find_question(&mut *tx, id)
        .await?
        .ok_or_else(|| AppError::internal("Failed to retrieve created question"))?;

    tx.commit().await?;
    tracing::debug!(question_id = id, section_id, "question created");

    Ok(question.into())
}

pub async fn update_content(
    pool: &SqlitePool,
    id: i64,
    content: &str,
) -> Result<QuestionResponse, AppError> {
    if !questions::update_content(pool, id, content).await? {
        return Err(question_not_found(id));
    }
    get_question(pool, id).await
}

pub async fn delete_question(pool: &SqlitePool, id: i64) -> Result<(), AppError> {
    if !questions::delete_question(pool, id).await? {
        return Err(question_not_found(id));
    }
    Ok(())
}

pub async fn list_actions(
    pool: &SqlitePool,
    question_id: i64,
    query: &ListQuery<ActionSort>,
) -> Result<(Vec<ActionSummary>, i64), AppError> {
    if !questions::question_exists(pool, question_id).await? {
        return Err(question_not_found(question_id));
    }

    let (actions, total) = actions::list_by_question(pool, question_id, query).await?;
    Ok((actions.into_iter().map(ActionSummary::from).collect(), total))
}
