use sqlx::SqlitePool;

use crate::db::{questions, sections};
use crate::error::AppError;
use crate::models::{ListQuery, QuestionResponse, QuestionSort, SectionListQuery, SectionResponse};

pub(crate) fn section_not_found(id: i64) -> AppError {
    AppError::not_found(format!("Section with id {id} has not been found."))
}

pub async fn list_sections(
    pool: &SqlitePool,
    query: &SectionListQuery,
) -> Result<Vec<SectionResponse>, AppError> {
    let sections = sections::list_sections(pool, query).await?;
    Ok(sections.into_iter().map(SectionResponse::from).collect())
}

pub async fn get_section(pool: &SqlitePool, id: i64) -> Result<SectionResponse, AppError> {
    sections::find_section(pool, id)
        .await?
        .map(SectionResponse::from)
        .ok_or_else(|| section_not_found(id))
}

pub async fn list_questions(
    pool: &SqlitePool,
    section_id: i64,
    query: &ListQuery<QuestionSort>,
) -> Result<(Vec<QuestionResponse>, i64), AppError> {
    if !sections::section_exists(pool, section_id).await? {
        return Err(section_not_found(section_id));
    }

    let (questions, total) = questions::list_by_section(pool, section_id, query).await?;
    Ok((questions.into_iter().map(QuestionResponse::from).collect(), total))
}

pub async fn create_section(
    pool: &SqlitePool,
    creator_id: i64,
    subject: &str,
    description: Option<&str>,
) -> Result<SectionResponse, AppError> {
    let mut tx = pool.begin().await?;

    let id = sections::create_section(&mut *tx, creator_id, subject, description).await?;
    let section = sections::find_section(&mut *tx, id)
        .await?
        .ok_or_else(|| AppError::internal("Failed to retrieve created section"))?;

    tx.commit().await?;
    tracing::info!(section_id = id, subject, "section created");

    Ok(section.into())
}

pub async fn update_subject(
    pool: &SqlitePool,
    id: i64,
    subject: &str,
) -> Result<SectionResponse, AppError> {
    if !sections::update_subject(pool, id, subject).await? {
        return Err(section_not_found(id));
    }
    get_section(pool, id).await
}

pub async fn update_description(
    pool: &SqlitePool,
    id: i64,
    description: Option<&str>,
) -> Result<SectionResponse, AppError> {
    if !sections::update_description(pool, id, description).await? {
        return Err(section_not_found(id));
    }
    get_section(pool, id).await
}

pub async fn delete_section(pool: &SqlitePool, id: i64) -> Result<(), AppError> {
    if !sections::delete_section(pool, id).await? {
        return Err(section_not_found(id));
    }
    tracing::info!(section_id = id, "section deleted");
    Ok(())
}
