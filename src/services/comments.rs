use sqlx::{SqliteConnection, SqlitePool};

use crate::db::{actions, comments};
use crate::error::AppError;
use crate::models::{Comment, CommentResponse};
use crate::services::actions::action_not_found;
use crate::services::users::ensure_active;

fn comment_not_found(id: i64) -> AppError {
    AppError::not_found(format!("Comment with id {id} has not been found."))
}

async fn find_owned(
    conn: &mut SqliteConnection,
    id: i64,
    user_id: i64,
) -> Result<Comment, AppError> {
    let comment = comments::find_comment(&mut *conn, id)
        .await?
        .ok_or_else(|| comment_not_found(id))?;
    if comment.writer_id != user_id {
        return Err(AppError::forbidden("User cannot access to the comment."));
    }
    Ok(comment)
}

pub async fn create_comment(
    pool: &SqlitePool,
    writer_id: i64,
    action_id: i64,
    content: &str,
) -> Result<CommentResponse, AppError> {
    let mut tx = pool.begin().await?;

    ensure_active(&mut *tx, writer_id).await?;
    if actions::find_action(&mut *tx, action_id).await?.is_none() {
        return Err(action_not_found(action_id));
    }
    let id = comments::create_comment(&mut *tx, writer_id, action_id, content).await?;
    let comment = comments::find_comment(&mut *tx, id)
        .await?
        .ok_or_else(|| AppError::internal("Failed to retrieve created comment"))?;

    tx.commit().await?;
    Ok(comment.into())
}

pub async fn update_comment(
    pool: &SqlitePool,
    id: i64,
    user_id: i64,
    content: &str,
) -> Result<CommentResponse, AppError> {
    let mut tx = pool.begin().await?;

    find_owned(&mut tx, id, user_id).await?;
    comments::update_comment(&mut *tx, id, content).await?;
    let comment = comments::find_comment(&mut *tx, id)
        .await?
        .ok_or_else(|| comment_not_found(id))?;

    tx.commit().await?;
    Ok(comment.into())
}

pub async fn delete_comment(pool: &SqlitePool, id: i64, user_id: i64) -> Result<(), AppError> {
    let mut tx = pool.begin().await?;

    find_owned(&mut tx, id, user_id).await?;
    comments::delete_comment(&mut *tx, id).await?;

    tx.commit().await?;
    Ok(())
}
