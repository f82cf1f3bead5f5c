//! # 액션(답변) 서비스
//!
//! 본문은 저장 시 마크다운 → HTML 렌더링 + 새니타이즈를 거치고,
//! 조회 시에도 한 번 더 새니타이즈합니다.
//! 수정/삭제/원문 조회는 작성자만 가능합니다.

use sqlx::{SqliteConnection, SqlitePool};

use crate::db::actions::{self, ActionContent};
use crate::db::{comments, questions};
use crate::error::AppError;
use crate::models::{
    Action, ActionDetail, CommentResponse, CommentSort, LikeStatus, ListQuery,
};
use crate::services::markdown::{extract_image_urls, join_image_urls, render_markdown, sanitize_html};
use crate::services::questions::question_not_found;
use crate::services::users::ensure_active;

pub(crate) fn action_not_found(id: i64) -> AppError {
    AppError::not_found(format!("Action with id {id} has not been found."))
}

async fn find_owned(conn: &mut SqliteConnection, id: i64, user_id: i64) -> Result<Action, AppError> {
    let action = actions::find_action(&mut *conn, id)
        .await?
        .ok_or_else(|| action_not_found(id))?;
    if action.writer_id != user_id {
        return Err(AppError::forbidden("User cannot access to the action."));
    }
    Ok(action)
}

pub async fn get_action(pool: &SqlitePool, id: i64) -> Result<ActionDetail, AppError> {
    let mut action = actions::find_action(pool, id)
        .await?
        .ok_or_else(|| action_not_found(id))?;
    action.content = sanitize_html(&action.content);
    Ok(action.into())
}

pub async fn create_action(
    pool: &SqlitePool,
    writer_id: i64,
    question_id: i64,
    title: &str,
    markdown: &str,
) -> Result<ActionDetail, AppError> {
    let html = render_markdown(markdown);
    let image_urls = join_image_urls(&extract_image_urls(markdown));
    let content = ActionContent {
        title,
        html: &html,
        raw: markdown,
        image_urls: image_urls.as_deref(),
    };

    let mut tx = pool.begin().await?;

    ensure_active(&mut *tx, writer_id).await?;
    if !questions::question_exists(&mut *tx, question_id).await? {
        return Err(question_not_found(question_id));
    }
    let id = actions::create_action(&mut *tx, writer_id, question_id, &content).await?;
    let action = actions::find_action(&mut *tx, id)
        .await?
        .ok_or_else(|| AppError::internal("Failed to retrieve created action"))?;

    tx.commit().await?;
    tracing::debug!(action_id = id, question_id, "action created");

    Ok(action.into())
}

pub async fn update_action(
    pool: &SqlitePool,
    id: i64,
    user_id: i64,
    title: &str,
    markdown: &str,
) -> Result<ActionDetail, AppError> {
    let html = render_markdown(markdown);
    let image_urls = join_image_urls(&extract_image_urls(markdown));
    let content = ActionContent {
        title,
        html: &html,
        raw: markdown,
        image_urls: image_urls.as_deref(),
    };

    let mut tx = pool.begin().await?;

    find_owned(&mut tx, id, user_id).await?;
    actions::update_action(&mut *tx, id, &content).await?;
    let action = actions::find_action(&mut *tx, id)
        .await?
        .ok_or_else(|| action_not_found(id))?;

    tx.commit().await?;
    Ok(action.into())
}

pub async fn delete_action(pool: &SqlitePool, id: i64, user_id: i64) -> Result<(), AppError> {
    let mut tx = pool.begin().await?;

    find_owned(&mut tx, id, user_id).await?;
    actions::delete_action(&mut *tx, id).await?;

    tx.commit().await?;
    Ok(())
}

/// 수정 화면에 채워 넣을 원본 마크다운
pub async fn raw_content(pool: &SqlitePool, id: i64, user_id: i64) -> Result<String, AppError> {
    let mut conn = pool.acquire().await?;
    let action = find_owned(&mut conn, id, user_id).await?;
    Ok(action.raw_content)
}

/// 좋아요가 있으면 취소, 없으면 추가합니다. 카운터 갱신까지 한 트랜잭션입니다.
pub async fn toggle_like(
    pool: &SqlitePool,
    id: i64,
    user_id: i64,
) -> Result<LikeStatus, AppError> {
    let mut tx = pool.begin().await?;

    ensure_active(&mut *tx, user_id).await?;
    if actions::find_action(&mut *tx, id).await?.is_none() {
        return Err(action_not_found(id));
    }

    let liked = if actions::has_liked(&mut *tx, id, user_id).await? {
        actions::remove_like(&mut *tx, id, user_id).await?;
        actions::adjust_like_count(&mut *tx, id, -1).await?;
        false
    } else {
        actions::add_like(&mut *tx, id, user_id).await?;
        actions::adjust_like_count(&mut *tx, id, 1).await?;
        true
    };
    let like_count = actions::like_count(&mut *tx, id).await?;

    tx.commit().await?;
    Ok(LikeStatus { liked, like_count })
}

pub async fn like_status(
    pool: &SqlitePool,
    id: i64,
    user_id: i64,
) -> Result<LikeStatus, AppError> {
    let action = actions::find_action(pool, id)
        .await?
        .ok_or_else(|| action_not_found(id))?;

    Ok(LikeStatus {
        liked: actions::has_liked(pool, id, user_id).await?,
        like_count: action.like_count,
    })
}

pub async fn list_comments(
    pool: &SqlitePool,
    action_id: i64,
    query: &ListQuery<CommentSort>,
) -> Result<(Vec<CommentResponse>, i64), AppError> {
    if actions::find_action(pool, action_id).await?.is_none() {
        return Err(action_not_found(action_id));
    }

    let (comments, total) = comments::list_by_action(pool, action_id, query).await?;
    Ok((comments.into_iter().map(CommentResponse::from).collect(), total))
}
