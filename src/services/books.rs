//! # 북 서비스
//!
//! 북은 질문을 모아 두는 목록입니다. 질문의 `saved` 카운터는
//! 북-질문 관계가 생기거나 없어질 때 같은 트랜잭션 안에서 함께 갱신됩니다.

use sqlx::{SqliteConnection, SqlitePool};

use crate::db::books::{self, BookScope};
use crate::db::questions;
use crate::error::AppError;
use crate::models::{
    Book, BookResponse, BookSort, LikeStatus, ListQuery, QuestionResponse, QuestionSort,
    Visibility,
};
use crate::services::questions::question_not_found;
use crate::services::users::ensure_active;

fn book_not_found(id: i64) -> AppError {
    AppError::not_found(format!("Book with id {id} has not been found."))
}

async fn find_owned(conn: &mut SqliteConnection, id: i64, user_id: i64) -> Result<Book, AppError> {
    let book = books::find_book(&mut *conn, id)
        .await?
        .ok_or_else(|| book_not_found(id))?;
    if book.publisher_id != user_id {
        return Err(AppError::forbidden("User cannot access to the book."));
    }
    Ok(book)
}

pub async fn list_books(
    pool: &SqlitePool,
    scope: BookScope,
    query: &ListQuery<BookSort>,
) -> Result<(Vec<BookResponse>, i64), AppError> {
    let (books, total) = books::list_books(pool, scope, query).await?;
    Ok((books.into_iter().map(BookResponse::from).collect(), total))
}

pub async fn get_book(pool: &SqlitePool, id: i64) -> Result<BookResponse, AppError> {
    books::find_book(pool, id)
        .await?
        .map(BookResponse::from)
        .ok_or_else(|| book_not_found(id))
}

pub async fn list_questions(
    pool: &SqlitePool,
    book_id: i64,
    query: &ListQuery<QuestionSort>,
) -> Result<(Vec<QuestionResponse>, i64), AppError> {
    if books::find_book(pool, book_id).await?.is_none() {
        return Err(book_not_found(book_id));
    }

    let (questions, total) = questions::list_by_book(pool, book_id, query).await?;
    Ok((questions.into_iter().map(QuestionResponse::from).collect(), total))
}

pub async fn create_book(
    pool: &SqlitePool,
    publisher_id: i64,
    visibility: Visibility,
    title: &str,
    description: Option<&str>,
) -> Result<BookResponse, AppError> {
    let mut tx = pool.begin().await?;

    ensure_active(&mut *tx, publisher_id).await?;
    let id = books::create_book(&mut *tx, publisher_id, visibility, title, description).await?;
    let book = books::find_book(&mut *tx, id)
        .await?
        .ok_or_else(|| AppError::internal("Failed to retrieve created book"))?;

    tx.commit().await?;
    tracing::debug!(book_id = id, publisher_id, "book created");

    Ok(book.into())
}

pub async fn update_title(
    pool: &SqlitePool,
    id: i64,
    user_id: i64,
    title: &str,
    description: Option<&str>,
) -> Result<BookResponse, AppError> {
    let mut tx = pool.begin().await?;

    find_owned(&mut tx, id, user_id).await?;
    books::update_title(&mut *tx, id, title, description).await?;
    let book = books::find_book(&mut *tx, id)
        .await?
        .ok_or_else(|| book_not_found(id))?;

    tx.commit().await?;
    Ok(book.into())
}

pub async fn update_visibility(
    pool: &SqlitePool,
    id: i64,
    user_id: i64,
    visibility: Visibility,
) -> Result<BookResponse, AppError> {
    let mut tx = pool.begin().await?;

    find_owned(&mut tx, id, user_id).await?;
    books::update_visibility(&mut *tx, id, visibility).await?;
    let book = books::find_book(&mut *tx, id)
        .await?
        .ok_or_else(|| book_not_found(id))?;

    tx.commit().await?;
    Ok(book.into())
}

/// 북에 담긴 질문들의 `saved`를 먼저 줄인 뒤 북을 지웁니다.
pub async fn delete_book(pool: &SqlitePool, id: i64, user_id: i64) -> Result<(), AppError> {
    let mut tx = pool.begin().await?;

    find_owned(&mut tx, id, user_id).await?;
    let released = books::release_saved_questions(&mut *tx, id).await?;
    books::delete_book(&mut *tx, id).await?;

    tx.commit().await?;
    tracing::debug!(book_id = id, released, "book deleted");

    Ok(())
}

pub async fn save_question(
    pool: &SqlitePool,
    book_id: i64,
    question_id: i64,
    user_id: i64,
) -> Result<(), AppError> {
    let mut tx = pool.begin().await?;

    if !questions::question_exists(&mut *tx, question_id).await? {
        return Err(question_not_found(question_id));
    }
    find_owned(&mut tx, book_id, user_id).await?;
    if books::contains_question(&mut *tx, book_id, question_id).await? {
        return Err(AppError::conflict("Question has already been saved."));
    }

    books::add_question(&mut *tx, book_id, question_id).await?;
    questions::adjust_saved(&mut *tx, question_id, 1).await?;

    tx.commit().await?;
    Ok(())
}

pub async fn remove_question(
    pool: &SqlitePool,
    book_id: i64,
    question_id: i64,
    user_id: i64,
) -> Result<(), AppError> {
    let mut tx = pool.begin().await?;

    if !questions::question_exists(&mut *tx, question_id).await? {
        return Err(question_not_found(question_id));
    }
    find_owned(&mut tx, book_id, user_id).await?;
    if !books::contains_question(&mut *tx, book_id, question_id).await? {
        return Err(AppError::conflict("Question has not been saved to the book."));
    }

    books::remove_question(&mut *tx, book_id, question_id).await?;
    questions::adjust_saved(&mut *tx, question_id, -1).await?;

    tx.commit().await?;
    Ok(())
}

pub async fn toggle_like(
    pool: &SqlitePool,
    id: i64,
    user_id: i64,
) -> Result<LikeStatus, AppError> {
    let mut tx = pool.begin().await?;

    ensure_active(&mut *tx, user_id).await?;
    if books::find_book(&mut *tx, id).await?.is_none() {
        return Err(book_not_found(id));
    }

    let liked = if books::has_liked(&mut *tx, id, user_id).await? {
        books::remove_like(&mut *tx, id, user_id).await?;
        books::adjust_like_count(&mut *tx, id, -1).await?;
        false
    } else {
        books::add_like(&mut *tx, id, user_id).await?;
        books::adjust_like_count(&mut *tx, id, 1).await?;
        true
    };
    let like_count = books::like_count(&mut *tx, id).await?;

    tx.commit().await?;
    Ok(LikeStatus { liked, like_count })
}

pub async fn like_status(
    pool: &SqlitePool,
    id: i64,
    user_id: i64,
) -> Result<LikeStatus, AppError> {
    let book = books::find_book(pool, id)
        .await?
        .ok_or_else(|| book_not_found(id))?;

    Ok(LikeStatus {
        liked: books::has_liked(pool, id, user_id).await?,
        like_count: book.like_count,
    })
}
