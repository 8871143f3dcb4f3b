use axum::{
    extract::{Path, State},
    response::Json,
};
use serde::Serialize;

use crate::error::ApiError;
use crate::models::{Book, BookDraft, BookPatch};
use crate::store::AppState;

use super::super::utils::{fetch_book, parse_book_id};

/// POST /books - Create a book (admin only)
///
/// Validation collects every missing scalar field into one 400 response.
pub async fn create(
    State(state): State<AppState>,
    Json(draft): Json<BookDraft>,
) -> Result<Json<Book>, ApiError> {
    let book = draft.into_book()?;
    let created = state.books.create(book).await?;
    tracing::info!("Created book {} ({})", created.id, created.title);
    Ok(Json(created))
}

/// PUT /books/:book_id - Merge a partial field set into a book (admin only)
///
/// Last-write-wins per field; no optimistic concurrency check.
pub async fn update(
    State(state): State<AppState>,
    Path(book_id): Path<String>,
    Json(patch): Json<BookPatch>,
) -> Result<Json<Book>, ApiError> {
    let id = parse_book_id(&book_id)?;
    let mut book = fetch_book(state.books.as_ref(), id).await?;

    patch.apply(&mut book);
    state.books.save(&book).await?;

    Ok(Json(book))
}

/// DELETE /books/:book_id - Remove one book, returning its prior state
/// (admin only)
pub async fn delete(
    State(state): State<AppState>,
    Path(book_id): Path<String>,
) -> Result<Json<Book>, ApiError> {
    let id = parse_book_id(&book_id)?;
    let removed = state
        .books
        .delete_by_id(id)
        .await?
        .ok_or_else(|| ApiError::book_not_found(id))?;

    tracing::info!("Deleted book {}", removed.id);
    Ok(Json(removed))
}

#[derive(Debug, Serialize)]
pub struct DeleteSummary {
    pub deleted_count: u64,
}

/// DELETE /books - Remove every book unconditionally (admin only).
/// Irreversible; there is no soft delete.
pub async fn delete_all(State(state): State<AppState>) -> Result<Json<DeleteSummary>, ApiError> {
    let deleted_count = state.books.delete_all().await?;
    tracing::info!("Deleted all books ({} removed)", deleted_count);
    Ok(Json(DeleteSummary { deleted_count }))
}
