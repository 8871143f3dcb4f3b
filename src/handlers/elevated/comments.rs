use axum::{
    extract::{Path, State},
    response::Json,
};

use crate::error::ApiError;
use crate::models::Book;
use crate::store::AppState;

use super::super::utils::{fetch_book, parse_book_id, parse_comment_id};

/// DELETE /books/:book_id/comments/:comment_id - Remove one comment from
/// a book's sequence (admin only). Order of the remaining comments is
/// preserved; the updated book is returned.
pub async fn delete(
    State(state): State<AppState>,
    Path((book_id, comment_id)): Path<(String, String)>,
) -> Result<Json<Book>, ApiError> {
    let id = parse_book_id(&book_id)?;
    let mut book = fetch_book(state.books.as_ref(), id).await?;

    let cid = parse_comment_id(&comment_id)?;
    book.remove_comment(cid)
        .ok_or_else(|| ApiError::comment_not_found(cid))?;

    state.books.save(&book).await?;
    Ok(Json(book))
}
