use axum::{
    extract::{Extension, Path, State},
    response::Json,
};
use serde::Deserialize;

use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::models::{Book, CommentDraft};
use crate::store::AppState;

use super::super::utils::{fetch_book, parse_book_id, parse_comment_id};

/// POST /books/:book_id/comments - Append a comment to a book
///
/// The comment's user reference is always the authenticated requester;
/// any caller-supplied user field is discarded by the draft type. The
/// whole updated book is returned, matching the rest of the comment
/// mutation endpoints.
pub async fn append(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(book_id): Path<String>,
    Json(draft): Json<CommentDraft>,
) -> Result<Json<Book>, ApiError> {
    let id = parse_book_id(&book_id)?;
    let mut book = fetch_book(state.books.as_ref(), id).await?;

    // Whole-document read-modify-write; concurrent appends to the same
    // book are last-write-wins.
    book.append_comment(draft.text, auth_user.user_id);
    state.books.save(&book).await?;

    Ok(Json(book))
}

#[derive(Debug, Deserialize)]
pub struct CommentUpdate {
    pub text: Option<String>,
}

/// PUT /books/:book_id/comments/:comment_id - Overwrite a comment's text
///
/// Only the text field is touched, and only when the request supplies
/// one; the author reference is immutable.
pub async fn update(
    State(state): State<AppState>,
    Path((book_id, comment_id)): Path<(String, String)>,
    Json(update): Json<CommentUpdate>,
) -> Result<Json<Book>, ApiError> {
    let id = parse_book_id(&book_id)?;
    let mut book = fetch_book(state.books.as_ref(), id).await?;

    let cid = parse_comment_id(&comment_id)?;
    let idx = book
        .comment_position(cid)
        .ok_or_else(|| ApiError::comment_not_found(cid))?;

    if let Some(text) = update.text {
        book.comments[idx].text = text;
    }
    state.books.save(&book).await?;

    Ok(Json(book))
}
