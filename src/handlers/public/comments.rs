use axum::{
    extract::{Path, State},
    response::Json,
};

use crate::error::ApiError;
use crate::models::CommentView;
use crate::store::AppState;

use super::super::utils::{
    expand_comment, expand_comments, fetch_book, parse_book_id, parse_comment_id,
};

/// GET /books/:book_id/comments - List a book's comments with user
/// references expanded
pub async fn list(
    State(state): State<AppState>,
    Path(book_id): Path<String>,
) -> Result<Json<Vec<CommentView>>, ApiError> {
    let id = parse_book_id(&book_id)?;
    let book = fetch_book(state.books.as_ref(), id).await?;
    let views = expand_comments(state.users.as_ref(), &book.comments).await?;
    Ok(Json(views))
}

/// GET /books/:book_id/comments/:comment_id - Fetch one comment, expanded
pub async fn get(
    State(state): State<AppState>,
    Path((book_id, comment_id)): Path<(String, String)>,
) -> Result<Json<CommentView>, ApiError> {
    // Parent resolution comes first; a missing book wins over a bad
    // comment id.
    let id = parse_book_id(&book_id)?;
    let book = fetch_book(state.books.as_ref(), id).await?;

    let cid = parse_comment_id(&comment_id)?;
    let comment = book
        .comment(cid)
        .ok_or_else(|| ApiError::comment_not_found(cid))?;

    let view = expand_comment(state.users.as_ref(), comment).await?;
    Ok(Json(view))
}

/// GET /books/:book_id/populate - Expanded comments whose text contains
/// "excellent" or "good" (case-sensitive substring match, original order)
pub async fn populate(
    State(state): State<AppState>,
    Path(book_id): Path<String>,
) -> Result<Json<Vec<CommentView>>, ApiError> {
    let id = parse_book_id(&book_id)?;
    let book = fetch_book(state.books.as_ref(), id).await?;

    let matching: Vec<_> = book
        .comments
        .iter()
        .filter(|c| c.text.contains("excellent") || c.text.contains("good"))
        .cloned()
        .collect();

    let views = expand_comments(state.users.as_ref(), &matching).await?;
    Ok(Json(views))
}
