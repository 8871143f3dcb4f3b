use uuid::Uuid;

use crate::error::ApiError;
use crate::models::{Book, Comment, CommentView};
use crate::store::{BookStore, UserDirectory};

/// Parse a book id from its path segment. Identifiers that were never
/// issued cannot resolve, so malformed ones get the same 404 contract.
pub fn parse_book_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::book_not_found(raw))
}

pub fn parse_comment_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::comment_not_found(raw))
}

/// Resolve the parent book or fail with the book-specific 404. Every
/// comment operation starts here.
pub async fn fetch_book(books: &dyn BookStore, id: Uuid) -> Result<Book, ApiError> {
    books
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::book_not_found(id))
}

/// Expand a comment's user reference against the directory. A vanished
/// user degrades to None rather than failing the request.
pub async fn expand_comment(
    users: &dyn UserDirectory,
    comment: &Comment,
) -> Result<CommentView, ApiError> {
    let user = users.find_public(comment.user).await?;
    Ok(CommentView {
        id: comment.id,
        text: comment.text.clone(),
        user,
    })
}

pub async fn expand_comments(
    users: &dyn UserDirectory,
    comments: &[Comment],
) -> Result<Vec<CommentView>, ApiError> {
    let mut views = Vec::with_capacity(comments.len());
    for comment in comments {
        views.push(expand_comment(users, comment).await?);
    }
    Ok(views)
}
