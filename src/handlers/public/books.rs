use axum::{
    extract::{Path, State},
    response::Json,
};

use crate::error::ApiError;
use crate::models::Book;
use crate::store::AppState;

use super::super::utils::{fetch_book, parse_book_id};

/// GET /books - List every book in the catalogue
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Book>>, ApiError> {
    let books = state.books.list().await?;
    Ok(Json(books))
}

/// GET /books/:book_id - Fetch a single book
pub async fn get(
    State(state): State<AppState>,
    Path(book_id): Path<String>,
) -> Result<Json<Book>, ApiError> {
    let id = parse_book_id(&book_id)?;
    let book = fetch_book(state.books.as_ref(), id).await?;
    Ok(Json(book))
}
