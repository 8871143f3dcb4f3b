pub mod memory;
pub mod postgres;

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::{Book, UserPublic};

/// Errors surfaced by the persistence layer
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{0}")]
    NotFound(String),
    #[error("document serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
    #[error("connection error: {0}")]
    Connection(String),
}

/// Document-layer contract for book persistence.
///
/// Comment mutations go through find_by_id + save as a whole-document
/// read-modify-write. There is no version check, so two concurrent
/// writers to the same book can silently overwrite each other; callers
/// accept last-write-wins.
#[async_trait]
pub trait BookStore: Send + Sync {
    /// All books, in stable creation order.
    async fn list(&self) -> Result<Vec<Book>, StoreError>;

    async fn create(&self, book: Book) -> Result<Book, StoreError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Book>, StoreError>;

    /// Replace the stored document wholesale. Returns NotFound when the
    /// id has never been issued or was deleted.
    async fn save(&self, book: &Book) -> Result<(), StoreError>;

    /// Remove one book, returning its prior state, or None on a miss.
    async fn delete_by_id(&self, id: Uuid) -> Result<Option<Book>, StoreError>;

    /// Remove every book unconditionally; returns the count affected.
    async fn delete_all(&self) -> Result<u64, StoreError>;
}

/// Lookup-only access to user identities, used to expand comment user
/// references for output.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn find_public(&self, id: Uuid) -> Result<Option<UserPublic>, StoreError>;
}

/// Shared handles injected into every handler via axum state.
#[derive(Clone)]
pub struct AppState {
    pub books: Arc<dyn BookStore>,
    pub users: Arc<dyn UserDirectory>,
}
