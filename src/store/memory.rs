use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::{Book, UserPublic};

use super::{BookStore, StoreError, UserDirectory};

/// In-memory document store. Used when no DATABASE_URL is configured and
/// throughout the test suite. Creation order is tracked separately so
/// listings stay stable.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Shelf>,
}

#[derive(Default)]
struct Shelf {
    books: HashMap<Uuid, Book>,
    order: Vec<Uuid>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookStore for MemoryStore {
    async fn list(&self) -> Result<Vec<Book>, StoreError> {
        let shelf = self.inner.read().await;
        Ok(shelf
            .order
            .iter()
            .filter_map(|id| shelf.books.get(id).cloned())
            .collect())
    }

    async fn create(&self, book: Book) -> Result<Book, StoreError> {
        let mut shelf = self.inner.write().await;
        shelf.order.push(book.id);
        shelf.books.insert(book.id, book.clone());
        Ok(book)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Book>, StoreError> {
        Ok(self.inner.read().await.books.get(&id).cloned())
    }

    async fn save(&self, book: &Book) -> Result<(), StoreError> {
        let mut shelf = self.inner.write().await;
        match shelf.books.get_mut(&book.id) {
            Some(slot) => {
                *slot = book.clone();
                Ok(())
            }
            None => Err(StoreError::NotFound(format!(
                "Book {} not found",
                book.id
            ))),
        }
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<Option<Book>, StoreError> {
        let mut shelf = self.inner.write().await;
        let removed = shelf.books.remove(&id);
        if removed.is_some() {
            shelf.order.retain(|b| *b != id);
        }
        Ok(removed)
    }

    async fn delete_all(&self) -> Result<u64, StoreError> {
        let mut shelf = self.inner.write().await;
        let count = shelf.books.len() as u64;
        shelf.books.clear();
        shelf.order.clear();
        Ok(count)
    }
}

/// In-memory user directory keyed by id.
#[derive(Default)]
pub struct MemoryUserDirectory {
    users: RwLock<HashMap<Uuid, UserPublic>>,
}

impl MemoryUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, user: UserPublic) {
        self.users.write().await.insert(user.id, user);
    }
}

#[async_trait]
impl UserDirectory for MemoryUserDirectory {
    async fn find_public(&self, id: Uuid) -> Result<Option<UserPublic>, StoreError> {
        Ok(self.users.read().await.get(&id).cloned())
    }
}
