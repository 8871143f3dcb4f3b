use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use uuid::Uuid;

use crate::config;
use crate::models::{Book, UserPublic};

use super::{BookStore, StoreError, UserDirectory};

/// Postgres-backed document store. Each book is one row holding the whole
/// document as jsonb; comment mutations rewrite the document in place.
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub async fn connect(url: &str) -> Result<Self, StoreError> {
        let cfg = &config::config().database;
        let pool = PgPoolOptions::new()
            .max_connections(cfg.max_connections)
            .acquire_timeout(Duration::from_secs(cfg.connection_timeout))
            .connect(url)
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        let store = Self { pool };
        store.ensure_schema().await?;
        Ok(store)
    }

    async fn ensure_schema(&self) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS books (
                id UUID PRIMARY KEY,
                doc JSONB NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT now()
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id UUID PRIMARY KEY,
                name TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    fn decode(doc: Value) -> Result<Book, StoreError> {
        Ok(serde_json::from_value(doc)?)
    }
}

#[async_trait]
impl BookStore for PgStore {
    async fn list(&self) -> Result<Vec<Book>, StoreError> {
        let docs: Vec<Value> =
            sqlx::query_scalar("SELECT doc FROM books ORDER BY created_at, id")
                .fetch_all(&self.pool)
                .await?;

        docs.into_iter().map(Self::decode).collect()
    }

    async fn create(&self, book: Book) -> Result<Book, StoreError> {
        let doc = serde_json::to_value(&book)?;
        sqlx::query("INSERT INTO books (id, doc) VALUES ($1, $2)")
            .bind(book.id)
            .bind(doc)
            .execute(&self.pool)
            .await?;
        Ok(book)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Book>, StoreError> {
        let doc: Option<Value> = sqlx::query_scalar("SELECT doc FROM books WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        doc.map(Self::decode).transpose()
    }

    async fn save(&self, book: &Book) -> Result<(), StoreError> {
        let doc = serde_json::to_value(book)?;
        let result = sqlx::query("UPDATE books SET doc = $2 WHERE id = $1")
            .bind(book.id)
            .bind(doc)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(format!("Book {} not found", book.id)));
        }
        Ok(())
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<Option<Book>, StoreError> {
        let doc: Option<Value> =
            sqlx::query_scalar("DELETE FROM books WHERE id = $1 RETURNING doc")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        doc.map(Self::decode).transpose()
    }

    async fn delete_all(&self) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM books").execute(&self.pool).await?;
        Ok(result.rows_affected())
    }
}

#[async_trait]
impl UserDirectory for PgStore {
    async fn find_public(&self, id: Uuid) -> Result<Option<UserPublic>, StoreError> {
        let row: Option<(Uuid, String)> =
            sqlx::query_as("SELECT id, name FROM users WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.map(|(id, name)| UserPublic { id, name }))
    }
}
