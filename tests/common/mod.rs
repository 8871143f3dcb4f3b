#![allow(dead_code)]

use std::sync::Arc;

use anyhow::Result;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use book_api_rust::auth::{generate_jwt, Claims, ACCESS_ADMIN, ACCESS_USER};
use book_api_rust::models::UserPublic;
use book_api_rust::store::memory::{MemoryStore, MemoryUserDirectory};
use book_api_rust::store::AppState;

/// In-process test application: the real router over the in-memory store.
/// Each test constructs its own instance, so state never leaks between
/// tests.
pub struct TestApp {
    router: Router,
    users: Arc<MemoryUserDirectory>,
}

impl TestApp {
    pub fn new() -> Self {
        let users = Arc::new(MemoryUserDirectory::new());
        let state = AppState {
            books: Arc::new(MemoryStore::new()),
            users: users.clone(),
        };
        Self {
            router: book_api_rust::app(state),
            users,
        }
    }

    /// Register a user in the directory so reference expansion can find it.
    pub async fn seed_user(&self, name: &str) -> Uuid {
        let id = Uuid::new_v4();
        self.users
            .insert(UserPublic {
                id,
                name: name.to_string(),
            })
            .await;
        id
    }

    /// Drive the router with a fully built request and hand back the raw
    /// response, for tests that need to inspect headers.
    pub async fn raw(&self, request: Request<Body>) -> Result<axum::response::Response> {
        Ok(self.router.clone().oneshot(request).await?)
    }

    pub async fn request(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> Result<(StatusCode, Value)> {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(token) = token {
            builder = builder.header("Authorization", format!("Bearer {}", token));
        }

        let request = match body {
            Some(json) => builder
                .header("Content-Type", "application/json")
                .body(Body::from(serde_json::to_string(&json)?))?,
            None => builder.body(Body::empty())?,
        };

        let response = self.router.clone().oneshot(request).await?;
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)?
        };
        Ok((status, value))
    }

    pub async fn get(&self, path: &str) -> Result<(StatusCode, Value)> {
        self.request(Method::GET, path, None, None).await
    }

    pub async fn post(
        &self,
        path: &str,
        token: Option<&str>,
        body: Value,
    ) -> Result<(StatusCode, Value)> {
        self.request(Method::POST, path, token, Some(body)).await
    }

    pub async fn put(
        &self,
        path: &str,
        token: Option<&str>,
        body: Value,
    ) -> Result<(StatusCode, Value)> {
        self.request(Method::PUT, path, token, Some(body)).await
    }

    pub async fn delete(&self, path: &str, token: Option<&str>) -> Result<(StatusCode, Value)> {
        self.request(Method::DELETE, path, token, None).await
    }
}

/// Mint a token for an administrator identity.
pub fn admin_token(user_id: Uuid) -> String {
    generate_jwt(Claims::new(
        user_id,
        "admin".to_string(),
        ACCESS_ADMIN.to_string(),
    ))
    .expect("token generation")
}

/// Mint a token for a regular authenticated user.
pub fn user_token(user_id: Uuid) -> String {
    generate_jwt(Claims::new(
        user_id,
        "reader".to_string(),
        ACCESS_USER.to_string(),
    ))
    .expect("token generation")
}

/// A complete, valid book payload matching every required field.
pub fn sample_book_payload() -> Value {
    serde_json::json!({
        "title": "X",
        "author": "Y",
        "publisher": "Z",
        "publication_year": 2020,
        "genre": "Fiction",
        "summary": "S",
        "contents": "C"
    })
}
