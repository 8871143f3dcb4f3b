use axum::{
    extract::DefaultBodyLimit,
    middleware::from_fn,
    routing::{delete, get, post, put},
    Router,
};
use serde_json::{json, Value};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::{self, SecurityConfig};
use crate::handlers::{elevated, protected, public};
use crate::middleware::{jwt_auth_middleware, require_admin_middleware};
use crate::store::AppState;

/// Assemble the full application router. Route groups are split by the
/// authorization they require: none, a valid user token, or user+admin.
/// Global layers come from configuration.
pub fn app(state: AppState) -> Router {
    let config = config::config();

    let mut router = Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .merge(public_routes())
        .merge(protected_routes())
        .merge(elevated_routes())
        .layer(DefaultBodyLimit::max(config.api.max_request_size_bytes))
        .with_state(state);

    if let Some(cors) = cors_layer(&config.security) {
        router = router.layer(cors);
    }
    if config.api.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }
    router
}

/// Build the CORS layer from configuration. Disabled entirely when
/// enable_cors is off; an empty origin list falls back to permissive.
fn cors_layer(security: &SecurityConfig) -> Option<CorsLayer> {
    if !security.enable_cors {
        return None;
    }

    let origins: Vec<_> = security
        .cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    if origins.is_empty() {
        return Some(CorsLayer::permissive());
    }

    Some(
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any),
    )
}

fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/books", get(public::books::list))
        .route("/books/:book_id", get(public::books::get))
        .route("/books/:book_id/comments", get(public::comments::list))
        .route(
            "/books/:book_id/comments/:comment_id",
            get(public::comments::get),
        )
        .route("/books/:book_id/populate", get(public::comments::populate))
}

fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/books/:book_id/comments", post(protected::comments::append))
        .route(
            "/books/:book_id/comments/:comment_id",
            put(protected::comments::update),
        )
        .route_layer(from_fn(jwt_auth_middleware))
}

fn elevated_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/books",
            post(elevated::books::create).delete(elevated::books::delete_all),
        )
        .route(
            "/books/:book_id",
            put(elevated::books::update).delete(elevated::books::delete),
        )
        .route(
            "/books/:book_id/comments/:comment_id",
            delete(elevated::comments::delete),
        )
        // Innermost first: the admin gate assumes the JWT layer already ran
        .route_layer(from_fn(require_admin_middleware))
        .route_layer(from_fn(jwt_auth_middleware))
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "success": true,
        "data": {
            "name": "Book API (Rust)",
            "version": version,
            "description": "Book catalogue REST API built with Rust (Axum)",
            "endpoints": {
                "home": "/ (public)",
                "books": "GET /books, GET /books/:id (public)",
                "books_admin": "POST /books, PUT/DELETE /books/:id, DELETE /books (admin)",
                "comments": "GET /books/:id/comments[/:cid] (public)",
                "comments_user": "POST /books/:id/comments, PUT /books/:id/comments/:cid (user)",
                "comments_admin": "DELETE /books/:id/comments/:cid (admin)",
                "populate": "GET /books/:id/populate (public)",
            }
        }
    }))
}

async fn health() -> axum::response::Json<Value> {
    let now = chrono::Utc::now();

    axum::response::Json(json!({
        "success": true,
        "data": {
            "status": "ok",
            "timestamp": now
        }
    }))
}
