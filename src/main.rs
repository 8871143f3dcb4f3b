use std::sync::Arc;

use anyhow::Context;

use book_api_rust::store::memory::{MemoryStore, MemoryUserDirectory};
use book_api_rust::store::postgres::PgStore;
use book_api_rust::store::AppState;
use book_api_rust::{app, config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    // Initialize configuration (this loads the config singleton)
    let config = config::config();

    tracing_subscriber::fmt::init();
    tracing::info!("Starting Book API in {:?} mode", config.environment);

    let state = match &config.database.url {
        Some(url) => {
            let store = Arc::new(
                PgStore::connect(url)
                    .await
                    .context("failed to connect to database")?,
            );
            AppState {
                books: store.clone(),
                users: store,
            }
        }
        None => {
            tracing::warn!("DATABASE_URL not set; using in-memory store");
            AppState {
                books: Arc::new(MemoryStore::new()),
                users: Arc::new(MemoryUserDirectory::new()),
            }
        }
    };

    let app = app(state);

    let bind_addr = format!("{}:{}", config.server.bind_address, config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Book API server listening on http://{}", bind_addr);

    axum::serve(listener, app).await.context("server")?;
    Ok(())
}
