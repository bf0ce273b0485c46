use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

mod application;
mod data;
mod domain;
mod infrastructure;
mod presentation;
mod server;

use data::post_repository::PostRepository;
use data::repositories::memory::post_repository::InMemoryPostRepository;
use data::repositories::postgres::post_repository::PostgresPostRepository;
use infrastructure::database::{create_pool, run_migrations};
use infrastructure::logging::init_logging;
use infrastructure::settings::{Settings, StorageBackend};
use presentation::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let settings = Settings::from_env()?;

    init_logging(&settings.log_level)?;

    let repo = build_repository(&settings).await?;
    let state = AppState::new(repo);

    server::run_http(&settings, state).await
}

async fn build_repository(settings: &Settings) -> Result<Arc<dyn PostRepository>> {
    match settings.storage_backend {
        StorageBackend::Postgres => {
            let database_url = settings
                .database_url
                .as_deref()
                .context("DATABASE_URL is required for the postgres backend")?;
            let pool = create_pool(database_url, settings.database_max_connections).await?;
            run_migrations(&pool).await?;
            info!("using PostgreSQL post storage");
            Ok(Arc::new(PostgresPostRepository::new(pool)))
        }
        StorageBackend::Memory => {
            info!("using in-memory post storage");
            Ok(Arc::new(InMemoryPostRepository::new()))
        }
    }
}
