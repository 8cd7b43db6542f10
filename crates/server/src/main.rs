mod app;
mod config;
mod doc;
mod dtos;
mod error;
mod routes;
mod state;
mod utils;

use crate::{config::Config, state::AppState, utils::shutdown::shutdown_signal};
use database::{
    db::create_connection, local::LocalRepository, repository::TimetableRepository,
    services::sql::SqlRepository,
};
use log::{info, warn};
use migration::{Migrator, MigratorTrait};
use std::{error::Error, sync::Arc};

/// Picks the repository from configuration: Postgres when `DATABASE_URL` is
/// set, otherwise memory, optionally seeded from `SEED_FILE`
async fn build_repository(config: &Config) -> Result<Arc<dyn TimetableRepository>, Box<dyn Error>> {
    if let Some(url) = &config.database_url {
        let db = create_connection(url).await?;
        Migrator::up(&db, None).await?;
        info!("Database migrations applied");

        if config.seed_file.is_some() {
            warn!("SEED_FILE is ignored when DATABASE_URL is set");
        }
        return Ok(Arc::new(SqlRepository::new(db)));
    }

    let repository = match &config.seed_file {
        Some(path) => {
            info!("Seeding in-memory repository from {}", path.display());
            LocalRepository::from_json_file(path)?
        }
        None => {
            warn!("No DATABASE_URL or SEED_FILE set, starting with an empty in-memory repository");
            LocalRepository::new()
        }
    };
    Ok(Arc::new(repository))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let config = Config::from_env()?;
    let repository = build_repository(&config).await?;
    let app = app::router(AppState::new(repository, config.max_query_span_days));

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!("Running axum on http://{}", config.bind_addr);
    info!("API docs at http://{}/docs", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
