use std::sync::Arc;

use color_eyre::eyre::Result;
use dotenv::dotenv;
use yoga_api::{ApiState, config::ApiConfig};
use yoga_db::{create_pool, pg::PgRepository, schema::initialize_database};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    // Load configuration
    let config = ApiConfig::from_env()?;

    // Create database connection pool
    let db_pool = create_pool(&config.database_url, config.db_max_connections).await?;

    // Initialize database schema
    initialize_database(&db_pool).await?;

    let repository = Arc::new(PgRepository::new(db_pool));
    let state = Arc::new(ApiState::new(repository, &config.service_name));

    // Start API server
    yoga_api::start_server(config, state).await?;

    Ok(())
}
